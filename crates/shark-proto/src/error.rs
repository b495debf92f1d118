use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("malformed {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid daemon URL {url:?}: {reason}")]
    DaemonUrl { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

impl ProtoError {
    pub fn decode(what: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { what, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_display_names_the_payload() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = ProtoError::decode("status snapshot", source);
        assert!(err.to_string().starts_with("malformed status snapshot: "));
    }

    #[test]
    fn test_daemon_url_display() {
        let err = ProtoError::DaemonUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid daemon URL \"nope\": relative URL without a base"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ProtoError = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }
}
