//! URLs the panel talks to, all derived from the daemon's base URL.

use reqwest::Url;

use crate::error::ProtoError;

/// Icecast listens beside the daemon on a fixed port.
pub const STREAM_STATUS_PORT: u16 = 8000;
pub const STREAM_STATUS_PATH: &str = "/status-json.xsl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub config_get: String,
    pub config_apply: String,
    pub config_validate: String,
    pub stream_status: String,
}

impl Endpoints {
    /// `daemon` is the origin serving `/config/*`, e.g. `http://shark:8080`.
    /// Any path on it is ignored.
    pub fn from_daemon_url(daemon: &str) -> Result<Self, ProtoError> {
        let bad = |reason: String| ProtoError::DaemonUrl {
            url: daemon.to_string(),
            reason,
        };

        let base = Url::parse(daemon).map_err(|e| bad(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(bad(format!("unsupported scheme {}", base.scheme())));
        }
        let host = base
            .host_str()
            .ok_or_else(|| bad("missing host".to_string()))?;

        let origin = base.origin().ascii_serialization();
        let mut status = base.clone();
        status
            .set_port(Some(STREAM_STATUS_PORT))
            .map_err(|_| bad(format!("cannot set port on {}", host)))?;
        status.set_path(STREAM_STATUS_PATH);
        status.set_query(None);
        status.set_fragment(None);

        Ok(Self {
            config_get: format!("{}/config/get", origin),
            config_apply: format!("{}/config/apply", origin),
            config_validate: format!("{}/config/validate", origin),
            stream_status: status.to_string(),
        })
    }
}
