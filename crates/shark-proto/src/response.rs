//! Uniform response type and the one completion rule every flow shares.

use crate::protocol::ErrorBody;

/// Outcome of a single request. `status` is `None` when the request never
/// completed (connect refused, reset, DNS failure...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: Option<u16>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
        }
    }

    /// A request that failed below HTTP. There is no body to show.
    pub fn transport_failure() -> Self {
        Self {
            status: None,
            body: String::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Some(200)
    }

    /// Split into the success body or the message to show the operator.
    pub fn into_result(self) -> Result<String, String> {
        if self.is_ok() {
            Ok(self.body)
        } else {
            Err(error_message(&self.body))
        }
    }
}

/// `{"error": ...}` yields the field's value; anything else is shown raw.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message(),
        Err(_) => body.to_string(),
    }
}
