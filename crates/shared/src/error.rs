use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of a non-2xx reply. Only `message` is consumed; servers are free to
/// omit it, in which case callers fall back to a status-derived text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best-effort extraction from an already parsed JSON body.
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self {
            success: value
                .get("success")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or_default(),
            message: value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP error! status: {status}")]
pub struct HttpStatusError {
    pub status: u16,
}
