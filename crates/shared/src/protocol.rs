use serde::{Deserialize, Serialize};

use crate::domain::User;

/// Uniform `{success, data, message}` envelope wrapped around every response.
///
/// Missing `data`/`message` decode as `None`, so a bare `{"success":true}`
/// (the delete reply) decodes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Splits the envelope into the server's verdict. A `success:false` reply
    /// without a message still fails, with a generic description.
    pub fn into_outcome(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .message
                .unwrap_or_else(|| "server reported failure without a message".to_string()))
        }
    }
}

pub type UserListResult = ApiResult<Vec<User>>;
pub type UserResult = ApiResult<User>;
/// Create/update/delete replies. The payload is kept opaque: only the
/// envelope decides whether the mutation happened.
pub type MutationResult = ApiResult<serde_json::Value>;
pub type DeleteResult = MutationResult;

impl MutationResult {
    /// Typed view of the payload for callers that want one.
    pub fn data_as<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.data.clone().map(serde_json::from_value)
    }
}
