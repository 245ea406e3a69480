use thiserror::Error;

/// Failure to obtain a usable envelope from the server.
///
/// `Display` renders only the underlying message; callers add the
/// "failed to <action>" context themselves.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            Self::Decode(_) => None,
        }
    }
}
