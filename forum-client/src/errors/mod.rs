//! Error types for the forum client application.
//! Consolidates configuration failures and backend errors raised while
//! starting up and serving reads.
use forum_client_backend::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),
}

impl ClientError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
