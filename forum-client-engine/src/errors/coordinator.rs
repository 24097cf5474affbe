//! Error types for the vote coordinator.
use forum_client_backend::ApiError;
use thiserror::Error;

/// Represents errors that can occur while submitting a vote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    /// The click was refused locally and the login prompt was shown.
    #[error("User unauthenticated")]
    Unauthenticated,
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),
    /// The task issuing the backend call did not run to completion.
    #[error("Vote task aborted: {0}")]
    Aborted(String),
}
