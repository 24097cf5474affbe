//! Error types for reads and writes issued through the forum client.
use forum_client_backend::ApiError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The write was refused locally and the login prompt was shown.
    #[error("User unauthenticated")]
    Unauthenticated,
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),
    /// `confirm_delete` was called while no delete confirmation was open.
    #[error("No pending deletion to confirm")]
    NothingToConfirm,
}
