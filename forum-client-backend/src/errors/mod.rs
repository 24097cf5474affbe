//! Error types for the forum backend.
//! Consolidates and re-exports error types related to backend requests.
mod api_error;

pub use api_error::ApiError;
