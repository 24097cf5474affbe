//! This module defines the `ForumBackend` trait, the seam between the client
//! engine and the forum REST API. It abstracts the transport so that the cache
//! and the vote coordinator can be exercised against an in-memory backend.
use crate::errors::ApiError;
use crate::requests::{Mutation, Query, QueryData};

/// A trait that defines the interface for talking to the forum backend.
///
/// Implementors carry the user's session themselves; callers never pass
/// credentials explicitly.
#[async_trait::async_trait]
pub trait ForumBackend: Send + Sync {
    /// Performs a read and decodes its payload.
    ///
    /// # Arguments
    ///
    /// * `query` - The read to perform.
    ///
    /// # Returns
    ///
    /// The decoded `QueryData` or an `ApiError` describing why the read failed.
    async fn fetch(&self, query: &Query) -> Result<QueryData, ApiError>;

    /// Performs a write. The response body of a successful write is ignored.
    ///
    /// # Arguments
    ///
    /// * `mutation` - The write to perform.
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or an `ApiError` if the backend rejected the write.
    async fn send(&self, mutation: &Mutation) -> Result<(), ApiError>;
}
