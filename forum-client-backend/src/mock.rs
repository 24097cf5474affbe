//! In-memory backend for tests and local development.
//!
//! The `MockForumBackend` answers reads from pre-registered payloads and
//! records every write it receives. Reads and writes can be held at a gate to
//! observe the client while requests are in flight.
//!
//! # Example
//!
//! ```ignore
//! use forum_client_backend::{MockForumBackend, Query, QueryData};
//!
//! let backend = MockForumBackend::new();
//! backend.register(&Query::Tags, QueryData::Tags(vec!["rust".to_string()]));
//!
//! backend.hold_fetches();
//! // ... start a read, inspect the pending state ...
//! backend.release_fetches();
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::ApiError;
use crate::interfaces::ForumBackend;
use crate::requests::{Mutation, Query, QueryData};

/// Mock backend that returns pre-configured payloads.
pub struct MockForumBackend {
    /// Map of query fingerprint -> outcome
    responses: Mutex<HashMap<String, Result<QueryData, ApiError>>>,
    /// Failures returned by the next writes, oldest first
    send_failures: Mutex<VecDeque<ApiError>>,
    fetched: Mutex<Vec<String>>,
    sent: Mutex<Vec<Mutation>>,
    fetch_gate: watch::Sender<bool>,
    send_gate: watch::Sender<bool>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn wait_until_open(gate: &watch::Sender<bool>) {
    let mut rx = gate.subscribe();
    let _ = rx.wait_for(|open| *open).await;
}

impl MockForumBackend {
    /// Create a mock backend with no registered payloads and open gates.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            send_failures: Mutex::new(VecDeque::new()),
            fetched: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            fetch_gate: watch::channel(true).0,
            send_gate: watch::channel(true).0,
        }
    }

    /// Register the payload returned for a query, replacing any previous one.
    pub fn register(&self, query: &Query, data: QueryData) {
        lock(&self.responses).insert(query.fingerprint(), Ok(data));
    }

    /// Make reads of a query fail with the given error.
    pub fn fail_fetch(&self, query: &Query, error: ApiError) {
        lock(&self.responses).insert(query.fingerprint(), Err(error));
    }

    /// Make the next write fail with the given error. Failures queue up.
    pub fn fail_next_send(&self, error: ApiError) {
        lock(&self.send_failures).push_back(error);
    }

    /// Hold every read at the gate until `release_fetches` is called.
    pub fn hold_fetches(&self) {
        self.fetch_gate.send_replace(false);
    }

    pub fn release_fetches(&self) {
        self.fetch_gate.send_replace(true);
    }

    /// Hold every write at the gate until `release_sends` is called.
    pub fn hold_sends(&self) {
        self.send_gate.send_replace(false);
    }

    pub fn release_sends(&self) {
        self.send_gate.send_replace(true);
    }

    /// Number of reads issued for a query.
    pub fn fetch_count(&self, query: &Query) -> usize {
        let fingerprint = query.fingerprint();
        lock(&self.fetched)
            .iter()
            .filter(|f| **f == fingerprint)
            .count()
    }

    /// Writes issued so far, in the order they were issued.
    pub fn sent(&self) -> Vec<Mutation> {
        lock(&self.sent).clone()
    }
}

impl Default for MockForumBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForumBackend for MockForumBackend {
    /// The payload is looked up when the read is issued, so a read held at the
    /// gate answers with the data registered at that moment.
    async fn fetch(&self, query: &Query) -> Result<QueryData, ApiError> {
        let fingerprint = query.fingerprint();
        lock(&self.fetched).push(fingerprint.clone());
        let outcome = lock(&self.responses)
            .get(&fingerprint)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::server(404, "Not found")));

        wait_until_open(&self.fetch_gate).await;
        outcome
    }

    async fn send(&self, mutation: &Mutation) -> Result<(), ApiError> {
        lock(&self.sent).push(mutation.clone());
        let failure = lock(&self.send_failures).pop_front();

        wait_until_open(&self.send_gate).await;
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_client_shared::types::{VoteButton, VoteTarget};

    #[tokio::test]
    async fn test_registered_payload() {
        let backend = MockForumBackend::new();
        backend.register(&Query::Tags, QueryData::Tags(vec!["rust".to_string()]));

        let data = backend.fetch(&Query::Tags).await.unwrap();
        assert_eq!(data, QueryData::Tags(vec!["rust".to_string()]));
        assert_eq!(backend.fetch_count(&Query::Tags), 1);
    }

    #[tokio::test]
    async fn test_unregistered_query_is_not_found() {
        let backend = MockForumBackend::new();
        let error = backend
            .fetch(&Query::PostById("missing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(404));
    }

    #[tokio::test]
    async fn test_send_failures_are_consumed_in_order() {
        let backend = MockForumBackend::new();
        backend.fail_next_send(ApiError::server(500, "server error"));

        let mutation = Mutation::DeleteVote {
            target: VoteTarget::post("p1"),
        };
        assert!(backend.send(&mutation).await.is_err());
        assert!(backend
            .send(&Mutation::UpsertVote {
                target: VoteTarget::post("p1"),
                vote: VoteButton::Like,
            })
            .await
            .is_ok());
        assert_eq!(backend.sent().len(), 2);
        assert_eq!(backend.sent()[0], mutation);
    }
}
