//! # Forum Client Backend
//! This crate provides the interface to the forum REST API consumed by the client
//! engine. It includes definitions for errors, the backend trait, the request
//! vocabulary (queries and mutations), an HTTP implementation backed by `reqwest`
//! and an in-memory mock for tests.
pub mod config;
pub mod errors;
pub mod http;
pub mod interfaces;
pub mod mock;
pub mod requests;

pub use config::BackendConfig;
pub use errors::ApiError;
pub use http::HttpForumBackend;
pub use interfaces::ForumBackend;
pub use mock::MockForumBackend;
pub use requests::{Mutation, MutationBody, Query, QueryData};
