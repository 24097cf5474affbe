//! Forum Client Library
//!
//! This library provides the configuration, error handling and dependency
//! wiring of the forum client binary.

pub mod config;
pub mod errors;

pub use config::{ClientConfig, Dependencies};
pub use errors::ClientError;
