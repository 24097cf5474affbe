//! Configuration module for the forum client.
//! Reads settings from the environment and wires the engine dependencies.
mod client_config;
mod dependencies;

pub use client_config::ClientConfig;
pub use dependencies::Dependencies;
