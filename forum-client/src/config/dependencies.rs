//! Dependency initialization and wiring for the forum client.
use std::sync::Arc;

use reqwest::cookie::Jar;
use tracing::info;

use forum_client_backend::HttpForumBackend;
use forum_client_engine::{AppStore, CookieSessionGate, ForumClient};

use crate::config::ClientConfig;
use crate::errors::ClientError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub config: ClientConfig,
    /// Cookie jar shared by the HTTP backend and the session gate.
    pub cookies: Arc<Jar>,
    pub client: ForumClient,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    pub fn new() -> Result<Self, ClientError> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        info!(
            base_url = %config.backend.base_url,
            auth_cookie_name = %config.auth_cookie_name,
            vote_dispatch = ?config.engine.vote_dispatch,
            "Initializing dependencies"
        );

        let cookies = Arc::new(Jar::default());
        let backend = HttpForumBackend::new(&config.backend, cookies.clone())?;
        let gate = CookieSessionGate::new(
            cookies.clone(),
            config.backend.base_url.clone(),
            config.auth_cookie_name.clone(),
        );

        let client = ForumClient::new(
            Arc::new(backend),
            Arc::new(gate),
            Arc::new(AppStore::new()),
            config.engine.clone(),
        );

        Ok(Dependencies {
            config,
            cookies,
            client,
        })
    }
}
