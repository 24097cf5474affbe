use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use forum_client_backend::config::DEFAULT_REQUEST_TIMEOUT;
use forum_client_backend::BackendConfig;
use forum_client_engine::{EngineConfig, VoteDispatch, DEFAULT_CACHE_CAPACITY};

use crate::errors::ClientError;

/// Default backend protocol.
const DEFAULT_PROTOCOL: &str = "http";

/// Default backend host.
const DEFAULT_HOST: &str = "localhost";

/// Default backend port.
const DEFAULT_PORT: u16 = 5000;

/// Default API version.
const DEFAULT_API_VERSION: &str = "1";

/// Default name of the session cookie set by the login endpoint.
const DEFAULT_AUTH_COOKIE_NAME: &str = "auth";

/// Settings of the forum client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend: BackendConfig,
    pub auth_cookie_name: String,
    pub engine: EngineConfig,
}

impl ClientConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FORUM_BACKEND_PROTOCOL`: Backend protocol (default: http)
    /// - `FORUM_BACKEND_HOST`: Backend host (default: localhost)
    /// - `FORUM_BACKEND_PORT`: Backend port (default: 5000)
    /// - `FORUM_API_VERSION`: API version (default: 1)
    /// - `FORUM_AUTH_COOKIE_NAME`: Session cookie name (default: auth)
    /// - `FORUM_VOTE_DISPATCH`: "ordered" or "independent" (default: ordered)
    /// - `FORUM_REQUEST_TIMEOUT_SECS`: Per-request timeout in seconds (default: 30)
    /// - `FORUM_CACHE_CAPACITY`: Maximum number of cached query results (default: 256)
    ///
    /// # Returns
    ///
    /// * `Ok(ClientConfig)` - The parsed configuration
    /// * `Err(ClientError)` - If a numeric variable does not parse or the URL is invalid
    pub fn from_env() -> Result<Self, ClientError> {
        let protocol =
            env::var("FORUM_BACKEND_PROTOCOL").unwrap_or_else(|_| DEFAULT_PROTOCOL.to_string());
        let host = env::var("FORUM_BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parse_var("FORUM_BACKEND_PORT", DEFAULT_PORT)?;
        let api_version =
            env::var("FORUM_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());
        let auth_cookie_name = env::var("FORUM_AUTH_COOKIE_NAME")
            .unwrap_or_else(|_| DEFAULT_AUTH_COOKIE_NAME.to_string());

        let request_timeout =
            parse_var("FORUM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT.as_secs())
                .map(Duration::from_secs)?;
        let cache_capacity = parse_var("FORUM_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?;

        let backend = BackendConfig::new(&protocol, &host, port, &api_version)
            .map_err(|e| {
                ClientError::config(format!(
                    "Invalid backend URL {}://{}:{}: {}",
                    protocol, host, port, e
                ))
            })?
            .with_request_timeout(request_timeout);

        Ok(Self {
            backend,
            auth_cookie_name,
            engine: EngineConfig {
                vote_dispatch: vote_dispatch_from_env(),
                cache_capacity,
            },
        })
    }
}

/// Parses `name` when set, otherwise returns `default`.
fn parse_var<T>(name: &str, default: T) -> Result<T, ClientError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| ClientError::config(format!("Invalid {} {:?}: {}", name, raw, e))),
        Err(_) => Ok(default),
    }
}

fn vote_dispatch_from_env() -> VoteDispatch {
    match env::var("FORUM_VOTE_DISPATCH") {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(error = %e, "Invalid FORUM_VOTE_DISPATCH, defaulting to 'ordered'");
            VoteDispatch::default()
        }),
        Err(_) => VoteDispatch::default(),
    }
}
