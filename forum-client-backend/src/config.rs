//! Location of the forum REST API.
use std::time::Duration;

use url::{ParseError, Url};

/// Default upper bound on a single request, connect to last body byte.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the forum backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the versioned API, e.g. `http://localhost:5000/api/v1`.
    pub base_url: Url,
    /// Time after which a request fails with a transport error.
    pub request_timeout: Duration,
}

impl BackendConfig {
    /// Builds the base URL `{protocol}://{host}:{port}/api/v{api_version}`.
    pub fn new(
        protocol: &str,
        host: &str,
        port: u16,
        api_version: &str,
    ) -> Result<Self, ParseError> {
        let base_url = Url::parse(&format!(
            "{}://{}:{}/api/v{}",
            protocol, host, port, api_version
        ))?;
        Ok(Self {
            base_url,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Absolute URL of an endpoint path such as `/posts?sortBy=Newest`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}
