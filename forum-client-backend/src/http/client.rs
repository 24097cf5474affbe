use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::{Client as ReqwestClient, RequestBuilder};
use tracing::debug;

use crate::config::BackendConfig;
use crate::errors::ApiError;
use crate::interfaces::ForumBackend;
use crate::requests::{Mutation, Query, QueryData};

/// Production backend that talks to the forum REST API over HTTP.
///
/// Every request carries the cookies stored in the shared jar, so the session
/// cookie set by the login endpoint is sent along automatically. Requests
/// are bounded by [`BackendConfig::request_timeout`].
pub struct HttpForumBackend {
    config: BackendConfig,
    client: ReqwestClient,
}

impl HttpForumBackend {
    pub fn new(config: &BackendConfig, cookies: Arc<Jar>) -> Result<Self, ApiError> {
        let client = ReqwestClient::builder()
            .cookie_provider(cookies)
            .timeout(config.request_timeout)
            .build()?;
        Ok(HttpForumBackend {
            config: config.clone(),
            client,
        })
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn execute(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::from_response(status.as_u16(), &body))
        }
    }
}

#[async_trait]
impl ForumBackend for HttpForumBackend {
    async fn fetch(&self, query: &Query) -> Result<QueryData, ApiError> {
        let url = self.config.endpoint(&query.path());
        debug!(url = %url, "Fetching");

        let body = self.execute(self.client.get(&url)).await?;
        query.decode(&body)
    }

    async fn send(&self, mutation: &Mutation) -> Result<(), ApiError> {
        let url = self.config.endpoint(&mutation.path());
        debug!(method = %mutation.method(), url = %url, "Sending");

        let mut request = self.client.request(mutation.method(), &url);
        if let Some(body) = mutation.body() {
            request = request.json(&body);
        }

        self.execute(request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_unresponsive_backend_times_out() {
        // Accepts connections but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = BackendConfig::new("http", "127.0.0.1", port, "1")
            .unwrap()
            .with_request_timeout(Duration::from_millis(200));
        let backend = HttpForumBackend::new(&config, Arc::new(Jar::default())).unwrap();

        let started = Instant::now();
        let result = backend.fetch(&Query::Tags).await;

        assert!(matches!(result, Err(ApiError::Transport(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
