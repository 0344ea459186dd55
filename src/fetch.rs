//! HTTP fetching for the crawlers
//!
//! A thin wrapper around `reqwest` that treats network failures, DNS
//! failures and non-2xx statuses uniformly as a [`FetchError`] carrying the
//! URL and cause. Crawl loops treat these as skip-and-continue, never fatal.

use std::time::Duration;

use reqwest::{Client as ReqwestClient, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Error type for fetch operations
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or completed
    #[error("request to {url} failed: {source}")]
    Request {
        /// URL that was requested
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status {
        /// URL that was requested
        url: String,
        /// HTTP status code
        status: StatusCode,
    },

    /// The response body could not be read
    #[error("could not read body from {url}: {source}")]
    Body {
        /// URL that was requested
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// URL the failed fetch was issued against
    pub fn url(&self) -> &str {
        match self {
            FetchError::Request { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// HTTP client for fetching HTML pages
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: ReqwestClient,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            &format!("evidencer/{}", env!("CARGO_PKG_VERSION")),
        )
    }
}

impl Fetcher {
    /// Create a new fetcher with the given timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch a URL and return its body as text
    ///
    /// Any failure mode (connection, DNS, timeout, non-2xx status, unreadable
    /// body) maps to a [`FetchError`] naming the URL.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status {}", url, status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/page")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>hello</body></html>")
            .expect(1)
            .create_async()
            .await;

        let fetcher = Fetcher::default();
        let body = fetcher.fetch(&format!("{}/page", server.url())).await.unwrap();
        assert!(body.contains("hello"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = Fetcher::default();
        let url = format!("{}/missing", server.url());
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { .. }));
        assert_eq!(err.url(), url);
    }

    #[tokio::test]
    async fn test_fetch_connection_failure() {
        // Nothing listens on this port.
        let fetcher = Fetcher::new(Duration::from_secs(1), "evidencer-test");
        let err = fetcher.fetch("http://127.0.0.1:9/none").await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }
}
