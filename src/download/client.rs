//! HTTP client wrapper shared by the index fetch and the episode downloader.
//!
//! Requests carry no custom headers. The only configuration is a connect
//! timeout; there is no overall timeout because episodes are large.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use super::constants::CONNECT_TIMEOUT_SECS;

/// HTTP client for index pages and streaming episode downloads.
///
/// Created once and reused for every request of a run, taking advantage of
/// connection pooling. Cloning is cheap.
///
/// # Example
///
/// ```no_run
/// use podgrab_core::HttpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let response = client.get_ok("https://player.fm/series/example/episodes").await?;
/// println!("{:?}", response.headers().get("content-length"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

/// Why a GET did not produce a 200 response.
#[derive(Debug, thiserror::Error)]
pub enum RequestFailure {
    /// Transport error before a response arrived.
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    /// The server answered with a status other than 200.
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with the default 30 second connect timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with an explicit connect timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_connect_timeout(connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Sends a GET and accepts only a 200 response.
    ///
    /// # Errors
    ///
    /// Returns [`RequestFailure::Network`] on transport errors and
    /// [`RequestFailure::Status`] for any status other than 200.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn get_ok(&self, url: &str) -> Result<reqwest::Response, RequestFailure> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "response received");
        if status != StatusCode::OK {
            return Err(RequestFailure::Status(status));
        }
        Ok(response)
    }
}
