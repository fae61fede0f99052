pub mod http_fetcher;

use async_trait::async_trait;
use thiserror::Error;

pub use http_fetcher::HttpFetcher;

/// Failures of the single outbound feed request. None of these are retried
/// here; the caller decides what to do with them.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or body read failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Upstream answered with something other than 200
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,
    /// The HTTP client could not be constructed
    #[error("could not build HTTP client: {0}")]
    Client(String),
}

#[async_trait]
pub trait Fetcher {
    /// Retrieve the raw feed document at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
