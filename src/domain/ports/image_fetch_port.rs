//! Port definition for fetching remote image bytes.

use async_trait::async_trait;
use bytes::Bytes;

/// Result type for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while fetching one remote resource.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Transport failed before a response arrived.
    #[error("network error fetching {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// Server answered with a non-success status.
    #[error("unexpected status {status} fetching {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// Response body could not be read.
    #[error("failed to read body of {url}: {message}")]
    Body {
        /// Requested URL.
        url: String,
        /// Read error description.
        message: String,
    },
}

impl FetchError {
    /// Returns the URL the failed request targeted.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Network { url, .. } | Self::Status { url, .. } | Self::Body { url, .. } => url,
        }
    }
}

/// Port for plain GET requests of binary resources.
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Fetches the full body of `url`.
    async fn fetch(&self, url: &str) -> FetchResult<Bytes>;
}
