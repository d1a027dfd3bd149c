//! Error types for hn-hot
//!
//! Two failure classes matter to callers:
//! - transport failures (connection problems, non-success HTTP status)
//! - decode failures (a body that is not the JSON shape we expect)
//!
//! Everything else is configuration or internal task bookkeeping.

use thiserror::Error;

/// Result type alias for hn-hot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for hn-hot
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be sent or the response body could not be read
    #[error("transport error fetching {url}: {source}")]
    Transport {
        /// URL that was being fetched
        url: String,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status code
    #[error("{url} returned HTTP {status}")]
    HttpStatus {
        /// URL that was being fetched
        url: String,
        /// HTTP status code returned by the server
        status: u16,
    },

    /// The response body was not valid JSON of the expected shape
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// URL whose body failed to decode
        url: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "num_stories")
        key: Option<String>,
    },

    /// A fetch worker panicked or exited without reporting its result
    #[error("fetch task failed: {0}")]
    Task(String),

    /// Failed to encode output
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error belongs to the transport class (network or HTTP status)
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::HttpStatus { .. })
    }

    /// Whether this error belongs to the decode class (malformed payload)
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    pub(crate) fn config(message: impl Into<String>, key: &str) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}
