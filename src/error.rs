//! Error types for the siteqa crate

use thiserror::Error;

/// Result type for siteqa operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for siteqa operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Please retry after {retry_after_secs} seconds")]
    RateLimit {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tabular storage error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Stored corpus could not be read back
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Web crawling error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Record building or chunking error
    #[error("Process error: {0}")]
    Process(String),

    /// Embedding generation error
    #[error("Embed error: {0}")]
    Embed(String),

    /// Retrieval error
    #[error("Search error: {0}")]
    Search(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
