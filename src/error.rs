//! Error types for the evidencer crate

use thiserror::Error;

/// Result type for evidencer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for evidencer operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP fetch error
    #[error("fetch error: {0}")]
    Fetch(#[from] crate::fetch::FetchError),

    /// Crawl error
    #[error("crawl error: {0}")]
    Crawl(#[from] crate::crawler::CrawlError),

    /// Resource store error
    #[error("store error: {0}")]
    Store(#[from] crate::store::StoreError),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
