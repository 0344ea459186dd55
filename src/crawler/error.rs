//! Error types for the crawler module
//!
//! Per-URL fetch failures are recovered inside the crawl loops and never
//! reach this enum; what remains are caller errors and storage failures.

use thiserror::Error;

/// Error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The requested category is not in the fixed enumeration
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The keyword set was empty after trimming
    #[error("keyword set is empty")]
    EmptyKeywords,

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Persisting an accepted page failed
    #[error("store error: {0}")]
    Store(#[from] crate::store::StoreError),
}
