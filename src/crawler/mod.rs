//! Keyword-driven crawlers
//!
//! This module provides the domain crawler over fixed climate categories and
//! the custom-URL crawler, plus the shared pieces both are built from:
//! keyword filtering, crawl results, and configuration.

mod categories;
mod config;
mod custom;
mod domain;
mod error;

pub use categories::Category;
pub use config::{CrawlerConfig, CrawlerConfigBuilder};
pub use custom::crawl_custom;
pub use domain::crawl_domain;
pub use error::CrawlError;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// Pages accepted by a crawl: visited URLs and where each one landed on disk
///
/// The two lists correspond one-to-one by position. A failed fetch appears
/// in neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlResult {
    /// URLs of accepted pages, in visit order
    pub urls: Vec<String>,
    /// Saved file path for each accepted page
    pub file_paths: Vec<PathBuf>,
}

impl CrawlResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted page
    ///
    /// The only way the lists grow, so they stay in lockstep.
    pub fn push(&mut self, url: impl Into<String>, file_path: PathBuf) {
        self.urls.push(url.into());
        self.file_paths.push(file_path);
    }

    /// Number of accepted pages
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// True when no page was accepted
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Case-insensitive substring matcher over a keyword set
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    terms: Vec<String>,
}

impl KeywordFilter {
    /// Build a filter from raw keywords
    ///
    /// Keywords are trimmed and lowercased; an effectively empty set is a
    /// caller error.
    pub fn new(keywords: &[String]) -> Result<Self, CrawlError> {
        let terms: Vec<String> = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        if terms.is_empty() {
            return Err(CrawlError::EmptyKeywords);
        }

        Ok(Self { terms })
    }

    /// True when any keyword occurs in `text` as a substring
    pub fn matches(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.terms.iter().any(|term| haystack.contains(term.as_str()))
    }
}

/// Short host-based identifier for saved-page filenames
pub(crate) fn host_identifier(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| "site".to_string())
}
