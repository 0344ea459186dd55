//! Crawler configuration
//!
//! One configuration struct covers all three crawl tools, built through a
//! builder for call sites that only care about a couple of knobs.

use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::{DEFAULT_TIMEOUT_SECS, Fetcher};
use crate::store::ResourceStore;

/// Configuration for the crawlers
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Per-fetch timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Maximum pages the domain crawler accepts per call
    pub max_pages: usize,

    /// Maximum discovered links the custom crawler follows beyond the start page
    pub max_links: usize,

    /// Maximum result-link previews collected per search keyword
    pub max_results: usize,

    /// Folder accepted pages are written to
    pub resource_dir: PathBuf,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("evidencer/{}", env!("CARGO_PKG_VERSION")),
            max_pages: 5,
            max_links: 5,
            max_results: 10,
            resource_dir: PathBuf::from("./resource"),
        }
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }

    /// Per-fetch timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build a fetcher honoring this configuration
    pub fn fetcher(&self) -> Fetcher {
        Fetcher::new(self.timeout(), &self.user_agent)
    }

    /// Build a resource store honoring this configuration
    pub fn store(&self) -> ResourceStore {
        ResourceStore::with_base_path(&self.resource_dir)
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the per-fetch timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the user agent sent with every request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the maximum pages the domain crawler accepts
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the maximum links the custom crawler follows
    pub fn max_links(mut self, max_links: usize) -> Self {
        self.config.max_links = max_links;
        self
    }

    /// Set the maximum result-link previews per search keyword
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.config.max_results = max_results;
        self
    }

    /// Set the folder accepted pages are written to
    pub fn resource_dir(mut self, resource_dir: impl Into<PathBuf>) -> Self {
        self.config.resource_dir = resource_dir.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlerConfig::default();
        assert_eq!(config.max_links, 5);
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.resource_dir, PathBuf::from("./resource"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = CrawlerConfig::builder()
            .timeout_secs(3)
            .user_agent("test-agent/1.0")
            .max_links(2)
            .resource_dir("/tmp/pages")
            .build();

        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.max_links, 2);
        assert_eq!(config.resource_dir, PathBuf::from("/tmp/pages"));
    }
}
