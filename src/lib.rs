//! # Evidencer - web evidence gathering for climate-change research
//!
//! This crate crawls climate-related websites, filters pages by keyword
//! relevance, persists accepted pages to a local resource folder, and
//! extracts paragraphs likely to answer a natural-language question. The
//! whole pipeline is exposed as a set of MCP tools so a language model can
//! drive it, and as a small CLI for direct use.
//!
//! ## Features
//!
//! - Domain crawling over a fixed set of climate categories and seed sites
//! - Custom-URL crawling with one level of link following
//! - Search-based crawling using known site search templates, with a
//!   form-guessing fallback for unknown sites
//! - Keyword filtering with case-insensitive substring matching
//! - Evidence extraction scoring paragraphs against a free-text query
//! - Collision-safe persistence of raw HTML under a resource folder
//!
//! ## Example
//!
//! ```rust,no_run
//! use evidencer::crawler::{self, Category, CrawlerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CrawlerConfig::default();
//!     let fetcher = config.fetcher();
//!     let store = config.store();
//!
//!     let keywords = vec!["sea level".to_string()];
//!     let result = crawler::crawl_domain(
//!         &fetcher,
//!         &store,
//!         &config,
//!         Category::SeaLevelRise,
//!         &keywords,
//!     )
//!     .await?;
//!
//!     for (url, path) in result.urls.iter().zip(&result.file_paths) {
//!         println!("{} -> {}", url, path.display());
//!     }
//!     Ok(())
//! }
//! ```

mod error;

pub mod analyzer;
pub mod crawler;
pub mod evidence;
pub mod fetch;
pub mod mcp;
pub mod search;
pub mod store;

pub use error::{Error, Result};

/// Re-export of the common types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
