//! Model Context Protocol (MCP) server implementation
//!
//! Exposes the crawl-and-extract pipeline as tools a language model can
//! call:
//!
//! - `html_analyzer`: extract text, elements or links from HTML
//! - `climate_domain_crawler`: crawl the seed sites of a climate category
//! - `custom_url_crawler`: crawl a caller-supplied URL one level deep
//! - `search_based_crawler`: drive a site's own search feature per keyword
//! - `extract_climate_evidence`: score paragraphs against a question
//!
//! plus a read-only `resource://categories` resource listing the supported
//! categories. Served over stdio.

mod tools;

pub use tools::{CATEGORIES_URI, EvidenceServer};

use rmcp::{ServiceExt, transport::stdio};
use tracing::info;

use crate::crawler::CrawlerConfig;
use crate::error::{Error, Result};

/// Run the MCP server over stdio until the client disconnects
pub async fn run(config: CrawlerConfig) -> Result<()> {
    info!(
        "Starting evidencer MCP server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let service = EvidenceServer::new(config)
        .serve(stdio())
        .await
        .map_err(|e| Error::Other(format!("MCP server failed to start: {e}")))?;

    info!("Server listening for tool invocations...");
    service
        .waiting()
        .await
        .map_err(|e| Error::Other(format!("MCP server task failed: {e}")))?;

    Ok(())
}
