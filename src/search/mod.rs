//! Search-based crawler
//!
//! Drives a target site's own search feature for each keyword. Sites with a
//! registered search template are queried directly (`exact`); anything else
//! gets a best-effort guess at the landing page's search form (`fallback`).
//! Keywords that yield no fetchable page are simply absent from the report.

mod form;
mod patterns;

pub use form::guess_search_url;
pub use patterns::{SEARCH_PATTERNS, SearchPattern, pattern_for};

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use crate::analyzer;
use crate::crawler::{CrawlError, CrawlerConfig};
use crate::fetch::Fetcher;
use crate::store::ResourceStore;

/// How many characters of the first paragraph become the description
const DESCRIPTION_CHARS: usize = 200;

/// How a keyword's search page was located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    /// A registered site-specific search template
    Exact,
    /// A guessed search form on the landing page
    Fallback,
}

/// A result link preview scraped from a search page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPreview {
    /// Visible link text
    pub title: String,
    /// Absolute URL
    pub url: String,
}

/// Everything collected for one keyword
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// URL of the fetched search page
    pub url: String,
    /// Where the search page was saved
    pub file_path: PathBuf,
    /// How the search URL was located
    pub method: SearchMethod,
    /// First paragraph or title of the search page, for quick inspection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Result links scraped from the search page
    pub result_links: Vec<LinkPreview>,
}

/// Per-keyword outcomes of a search-based crawl
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchReport {
    /// Site the search ran against
    pub base_url: String,
    /// Keyword to outcome; keywords without a fetchable page are absent
    pub hits: BTreeMap<String, SearchHit>,
}

/// Run a site's search feature for each keyword and persist the result pages
#[instrument(skip(fetcher, store, config, keywords))]
pub async fn crawl_search(
    fetcher: &Fetcher,
    store: &ResourceStore,
    config: &CrawlerConfig,
    base_url: &str,
    keywords: &[String],
    language: &str,
) -> Result<SearchReport, CrawlError> {
    if keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(CrawlError::EmptyKeywords);
    }

    let parsed = Url::parse(base_url)?;
    let host = parsed
        .host_str()
        .unwrap_or_default()
        .trim_start_matches("www.")
        .to_string();
    let lang = patterns::normalize_language(language);

    let mut report = SearchReport {
        base_url: base_url.to_string(),
        hits: BTreeMap::new(),
    };

    // The landing page is only needed for form guessing; fetch it at most
    // once even with many keywords.
    let mut landing: Option<Option<String>> = None;

    for keyword in keywords {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            continue;
        }

        let attempt = match patterns::pattern_for(&host) {
            Some(pattern) => {
                let mut url = pattern.render(base_url, keyword);
                if patterns::supports_language(&host) {
                    url = append_language(&url, lang);
                }
                Some((url, SearchMethod::Exact))
            }
            None => {
                if landing.is_none() {
                    landing = Some(fetcher.fetch(base_url).await.ok());
                }
                landing
                    .as_ref()
                    .and_then(|page| page.as_deref())
                    .and_then(|html| guess_search_url(html, base_url, keyword))
                    .map(|url| (url, SearchMethod::Fallback))
            }
        };

        let Some((search_url, method)) = attempt else {
            debug!("No search route for '{}' on {}", keyword, host);
            continue;
        };

        let html = match fetcher.fetch(&search_url).await {
            Ok(html) => html,
            Err(e) => {
                debug!("Search fetch for '{}' failed: {}", keyword, e);
                continue;
            }
        };

        let identifier = format!("search_{}_{}", host, keyword.replace(' ', "_"));
        let file_path = store.save(&identifier, &html).await?;

        let description = first_paragraph(&html).or_else(|| analyzer::page_title(&html));
        let result_links = collect_result_links(&html, &search_url, config.max_results);

        report.hits.insert(
            keyword.to_string(),
            SearchHit {
                url: search_url,
                file_path,
                method,
                description,
                result_links,
            },
        );
    }

    info!(
        "Search on {} produced {} hits for {} keywords",
        host,
        report.hits.len(),
        keywords.len()
    );
    Ok(report)
}

fn append_language(url: &str, lang: &str) -> String {
    if url.contains('?') {
        format!("{url}&lang={lang}")
    } else {
        format!("{url}?lang={lang}")
    }
}

fn first_paragraph(html: &str) -> Option<String> {
    analyzer::extract_by_tag(html, "p", None, None)
        .into_iter()
        .find(|text| !text.is_empty())
        .map(|text| {
            if text.chars().count() > DESCRIPTION_CHARS {
                text.chars().take(DESCRIPTION_CHARS).collect()
            } else {
                text
            }
        })
}

fn collect_result_links(html: &str, page_url: &str, max_results: usize) -> Vec<LinkPreview> {
    let anchors = analyzer::extract_anchors(html);
    let Ok(base) = Url::parse(page_url) else {
        return Vec::new();
    };

    let mut seen = std::collections::HashSet::new();
    let mut links = Vec::new();

    for anchor in anchors {
        if links.len() >= max_results {
            break;
        }
        if anchor.text.is_empty() || anchor.href.starts_with('#') {
            continue;
        }
        let Ok(resolved) = base.join(&anchor.href) else {
            continue;
        };
        if !resolved.scheme().starts_with("http") {
            continue;
        }
        let url = resolved.to_string();
        if seen.insert(url.clone()) {
            links.push(LinkPreview {
                title: anchor.text,
                url,
            });
        }
    }

    links
}
