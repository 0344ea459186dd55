//! Domain crawler over the fixed category seed list

use tracing::{debug, info, instrument};

use super::config::CrawlerConfig;
use super::{Category, CrawlError, CrawlResult, KeywordFilter, host_identifier};
use crate::analyzer;
use crate::fetch::Fetcher;
use crate::store::ResourceStore;

/// Crawl the seed sites registered for `category`, keeping pages whose text
/// contains any of the keywords
///
/// Seeds are visited in declaration order and the result mirrors that order.
/// A failed fetch skips the seed; a failed write surfaces, since losing an
/// accepted page silently would be worse.
#[instrument(skip(fetcher, store, config, keywords))]
pub async fn crawl_domain(
    fetcher: &Fetcher,
    store: &ResourceStore,
    config: &CrawlerConfig,
    category: Category,
    keywords: &[String],
) -> Result<CrawlResult, CrawlError> {
    let filter = KeywordFilter::new(keywords)?;
    let prefix = format!("climate_{}", category.slug());

    info!(
        "Crawling {} seed sites for category {}",
        category.seed_urls().len(),
        category
    );

    let result = crawl_seeds(
        fetcher,
        store,
        category.seed_urls(),
        &filter,
        &prefix,
        config.max_pages,
    )
    .await?;

    info!(
        "Accepted {} of {} seed pages",
        result.len(),
        category.seed_urls().len()
    );
    Ok(result)
}

/// Fetch-filter-persist loop shared with the tests
async fn crawl_seeds(
    fetcher: &Fetcher,
    store: &ResourceStore,
    seeds: &[&str],
    filter: &KeywordFilter,
    identifier_prefix: &str,
    max_pages: usize,
) -> Result<CrawlResult, CrawlError> {
    let mut result = CrawlResult::new();

    for seed in seeds {
        if result.len() >= max_pages {
            debug!("Page cap {} reached", max_pages);
            break;
        }

        let html = match fetcher.fetch(seed).await {
            Ok(html) => html,
            Err(e) => {
                debug!("Skipping {}: {}", seed, e);
                continue;
            }
        };

        let text = analyzer::extract_text(&html);
        if !filter.matches(&text) {
            debug!("No keyword match on {}", seed);
            continue;
        }

        let identifier = format!("{}_{}", identifier_prefix, host_identifier(seed));
        let path = store.save(&identifier, &html).await?;
        result.push(*seed, path);
    }

    Ok(result)
}
