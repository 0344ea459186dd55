//! Custom URL crawler: a start page plus one level of discovered links

use std::collections::HashSet;

use tracing::{debug, info, instrument};

use super::config::CrawlerConfig;
use super::{CrawlError, CrawlResult, KeywordFilter, host_identifier};
use crate::analyzer;
use crate::fetch::Fetcher;
use crate::store::ResourceStore;

/// Crawl `start_url` and up to `max_links` of the links it contains,
/// keeping pages whose text contains any of the keywords
///
/// Links are taken first-N in document order and never followed further
/// (depth is exactly one beyond the start page). Already-visited URLs are
/// skipped. An unreachable start page yields an empty result, not an error.
#[instrument(skip(fetcher, store, config, keywords))]
pub async fn crawl_custom(
    fetcher: &Fetcher,
    store: &ResourceStore,
    config: &CrawlerConfig,
    start_url: &str,
    keywords: &[String],
) -> Result<CrawlResult, CrawlError> {
    let filter = KeywordFilter::new(keywords)?;
    let mut result = CrawlResult::new();
    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(start_url.to_string());

    let start_html = match fetcher.fetch(start_url).await {
        Ok(html) => html,
        Err(e) => {
            debug!("Start page {} unreachable: {}", start_url, e);
            return Ok(result);
        }
    };

    if filter.matches(&analyzer::extract_text(&start_html)) {
        let identifier = format!("custom_{}", host_identifier(start_url));
        let path = store.save(&identifier, &start_html).await?;
        result.push(start_url, path);
    }

    let links = analyzer::extract_links(&start_html, start_url);
    let mut followed = 0usize;

    for link in links {
        if followed >= config.max_links {
            break;
        }
        if !visited.insert(link.clone()) {
            continue;
        }
        followed += 1;

        let html = match fetcher.fetch(&link).await {
            Ok(html) => html,
            Err(e) => {
                debug!("Skipping {}: {}", link, e);
                continue;
            }
        };

        if !filter.matches(&analyzer::extract_text(&html)) {
            debug!("No keyword match on {}", link);
            continue;
        }

        let identifier = format!("custom_{}", host_identifier(&link));
        let path = store.save(&identifier, &html).await?;
        result.push(link, path);
    }

    info!(
        "Visited {} pages from {}, accepted {}",
        followed + 1,
        start_url,
        result.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::tempdir;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[tokio::test]
    async fn test_crawl_custom_follows_links_one_level() {
        let mut server = Server::new_async().await;
        let _start = server
            .mock("GET", "/start")
            .with_status(200)
            .with_body(
                r#"<html><p>emissions overview</p>
                   <a href="/child-a">a</a>
                   <a href="/child-b">b</a></html>"#,
            )
            .create_async()
            .await;
        let _child_a = server
            .mock("GET", "/child-a")
            .with_status(200)
            .with_body(r#"<html><p>more on emissions</p><a href="/grandchild">g</a></html>"#)
            .create_async()
            .await;
        let _child_b = server
            .mock("GET", "/child-b")
            .with_status(200)
            .with_body("<html><p>unrelated</p></html>")
            .create_async()
            .await;
        // Depth stops at one: /grandchild must never be requested.
        let grandchild = server
            .mock("GET", "/grandchild")
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let store = ResourceStore::with_base_path(dir.path());
        let fetcher = Fetcher::default();
        let config = CrawlerConfig::default();

        let start = format!("{}/start", server.url());
        let result = crawl_custom(&fetcher, &store, &config, &start, &keywords(&["emissions"]))
            .await
            .unwrap();

        assert_eq!(
            result.urls,
            vec![start.clone(), format!("{}/child-a", server.url())]
        );
        assert_eq!(result.urls.len(), result.file_paths.len());
        grandchild.assert_async().await;
    }

    #[tokio::test]
    async fn test_crawl_custom_bounds_link_visits() {
        let mut server = Server::new_async().await;
        let links: String = (0..10)
            .map(|i| format!(r#"<a href="/link-{i}">l</a>"#))
            .collect();
        let _start = server
            .mock("GET", "/start")
            .with_status(200)
            .with_body(format!("<html><p>climate</p>{links}</html>"))
            .create_async()
            .await;

        let mut link_mocks = Vec::new();
        for i in 0..10 {
            let mock = server
                .mock("GET", format!("/link-{i}").as_str())
                .with_status(200)
                .with_body("<html><p>climate</p></html>")
                .create_async()
                .await;
            link_mocks.push(mock);
        }

        let dir = tempdir().unwrap();
        let store = ResourceStore::with_base_path(dir.path());
        let fetcher = Fetcher::default();
        let config = CrawlerConfig::builder().max_links(5).build();

        let start = format!("{}/start", server.url());
        let result = crawl_custom(&fetcher, &store, &config, &start, &keywords(&["climate"]))
            .await
            .unwrap();

        // Start page plus the first five links, in document order.
        assert_eq!(result.len(), 6);
        assert_eq!(result.urls[1], format!("{}/link-0", server.url()));
        assert_eq!(result.urls[5], format!("{}/link-4", server.url()));
    }

    #[tokio::test]
    async fn test_crawl_custom_skips_duplicate_links() {
        let mut server = Server::new_async().await;
        let _start = server
            .mock("GET", "/start")
            .with_status(200)
            .with_body(
                r#"<html><p>climate</p>
                   <a href="/only">x</a>
                   <a href="/only">x again</a></html>"#,
            )
            .create_async()
            .await;
        let only = server
            .mock("GET", "/only")
            .with_status(200)
            .with_body("<html><p>climate</p></html>")
            .expect(1)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let store = ResourceStore::with_base_path(dir.path());
        let fetcher = Fetcher::default();
        let config = CrawlerConfig::default();

        let start = format!("{}/start", server.url());
        let result = crawl_custom(&fetcher, &store, &config, &start, &keywords(&["climate"]))
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        only.assert_async().await;
    }

    #[tokio::test]
    async fn test_crawl_custom_unreachable_start_is_empty() {
        let dir = tempdir().unwrap();
        let store = ResourceStore::with_base_path(dir.path());
        let fetcher = Fetcher::new(std::time::Duration::from_secs(1), "evidencer-test");
        let config = CrawlerConfig::default();

        let result = crawl_custom(
            &fetcher,
            &store,
            &config,
            "http://127.0.0.1:9/nowhere",
            &keywords(&["climate"]),
        )
        .await
        .unwrap();

        assert!(result.is_empty());
    }
}
