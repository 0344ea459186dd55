//! Tool handlers for the MCP surface
//!
//! Thin adapters from tool parameters to the library crawlers: validate,
//! delegate, wrap results in JSON envelopes.

use std::str::FromStr;

use rmcp::{
    Error, RoleServer, ServerHandler,
    model::{
        AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
        PaginatedRequestParam,
        ProtocolVersion, RawResource, ReadResourceRequestParam, ReadResourceResult,
        ResourceContents, ServerCapabilities, ServerInfo,
    },
    schemars,
    service::RequestContext,
    tool,
};
use serde_json::json;

use crate::analyzer;
use crate::crawler::{self, Category, CrawlError, CrawlerConfig};
use crate::evidence;
use crate::fetch::Fetcher;
use crate::search;
use crate::store::ResourceStore;

/// URI of the read-only categories resource
pub const CATEGORIES_URI: &str = "resource://categories";

const INSTRUCTIONS: &str = "This server provides tools for gathering web-based evidence about \
climate-change questions. Use climate_domain_crawler for the predefined category sites, \
custom_url_crawler for a specific URL, and search_based_crawler to drive a site's own search \
feature. Crawled pages are saved as HTML files; analyze them with html_analyzer and pull \
supporting paragraphs with extract_climate_evidence. Translate keywords into the language of \
the target site; search_based_crawler takes a language parameter. The supported categories are \
listed under resource://categories.";

/// MCP server exposing the crawl-and-extract tool set
#[derive(Clone)]
pub struct EvidenceServer {
    config: CrawlerConfig,
    fetcher: Fetcher,
    store: ResourceStore,
}

#[tool(tool_box)]
impl EvidenceServer {
    /// Create a server from a crawler configuration
    pub fn new(config: CrawlerConfig) -> Self {
        let fetcher = config.fetcher();
        let store = config.store();
        Self {
            config,
            fetcher,
            store,
        }
    }

    #[tool(
        description = "Analyze HTML content: extract the visible text, the text of elements matching a tag/class/id, or every link as {text, href} pairs."
    )]
    fn html_analyzer(
        &self,
        #[tool(param)]
        #[schemars(description = "HTML content to analyze")]
        html_content: String,
        #[tool(param)]
        #[schemars(description = "Tag name to search for, e.g. 'p' or 'div'")]
        tag_name: Option<String>,
        #[tool(param)]
        #[schemars(description = "Class name to narrow the element search")]
        class_name: Option<String>,
        #[tool(param)]
        #[schemars(description = "Element id to narrow the element search")]
        id_name: Option<String>,
        #[tool(param)]
        #[schemars(description = "Extract every link as a {text, href} pair")]
        extract_links: Option<bool>,
        #[tool(param)]
        #[schemars(description = "Extract the page's visible text")]
        extract_text_only: Option<bool>,
    ) -> Result<CallToolResult, Error> {
        if html_content.trim().is_empty() {
            return Err(Error::invalid_request("HTML content cannot be empty", None));
        }

        let mut response = json!({});

        if extract_text_only.unwrap_or(false) {
            response["text"] = json!(analyzer::extract_text(&html_content));
        }

        if extract_links.unwrap_or(false) {
            response["links"] = json!(analyzer::extract_anchors(&html_content));
        }

        if tag_name.is_some() || class_name.is_some() || id_name.is_some() {
            let elements = analyzer::extract_by_tag(
                &html_content,
                tag_name.as_deref().unwrap_or("*"),
                class_name.as_deref(),
                id_name.as_deref(),
            );
            response["elements"] = json!(elements);
        }

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string(&response).unwrap(),
        )]))
    }

    #[tool(
        description = "Crawl the predefined seed sites of a climate category and keep pages whose text contains any of the keywords. Returns the accepted URLs and the file paths of the saved pages."
    )]
    async fn climate_domain_crawler(
        &self,
        #[tool(param)]
        #[schemars(description = "Climate category, e.g. 'carbon-emissions' or '탄소배출'")]
        category: String,
        #[tool(param)]
        #[schemars(description = "Keywords matched case-insensitively against page text")]
        keywords: Vec<String>,
    ) -> Result<CallToolResult, Error> {
        let category = Category::from_str(&category)
            .map_err(|e| Error::invalid_request(e.to_string(), None))?;

        tracing::info!(category = %category, "Domain crawl requested");

        let result = crawler::crawl_domain(
            &self.fetcher,
            &self.store,
            &self.config,
            category,
            &keywords,
        )
        .await
        .map_err(crawl_error)?;

        let response = json!({
            "urls": result.urls,
            "file_paths": result.file_paths,
            "category": category.slug(),
            "keywords": keywords,
        });

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string(&response).unwrap(),
        )]))
    }

    #[tool(
        description = "Crawl a caller-supplied URL and up to max_links of the links on it (one level deep), keeping pages whose text contains any of the keywords."
    )]
    async fn custom_url_crawler(
        &self,
        #[tool(param)]
        #[schemars(description = "URL to start crawling from")]
        start_url: String,
        #[tool(param)]
        #[schemars(description = "Keywords matched case-insensitively against page text")]
        keywords: Vec<String>,
        #[tool(param)]
        #[schemars(description = "How many discovered links to also visit (default 5)")]
        max_links: Option<usize>,
    ) -> Result<CallToolResult, Error> {
        if start_url.trim().is_empty() {
            return Err(Error::invalid_request("start_url cannot be empty", None));
        }

        let mut config = self.config.clone();
        if let Some(max_links) = max_links {
            config.max_links = max_links;
        }

        tracing::info!(start_url = %start_url, "Custom crawl requested");

        let result =
            crawler::crawl_custom(&self.fetcher, &self.store, &config, &start_url, &keywords)
                .await
                .map_err(crawl_error)?;

        let response = json!({
            "urls": result.urls,
            "file_paths": result.file_paths,
            "keywords": keywords,
        });

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string(&response).unwrap(),
        )]))
    }

    #[tool(
        description = "Run a website's own search feature for each keyword and save the result pages. Sites with a known search URL template are queried directly ('exact'); otherwise the landing page is scanned for a search form ('fallback'). Keywords with no fetchable result are absent from the output."
    )]
    async fn search_based_crawler(
        &self,
        #[tool(param)]
        #[schemars(description = "Base URL of the website to search, e.g. 'https://www.ipcc.ch'")]
        base_url: String,
        #[tool(param)]
        #[schemars(description = "Keywords to submit to the site's search feature")]
        keywords: Vec<String>,
        #[tool(param)]
        #[schemars(description = "Language code for the search (default 'ko')")]
        language: Option<String>,
    ) -> Result<CallToolResult, Error> {
        let language = language.unwrap_or_else(|| "ko".to_string());

        tracing::info!(base_url = %base_url, "Search crawl requested");

        let report = search::crawl_search(
            &self.fetcher,
            &self.store,
            &self.config,
            &base_url,
            &keywords,
            &language,
        )
        .await
        .map_err(crawl_error)?;

        let mut search_results = json!({});
        let mut search_method = json!({});
        let mut descriptions = json!({});
        let mut file_paths = json!({});
        let mut result_links = json!({});

        for (keyword, hit) in &report.hits {
            search_results[keyword.as_str()] = json!(hit.url);
            search_method[keyword.as_str()] = json!(hit.method);
            if let Some(description) = &hit.description {
                descriptions[keyword.as_str()] = json!(description);
            }
            file_paths[keyword.as_str()] = json!(hit.file_path);
            result_links[keyword.as_str()] = json!(hit.result_links);
        }

        let response = json!({
            "base_url": report.base_url,
            "keywords": keywords,
            "search_results": search_results,
            "search_method": search_method,
            "descriptions": descriptions,
            "file_paths": file_paths,
            "result_links": result_links,
        });

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string(&response).unwrap(),
        )]))
    }

    #[tool(
        description = "Extract paragraphs from HTML content that are likely to answer a climate-change question, ordered by how many query terms each contains."
    )]
    fn extract_climate_evidence(
        &self,
        #[tool(param)]
        #[schemars(description = "HTML content to search for evidence")]
        html_content: String,
        #[tool(param)]
        #[schemars(description = "The question or keywords to match paragraphs against")]
        query: String,
    ) -> Result<CallToolResult, Error> {
        if html_content.trim().is_empty() {
            return Err(Error::invalid_request("HTML content cannot be empty", None));
        }
        if query.trim().is_empty() {
            return Err(Error::invalid_request("Query cannot be empty", None));
        }

        let paragraphs = evidence::extract_evidence(&html_content, &query);

        let response = json!({
            "evidence_paragraphs": paragraphs,
            "query": query,
            "title": analyzer::page_title(&html_content),
        });

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string(&response).unwrap(),
        )]))
    }
}

/// Map crawl errors onto MCP error codes
fn crawl_error(e: CrawlError) -> Error {
    match e {
        CrawlError::Store(_) => Error::internal_error(e.to_string(), None),
        _ => Error::invalid_request(e.to_string(), None),
    }
}

#[tool(tool_box)]
impl ServerHandler for EvidenceServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_resources(
        &self,
        _request: PaginatedRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, Error> {
        Ok(ListResourcesResult {
            resources: vec![
                RawResource::new(CATEGORIES_URI, "categories".to_string()).no_annotation(),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, Error> {
        if uri == CATEGORIES_URI {
            let categories: Vec<_> = Category::ALL
                .iter()
                .map(|c| json!({ "slug": c.slug(), "label": c.label() }))
                .collect();

            Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(
                    serde_json::to_string(&categories).unwrap(),
                    uri,
                )],
            })
        } else {
            Err(Error::resource_not_found(
                "resource not found",
                Some(json!({ "uri": uri })),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> EvidenceServer {
        EvidenceServer::new(CrawlerConfig::default())
    }

    fn payload(result: &CallToolResult) -> serde_json::Value {
        // Tool content serializes as {"type": "text", "text": "<json>"}.
        let content = serde_json::to_value(&result.content[0]).unwrap();
        serde_json::from_str(content["text"].as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_html_analyzer_text_and_elements() {
        let result = server()
            .html_analyzer(
                "<html><p>first</p><p>second</p></html>".to_string(),
                Some("p".to_string()),
                None,
                None,
                None,
                Some(true),
            )
            .unwrap();

        let value = payload(&result);
        assert_eq!(value["text"], "first second");
        assert_eq!(value["elements"], json!(["first", "second"]));
    }

    #[test]
    fn test_html_analyzer_rejects_empty_content() {
        let err = server()
            .html_analyzer("  ".to_string(), None, None, None, None, Some(true))
            .unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_extract_climate_evidence_orders_paragraphs() {
        let html = "<p>해수면 상승이 가속화되고 있다</p><p>기온 상승과 무관</p>".to_string();
        let result = server()
            .extract_climate_evidence(html, "해수면 상승".to_string())
            .unwrap();

        let value = payload(&result);
        let paragraphs = value["evidence_paragraphs"].as_array().unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0]["text"], "해수면 상승이 가속화되고 있다");
        assert_eq!(paragraphs[0]["score"], 2);
    }

    #[test]
    fn test_extract_climate_evidence_no_match_is_empty_sequence() {
        let result = server()
            .extract_climate_evidence("<p>unrelated</p>".to_string(), "glacier".to_string())
            .unwrap();

        let value = payload(&result);
        assert_eq!(value["evidence_paragraphs"], json!([]));
        assert_eq!(value["query"], "glacier");
    }

    #[tokio::test]
    async fn test_domain_crawler_rejects_unknown_category() {
        let err = server()
            .climate_domain_crawler("volcanoes".to_string(), vec!["x".to_string()])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown category"));
    }
}
