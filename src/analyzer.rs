//! HTML analysis helpers
//!
//! Thin wrappers over `scraper` for the extraction primitives the crawlers
//! and tools share. Parsing is tolerant: malformed HTML degrades to empty or
//! partial results, never to an error.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// A raw anchor as it appears in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Visible link text, whitespace-normalized
    pub text: String,
    /// The href attribute, unresolved
    pub href: String,
}

/// Strip all markup and return the concatenated visible text,
/// whitespace-normalized.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    normalize_whitespace(&text)
}

/// Return the text content of every element matching `tag_name`, in document
/// order, optionally narrowed by class and id.
///
/// An unparseable selector (e.g. a tag or class name with invalid
/// characters) yields an empty sequence rather than an error.
pub fn extract_by_tag(
    html: &str,
    tag_name: &str,
    class_name: Option<&str>,
    id_name: Option<&str>,
) -> Vec<String> {
    let mut selector_str = tag_name.to_string();
    if let Some(class) = class_name {
        selector_str.push('.');
        selector_str.push_str(class);
    }
    if let Some(id) = id_name {
        selector_str.push('#');
        selector_str.push_str(id);
    }

    let Ok(selector) = Selector::parse(&selector_str) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&selector)
        .map(|element| normalize_whitespace(&element.text().collect::<Vec<_>>().join(" ")))
        .collect()
}

/// Resolve every href in the document against `base_url` and return the
/// absolute URLs, de-duplicated, in document order.
///
/// Malformed or non-navigable hrefs (`javascript:`, fragments, unparseable
/// values) are silently dropped.
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        return Vec::new();
    };
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut seen = std::collections::HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.is_empty() || href.starts_with("javascript:") || href.starts_with('#') {
            continue;
        }
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if !resolved.scheme().starts_with("http") {
            continue;
        }
        let absolute = resolved.to_string();
        if seen.insert(absolute.clone()) {
            links.push(absolute);
        }
    }

    links
}

/// Return every anchor in the document as a `{text, href}` pair, hrefs left
/// unresolved. Empty and script-only hrefs are skipped.
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            if href.is_empty() || href.starts_with("javascript:") {
                return None;
            }
            Some(Anchor {
                text: normalize_whitespace(&element.text().collect::<Vec<_>>().join(" ")),
                href: href.to_string(),
            })
        })
        .collect()
}

/// Text of the document's `<title>` element, if any
pub fn page_title(html: &str) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let document = Html::parse_document(html);
    let title = document
        .select(&selector)
        .next()
        .map(|element| normalize_whitespace(&element.text().collect::<Vec<_>>().join(" ")))?;
    if title.is_empty() { None } else { Some(title) }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
        <html>
          <head><title>Sea  Level Report</title></head>
          <body>
            <h1>Rising seas</h1>
            <p class="lead">Coastal cities are at risk.</p>
            <p>Ice sheets are melting.</p>
            <a href="/reports/2024">2024 report</a>
            <a href="https://other.example.org/page">external</a>
            <a href="javascript:void(0)">noise</a>
            <a href="#top">top</a>
            <a href="/reports/2024">duplicate</a>
          </body>
        </html>"##;

    #[test]
    fn test_extract_text_normalizes_whitespace() {
        let text = extract_text("<p>a\n  b</p><p>c</p>");
        assert_eq!(text, "a b c");
    }

    #[test]
    fn test_extract_text_on_malformed_html_does_not_panic() {
        let text = extract_text("<div><p>unclosed <b>tags");
        assert!(text.contains("unclosed"));
        assert!(text.contains("tags"));
    }

    #[test]
    fn test_extract_by_tag() {
        let paragraphs = extract_by_tag(PAGE, "p", None, None);
        assert_eq!(
            paragraphs,
            vec!["Coastal cities are at risk.", "Ice sheets are melting."]
        );
    }

    #[test]
    fn test_extract_by_tag_with_class() {
        let lead = extract_by_tag(PAGE, "p", Some("lead"), None);
        assert_eq!(lead, vec!["Coastal cities are at risk."]);
    }

    #[test]
    fn test_extract_by_tag_no_match_is_empty() {
        assert!(extract_by_tag(PAGE, "article", None, None).is_empty());
    }

    #[test]
    fn test_extract_by_tag_invalid_selector_is_empty() {
        assert!(extract_by_tag(PAGE, "p..", None, None).is_empty());
    }

    #[test]
    fn test_extract_links_resolves_and_dedupes() {
        let links = extract_links(PAGE, "https://example.com/news/");
        assert_eq!(
            links,
            vec![
                "https://example.com/reports/2024".to_string(),
                "https://other.example.org/page".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_links_bad_base_is_empty() {
        assert!(extract_links(PAGE, "not a url").is_empty());
    }

    #[test]
    fn test_extract_anchors_keeps_raw_hrefs() {
        let anchors = extract_anchors(PAGE);
        assert_eq!(anchors.len(), 4);
        assert_eq!(anchors[0].text, "2024 report");
        assert_eq!(anchors[0].href, "/reports/2024");
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title(PAGE).as_deref(), Some("Sea Level Report"));
        assert_eq!(page_title("<p>no title</p>"), None);
    }
}
