//! Evidence extraction from fetched HTML
//!
//! Splits a page into block-level paragraphs and scores each one by lexical
//! overlap with a free-text query. Deliberately simple: no stemming, no
//! weighting, no ranking model.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// Block-level elements treated as paragraph boundaries
const PARAGRAPH_SELECTOR: &str = "p, li, blockquote, h1, h2, h3, h4, h5, h6";

/// A text span paired with its relevance score for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceParagraph {
    /// Paragraph text, whitespace-normalized
    pub text: String,
    /// Number of query terms the paragraph contains
    pub score: usize,
}

/// Score every paragraph in `html` against `query` and return the matches
///
/// The query is split on whitespace into lowercase terms; a paragraph's
/// score is the number of terms it contains as substrings. Paragraphs with a
/// zero score are dropped. The result is ordered by descending score, with
/// ties kept in document order; identical paragraph text appearing twice is
/// returned twice.
pub fn extract_evidence(html: &str, query: &str) -> Vec<EvidenceParagraph> {
    let terms: Vec<String> = query.split_whitespace().map(|t| t.to_lowercase()).collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let Ok(selector) = Selector::parse(PARAGRAPH_SELECTOR) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut paragraphs: Vec<EvidenceParagraph> = document
        .select(&selector)
        .filter_map(|element| {
            let text = element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            if text.is_empty() {
                return None;
            }

            let haystack = text.to_lowercase();
            let score = terms
                .iter()
                .filter(|term| haystack.contains(term.as_str()))
                .count();

            (score > 0).then_some(EvidenceParagraph { text, score })
        })
        .collect();

    // Stable sort: equal scores keep document order.
    paragraphs.sort_by(|a, b| b.score.cmp(&a.score));
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_overlap_ranks_first() {
        let html = "<p>해수면 상승이 가속화되고 있다</p><p>기온 상승과 무관</p>";
        let paragraphs = extract_evidence(html, "해수면 상승");

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "해수면 상승이 가속화되고 있다");
        assert_eq!(paragraphs[0].score, 2);
        assert_eq!(paragraphs[1].text, "기온 상승과 무관");
        assert_eq!(paragraphs[1].score, 1);
    }

    #[test]
    fn test_no_match_is_empty() {
        let html = "<p>Nothing about the topic.</p>";
        assert!(extract_evidence(html, "glacier melt").is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let html = "<p>Sea Level projections for 2100.</p>";
        let paragraphs = extract_evidence(html, "sea level");
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].score, 2);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let html = "<p>warming in the arctic</p><p>warming in the tropics</p>";
        let paragraphs = extract_evidence(html, "warming");

        assert_eq!(paragraphs[0].text, "warming in the arctic");
        assert_eq!(paragraphs[1].text, "warming in the tropics");
    }

    #[test]
    fn test_duplicate_paragraphs_are_kept() {
        let html = "<p>ocean heat content</p><p>ocean heat content</p>";
        let paragraphs = extract_evidence(html, "ocean");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, paragraphs[1].text);
    }

    #[test]
    fn test_headings_and_list_items_count_as_paragraphs() {
        let html = "<h2>Emissions by sector</h2><ul><li>transport emissions</li></ul>";
        let paragraphs = extract_evidence(html, "emissions");
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let html = "<p>unclosed paragraph <li>stray item";
        let paragraphs = extract_evidence(html, "paragraph");
        assert_eq!(paragraphs.len(), 1);
    }

    #[test]
    fn test_empty_query_is_empty() {
        assert!(extract_evidence("<p>text</p>", "   ").is_empty());
    }
}
