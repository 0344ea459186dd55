//! Fallback search-form detection
//!
//! When a site has no registered search template, guess its search feature
//! from the landing page: the first form carrying an input whose name or id
//! looks like a search field wins, and the keyword is submitted as a GET
//! query parameter against the form's action.

use scraper::{Html, Selector};
use url::Url;

/// Field names accepted verbatim; anything containing "search" also qualifies
const FIELD_NAMES: &[&str] = &["q", "s", "query"];

/// Find a likely search form in `html` and build a GET URL submitting
/// `keyword` through it
///
/// Returns `None` when the page has no recognizable search form or the
/// form's action cannot be resolved against `page_url`.
pub fn guess_search_url(html: &str, page_url: &str, keyword: &str) -> Option<String> {
    let page = Url::parse(page_url).ok()?;
    let form_selector = Selector::parse("form").ok()?;
    let input_selector = Selector::parse("input").ok()?;

    let document = Html::parse_document(html);

    for form in document.select(&form_selector) {
        let field = form.select(&input_selector).find_map(|input| {
            let value = input.value();
            let candidate = value.attr("name").or_else(|| value.attr("id"))?;
            if !looks_like_search_field(candidate) {
                return None;
            }
            // Submit under `name` when present; `id` alone is a weaker guess.
            Some(value.attr("name").unwrap_or(candidate).to_string())
        });
        let Some(field) = field else {
            continue;
        };

        let action = form.value().attr("action").unwrap_or("");
        let target = if action.is_empty() {
            Some(page.clone())
        } else {
            page.join(action).ok()
        };
        let Some(mut target) = target else {
            continue;
        };

        target.query_pairs_mut().append_pair(&field, keyword.trim());
        return Some(target.to_string());
    }

    None
}

fn looks_like_search_field(value: &str) -> bool {
    let value = value.to_lowercase();
    FIELD_NAMES.contains(&value.as_str()) || value.contains("search")
}
