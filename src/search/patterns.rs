//! Known site-specific search URL templates
//!
//! Process-wide read-only configuration. Hosts not listed here get no
//! template; the caller falls back to form detection.

/// A search URL template registered for a host
#[derive(Debug, Clone, Copy)]
pub struct SearchPattern {
    /// Host suffix the template applies to (no `www.` prefix)
    pub host: &'static str,
    /// Template with `{base}` and `{query}` placeholders
    pub template: &'static str,
}

impl SearchPattern {
    /// Expand the template for a base URL and keyword
    ///
    /// `{base}` gets the base URL with any trailing slash trimmed; `{query}`
    /// gets the URL-encoded keyword with spaces rendered as `+`.
    pub fn render(&self, base_url: &str, keyword: &str) -> String {
        let query = urlencoding::encode(keyword.trim()).replace("%20", "+");
        self.template
            .replace("{base}", base_url.trim_end_matches('/'))
            .replace("{query}", &query)
    }
}

/// Search templates for the sites in the seed tables
pub const SEARCH_PATTERNS: &[SearchPattern] = &[
    SearchPattern { host: "ipcc.ch", template: "{base}/search?query={query}" },
    SearchPattern { host: "epa.gov", template: "{base}/search/site/{query}" },
    SearchPattern { host: "carbonbrief.org", template: "{base}/?s={query}" },
    SearchPattern { host: "iea.org", template: "{base}/search?keywords={query}" },
    SearchPattern { host: "ev-volumes.com", template: "{base}/search/?q={query}" },
    SearchPattern { host: "cleantechnica.com", template: "{base}/?s={query}" },
    SearchPattern { host: "sealevel.nasa.gov", template: "{base}/search?search_api_fulltext={query}" },
    SearchPattern { host: "climate.gov", template: "{base}/search/content/{query}" },
    SearchPattern { host: "ocean.si.edu", template: "{base}/search?edan_q={query}" },
    SearchPattern { host: "climate.nasa.gov", template: "{base}/search?q={query}" },
    SearchPattern { host: "ncei.noaa.gov", template: "{base}/search?q={query}" },
    SearchPattern {
        host: "data.giss.nasa.gov",
        template: "https://search.nasa.gov/search?query={query}&affiliate=nasa",
    },
    SearchPattern { host: "iucn.org", template: "{base}/search?key={query}" },
    SearchPattern { host: "worldwildlife.org", template: "{base}/search?query={query}" },
    SearchPattern { host: "nationalgeographic.com", template: "{base}/search?q={query}" },
];

/// Hosts that honor a `lang` query parameter on their search endpoint
const LANGUAGE_AWARE_HOSTS: &[&str] = &["ipcc.ch", "iucn.org", "iea.org", "climate.gov"];

/// Language codes the search tools accept; anything else maps to English
const LANGUAGE_CODES: &[&str] = &["ko", "en", "fr", "es", "zh", "ja"];

/// Look up the template registered for a host, if any
pub fn pattern_for(host: &str) -> Option<&'static SearchPattern> {
    let host = host.trim_start_matches("www.");
    SEARCH_PATTERNS
        .iter()
        .find(|p| host == p.host || host.ends_with(&format!(".{}", p.host)))
}

/// True when the host is known to honor a `lang` parameter
pub fn supports_language(host: &str) -> bool {
    let host = host.trim_start_matches("www.");
    LANGUAGE_AWARE_HOSTS
        .iter()
        .any(|h| host == *h || host.ends_with(&format!(".{h}")))
}

/// Clamp a caller-supplied language code to the supported set
pub fn normalize_language(code: &str) -> &'static str {
    LANGUAGE_CODES
        .iter()
        .find(|c| **c == code)
        .copied()
        .unwrap_or("en")
}
