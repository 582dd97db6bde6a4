//! Search adapter for a fixed results-page layout.
//!
//! Result blocks are `.result` elements holding a `.result__a` title link
//! and an optional `.result__snippet`. Indirection links carrying the real
//! destination in a `uddg` query parameter are unwrapped.

use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::{form_urlencoded, Url};

use crate::app::{Result, SkiffError};
use crate::domain::SearchResult;
use crate::fetcher::FetchConfig;
use crate::resolver;

pub const MAX_RESULTS: usize = 10;

const QUERY_PLACEHOLDER: &str = "{query}";

pub struct SearchAdapter {
    search_url: String,
    fallback_search_url: String,
    result_selector: Selector,
    title_selector: Selector,
    snippet_selector: Selector,
}

impl SearchAdapter {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            search_url: config.search_url.clone(),
            fallback_search_url: config.fallback_search_url.clone(),
            result_selector: selector(".result")?,
            title_selector: selector(".result__a")?,
            snippet_selector: selector(".result__snippet")?,
        })
    }

    /// Results page URL for `query`.
    pub fn query_url(&self, query: &str) -> String {
        fill_template(&self.search_url, query)
    }

    /// Parse a results page. Never empty: with nothing parsed, one
    /// synthetic result points at the fallback search.
    pub fn parse_results(&self, body: &str, query: &str) -> Vec<SearchResult> {
        let page_url = self.query_url(query);
        let html = Html::parse_document(body);
        let mut results = Vec::new();

        for block in html.select(&self.result_selector) {
            if results.len() >= MAX_RESULTS {
                break;
            }

            let classes = block.value().attr("class").unwrap_or_default();
            if classes.contains("result--ad") {
                continue;
            }

            let Some(title_el) = block.select(&self.title_selector).next() else {
                continue;
            };
            let title = collapse(&title_el.text().collect::<String>());
            let link = title_el.value().attr("href").unwrap_or_default().trim();
            if title.is_empty() || link.is_empty() {
                continue;
            }

            let snippet = block
                .select(&self.snippet_selector)
                .next()
                .map(|el| collapse(&el.text().collect::<String>()))
                .unwrap_or_default();

            results.push(SearchResult {
                number: results.len() + 1,
                title,
                url: unwrap_redirect(&page_url, link),
                snippet,
            });
        }

        if results.is_empty() {
            warn!("No results parsed for {:?}, using fallback search", query);
            results.push(self.fallback_result(query));
        } else {
            debug!("Parsed {} search results for {:?}", results.len(), query);
        }

        results
    }

    fn fallback_result(&self, query: &str) -> SearchResult {
        SearchResult {
            number: 1,
            title: format!("Search for: {}", query),
            url: fill_template(&self.fallback_search_url, query),
            snippet: "Open this result to search the web instead".to_string(),
        }
    }
}

fn selector(raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|e| SkiffError::Parse(format!("bad selector {}: {:?}", raw, e)))
}

/// Percent-encode `query` the way HTML forms do (spaces become `+`).
pub fn encode_query(query: &str) -> String {
    form_urlencoded::byte_serialize(query.as_bytes()).collect()
}

fn fill_template(template: &str, query: &str) -> String {
    template.replace(QUERY_PLACEHOLDER, &encode_query(query))
}

/// Resolve `link` against the results page and unwrap `uddg` redirects.
fn unwrap_redirect(page_url: &str, link: &str) -> String {
    let resolved = resolver::resolve(page_url, link);
    Url::parse(&resolved)
        .ok()
        .and_then(|parsed| {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, target)| target.into_owned())
        })
        .filter(|target| !target.is_empty())
        .unwrap_or(resolved)
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> SearchAdapter {
        SearchAdapter::new(&FetchConfig::default()).unwrap()
    }

    fn block(title: &str, href: &str, snippet: &str) -> String {
        format!(
            "<div class=\"result\"><a class=\"result__a\" href=\"{}\">{}</a>\
             <a class=\"result__snippet\">{}</a></div>",
            href, title, snippet
        )
    }

    #[test]
    fn test_query_url_encodes_text() {
        assert_eq!(
            adapter().query_url("rust & tokio"),
            "https://html.duckduckgo.com/html/?q=rust+%26+tokio"
        );
    }

    #[test]
    fn test_parses_results_in_order() {
        let body = format!(
            "<body>{}{}</body>",
            block("Rust", "https://www.rust-lang.org/", "A language"),
            block("Tokio", "https://tokio.rs/", "")
        );
        let results = adapter().parse_results(&body, "rust");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].number, 1);
        assert_eq!(results[0].title, "Rust");
        assert_eq!(results[0].snippet, "A language");
        assert_eq!(results[1].number, 2);
        assert_eq!(results[1].url, "https://tokio.rs/");
    }

    #[test]
    fn test_unwraps_redirect_links() {
        let body = block(
            "Docs",
            "//duckduckgo.com/l/?uddg=https%3A%2F%2Fdocs.rs%2Fscraper&rut=abc",
            "docs",
        );
        let results = adapter().parse_results(&body, "scraper");
        assert_eq!(results[0].url, "https://docs.rs/scraper");
    }

    #[test]
    fn test_caps_at_ten_and_skips_incomplete_blocks() {
        let mut body = String::from("<div class=\"result\"><span>no title</span></div>");
        body.push_str(&block("", "https://empty.example/", ""));
        for i in 0..15 {
            body.push_str(&block(
                &format!("Result {}", i),
                &format!("https://r{}.example/", i),
                "",
            ));
        }

        let results = adapter().parse_results(&body, "many");
        assert_eq!(results.len(), MAX_RESULTS);
        assert_eq!(results[0].title, "Result 0");
        assert_eq!(results[9].number, 10);
    }

    #[test]
    fn test_zero_results_fall_back() {
        let results = adapter().parse_results("<html><body>nothing</body></html>", "rust lang");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number, 1);
        assert_eq!(results[0].title, "Search for: rust lang");
        assert_eq!(results[0].url, "https://www.google.com/search?q=rust+lang");
    }

    #[test]
    fn test_ads_are_skipped() {
        let body = format!(
            "<div class=\"result result--ad\"><a class=\"result__a\" href=\"https://ad.example/\">Ad</a></div>{}",
            block("Real", "https://real.example/", "")
        );
        let results = adapter().parse_results(&body, "x");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Real");
    }
}
