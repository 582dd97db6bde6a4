//! Content extraction engine.
//!
//! Turns a parsed HTML page into a [`Document`]: body text plus ordered,
//! numbered links and images.
//!
//! # Modes
//!
//! ```text
//! Full:   locate main content → prose blocks ─┬─ numbered link index
//!                                             └─ images section
//! Reader: reader root → strip boilerplate → inline "[n]" transcript + images
//! ```
//!
//! `scraper::Html` is not `Send`, so parsing and extraction always happen
//! together inside one synchronous call.

mod config;
mod filters;
mod full;
mod locator;
mod reader;

pub use config::ExtractionConfig;
pub use filters::{is_navigation_text, should_include_image, should_include_link};
pub use locator::locate_main;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::domain::{Document, ExtractionMode, Image, Link};

/// Raw output of one extraction pass, before it is wrapped in a `Document`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Extraction {
    pub body: String,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
}

/// Compiled selectors for both extraction modes.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    content_selectors: Vec<Selector>,
    reader_selectors: Vec<Selector>,
    remove_selectors: Vec<Selector>,
}

impl ContentExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            content_selectors: compile_selectors(&config.content_selectors),
            reader_selectors: compile_selectors(&config.reader_selectors),
            remove_selectors: compile_selectors(&config.remove_selectors),
        }
    }

    /// Parse `body` and extract it in one step.
    pub fn extract_page(&self, body: &str, base_url: &str, mode: ExtractionMode) -> Document {
        let html = Html::parse_document(body);
        self.extract(&html, base_url, mode)
    }

    pub fn extract(&self, html: &Html, base_url: &str, mode: ExtractionMode) -> Document {
        let extraction = match mode {
            ExtractionMode::Full => {
                let root = locate_main(html, &self.content_selectors);
                debug!("Full extraction rooted at <{}>", root.value().name());
                full::extract_full(root, base_url)
            }
            ExtractionMode::Reader => reader::extract_reader(
                html,
                base_url,
                &self.reader_selectors,
                &self.remove_selectors,
            ),
        };

        debug!(
            "Extracted {} links and {} images from {}",
            extraction.links.len(),
            extraction.images.len(),
            base_url
        );

        Document {
            title: page_title(html),
            body: extraction.body,
            links: extraction.links,
            images: extraction.images,
            mode,
        }
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

fn compile_selectors(raw: &[String]) -> Vec<Selector> {
    raw.iter()
        .filter_map(|s| match Selector::parse(s) {
            Ok(selector) => Some(selector),
            Err(e) => {
                warn!("Skipping invalid selector {:?}: {:?}", s, e);
                None
            }
        })
        .collect()
}

/// Text of the first `<title>`, whitespace-collapsed.
fn page_title(html: &Html) -> Option<String> {
    html.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "title")
        .map(|el| filters::collapse_whitespace(&el.text().collect::<String>()))
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<h1>Title</h1><p>Read <a href=\"/x\">more</a> here.</p>";
    const BASE: &str = "https://site.example/page";

    #[test]
    fn test_full_and_reader_on_same_page() {
        let extractor = ContentExtractor::default();

        let full = extractor.extract_page(PAGE, BASE, ExtractionMode::Full);
        assert_eq!(full.mode, ExtractionMode::Full);
        assert!(full.body.contains("# Title"));
        assert!(full.body.contains("Read more here."));
        assert!(!full.body.contains("[1]"));

        let reader = extractor.extract_page(PAGE, BASE, ExtractionMode::Reader);
        assert_eq!(reader.mode, ExtractionMode::Reader);
        assert!(reader.body.contains("Read more [1] here."));

        assert_eq!(full.links[0].resolved_url, reader.links[0].resolved_url);
    }

    #[test]
    fn test_title_is_captured() {
        let extractor = ContentExtractor::default();
        let doc = extractor.extract_page(
            "<html><head><title>  The\n Page </title></head><body><p>x</p></body></html>",
            BASE,
            ExtractionMode::Full,
        );
        assert_eq!(doc.title.as_deref(), Some("The Page"));

        let untitled = extractor.extract_page(PAGE, BASE, ExtractionMode::Full);
        assert_eq!(untitled.title, None);
    }

    #[test]
    fn test_invalid_selectors_are_skipped() {
        let config = ExtractionConfig {
            content_selectors: vec!["[[[".to_string(), "#story".to_string()],
            ..Default::default()
        };
        let extractor = ContentExtractor::new(&config);
        assert_eq!(extractor.content_selectors.len(), 1);

        let doc = extractor.extract_page(
            "<div id=\"other\"><p>Elsewhere</p></div><div id=\"story\"><p>Chosen</p></div>",
            BASE,
            ExtractionMode::Full,
        );
        assert_eq!(doc.body, "Chosen\n\n");
    }

    #[test]
    fn test_full_mode_uses_located_subtree() {
        let extractor = ContentExtractor::default();
        let doc = extractor.extract_page(
            concat!(
                "<div class=\"menu\"><a href=\"/elsewhere\">elsewhere</a></div>",
                "<article><p>Inside <a href=\"/in\">in</a></p></article>"
            ),
            BASE,
            ExtractionMode::Full,
        );

        assert_eq!(doc.links.len(), 1);
        assert_eq!(doc.links[0].resolved_url, "https://site.example/in");
        assert_eq!(doc.body, "Inside in\n\n");
    }
}
