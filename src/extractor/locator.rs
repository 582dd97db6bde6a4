//! Main-content location: which subtree of a page holds the article.

use scraper::{ElementRef, Html, Selector};

use super::filters::collapse_whitespace;

const CANDIDATE_TAGS: [&str; 4] = ["div", "section", "main", "article"];
const MIN_CANDIDATE_CHARS: usize = 100;
const MAX_LINK_RATIO: f64 = 0.3;

/// Locate the main content of `doc`.
///
/// Selectors are tried in order and the first one with a non-empty match
/// wins. Otherwise the densest prose container is chosen, and failing
/// that the whole `body`.
pub fn locate_main<'a>(doc: &'a Html, selectors: &[Selector]) -> ElementRef<'a> {
    if let Some(found) = first_non_empty_match(doc, selectors) {
        return found;
    }

    if let Some((candidate, _)) = best_density_candidate(doc) {
        return candidate;
    }

    body_of(doc)
}

/// Locate the reader-mode root: the first element matching any selector
/// in order, else `body`.
pub fn locate_reader_root<'a>(doc: &'a Html, selectors: &[Selector]) -> ElementRef<'a> {
    selectors
        .iter()
        .find_map(|selector| doc.select(selector).next())
        .unwrap_or_else(|| body_of(doc))
}

/// The document's `body` element, or the root element when there is none.
pub fn body_of(doc: &Html) -> ElementRef<'_> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "body")
        .unwrap_or_else(|| doc.root_element())
}

fn first_non_empty_match<'a>(doc: &'a Html, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|selector| {
        doc.select(selector)
            .find(|el| el.text().any(|t| !t.trim().is_empty()))
    })
}

/// Score every block container and keep the best one.
///
/// Candidates under 100 characters, or with more than 0.3 anchors per word,
/// are rejected. Score is `density * word_count`; ties keep the first seen.
fn best_density_candidate(doc: &Html) -> Option<(ElementRef<'_>, f64)> {
    let mut best: Option<(ElementRef<'_>, f64)> = None;

    for el in doc.root_element().descendants().filter_map(ElementRef::wrap) {
        if !CANDIDATE_TAGS.contains(&el.value().name()) {
            continue;
        }

        let Some(score) = density_score(el) else {
            continue;
        };

        let current = best.as_ref().map_or(0.0, |(_, s)| *s);
        if score > current {
            best = Some((el, score));
        }
    }

    best
}

fn density_score(el: ElementRef<'_>) -> Option<f64> {
    let raw: String = el.text().collect();
    if raw.trim().chars().count() < MIN_CANDIDATE_CHARS {
        return None;
    }

    let words = raw.split_whitespace().count();
    if words == 0 {
        return None;
    }

    let anchors = el
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|d| d.value().name() == "a")
        .count();
    if anchors as f64 / words as f64 > MAX_LINK_RATIO {
        return None;
    }

    let density = collapse_whitespace(&raw).chars().count() as f64 / raw.chars().count() as f64;
    Some(density * words as f64)
}
