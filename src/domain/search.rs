use serde::Serialize;

/// One entry of a search results page, numbered from 1 in result order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub number: usize,
    pub title: String,
    pub url: String,
    pub snippet: String,
}
