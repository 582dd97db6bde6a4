//! Shared fixtures for unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::app::{AppContext, Result, SkiffError};
use crate::config::Config;
use crate::fetcher::{FetchedPage, PageFetcher};
use crate::store::JsonBookmarkStore;

/// Serves canned HTML by exact URL; anything else is a 404.
#[derive(Debug, Default, Clone)]
pub(crate) struct MockFetcher {
    pages: HashMap<String, String>,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        match self.pages.get(url) {
            Some(body) => Ok(FetchedPage {
                url: url.to_string(),
                status: 200,
                body: body.clone(),
                elapsed: Duration::from_millis(1),
            }),
            None => Err(SkiffError::HttpStatus {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

/// A context backed by `fetcher` with bookmarks in a temporary directory.
/// Keep the returned `TempDir` alive for the duration of the test.
pub(crate) fn test_context(fetcher: MockFetcher) -> (AppContext, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = JsonBookmarkStore::new(dir.path().join("bookmarks.json"));
    let ctx = AppContext::with_parts(Config::default(), Arc::new(fetcher), Arc::new(store)).unwrap();
    (ctx, dir)
}
