use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::extractor::ContentExtractor;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::PageFetcher;
use crate::search::SearchAdapter;
use crate::store::{BookmarkStore, JsonBookmarkStore};
use crate::viewer::ImageViewer;

/// The collaborators a session talks to, shared with running jobs.
pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn PageFetcher + Send + Sync>,
    pub extractor: ContentExtractor,
    pub search: SearchAdapter,
    pub viewer: ImageViewer,
    pub bookmarks: Arc<dyn BookmarkStore + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let bookmarks_path = match &config.browser.bookmarks_file {
            Some(path) => path.clone(),
            None => JsonBookmarkStore::default_path()?,
        };

        let fetcher: Arc<dyn PageFetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetch)?);
        let bookmarks: Arc<dyn BookmarkStore + Send + Sync> =
            Arc::new(JsonBookmarkStore::new(bookmarks_path));

        Self::with_parts(config, fetcher, bookmarks)
    }

    /// Build a context around an existing fetcher and bookmark store.
    pub fn with_parts(
        config: Config,
        fetcher: Arc<dyn PageFetcher + Send + Sync>,
        bookmarks: Arc<dyn BookmarkStore + Send + Sync>,
    ) -> Result<Self> {
        let extractor = ContentExtractor::new(&config.extraction);
        let search = SearchAdapter::new(&config.fetch)?;
        let viewer = ImageViewer::new(&config.viewer);

        Ok(Self {
            config,
            fetcher,
            extractor,
            search,
            viewer,
            bookmarks,
        })
    }
}
