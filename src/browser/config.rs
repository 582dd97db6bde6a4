use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::ExtractionMode;

/// Feature switches and limits for the browsing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Page opened at startup instead of the help page
    pub start_page: Option<String>,

    /// Load pages in reader mode by default (default: false)
    pub reader_mode: bool,

    pub enable_bookmarks: bool,
    pub enable_history: bool,
    pub enable_search: bool,
    pub enable_tabs: bool,

    /// Maximum number of open tabs (default: 10)
    pub max_tabs: usize,

    /// Bookmarks file; defaults to the user data directory
    pub bookmarks_file: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            start_page: None,
            reader_mode: false,
            enable_bookmarks: true,
            enable_history: true,
            enable_search: true,
            enable_tabs: true,
            max_tabs: 10,
            bookmarks_file: None,
        }
    }
}

impl BrowserConfig {
    /// Extraction mode for freshly navigated pages
    pub fn default_mode(&self) -> ExtractionMode {
        if self.reader_mode {
            ExtractionMode::Reader
        } else {
            ExtractionMode::Full
        }
    }
}
