use std::time::Duration;

use crate::domain::{Document, ExtractionMode};

pub const NEW_TAB_TITLE: &str = "New Tab";

/// Identifies the load a job was issued for.
///
/// `key` is stable for the life of a tab (ids are renumbered on close);
/// `epoch` advances with every dispatched load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabTicket {
    pub key: u64,
    pub epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub elapsed: Duration,
    pub bytes: usize,
    pub status: u16,
    pub link_count: usize,
    pub image_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabStatus {
    Idle,
    Loading { stage: String },
    Loaded(LoadStats),
    Failed { message: String },
}

/// An independent navigation context.
#[derive(Debug, Clone)]
pub struct Tab {
    id: usize,
    key: u64,
    epoch: u64,
    title: String,
    url: String,
    document: Document,
    history: Vec<String>,
    /// `None` until the first page is committed
    cursor: Option<usize>,
    mode: ExtractionMode,
    status: TabStatus,
}

impl Tab {
    pub fn new(id: usize, key: u64) -> Self {
        Self {
            id,
            key,
            epoch: 0,
            title: NEW_TAB_TITLE.to_string(),
            url: String::new(),
            document: Document::message("🌐 New Tab\n\nEnter a URL or search query to start browsing"),
            history: Vec::new(),
            cursor: None,
            mode: ExtractionMode::Full,
            status: TabStatus::Idle,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    pub fn reader_mode(&self) -> bool {
        self.mode.is_reader()
    }

    pub fn status(&self) -> &TabStatus {
        &self.status
    }

    /// `history[cursor]`, once a page has been committed.
    pub fn current_url(&self) -> Option<&str> {
        self.cursor
            .and_then(|c| self.history.get(c))
            .map(String::as_str)
    }

    /// Commit `url` as the newest entry, discarding any forward branch.
    pub fn navigate_to(&mut self, url: &str) {
        if let Some(cursor) = self.cursor {
            self.history.truncate(cursor + 1);
        }
        self.history.push(url.to_string());
        self.cursor = Some(self.history.len() - 1);
        self.url = url.to_string();
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.history.len())
    }

    pub fn go_back(&mut self) -> bool {
        match self.cursor {
            Some(c) if c > 0 => self.move_cursor(c - 1),
            _ => false,
        }
    }

    pub fn go_forward(&mut self) -> bool {
        match self.cursor {
            Some(c) if c + 1 < self.history.len() => self.move_cursor(c + 1),
            _ => false,
        }
    }

    /// Move the cursor to a history index without touching the entries.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.history.len() {
            self.move_cursor(index)
        } else {
            false
        }
    }

    fn move_cursor(&mut self, index: usize) -> bool {
        self.cursor = Some(index);
        self.url = self.history[index].clone();
        true
    }

    pub fn ticket(&self) -> TabTicket {
        TabTicket {
            key: self.key,
            epoch: self.epoch,
        }
    }

    /// Start a new load in `mode`; earlier tickets become stale.
    pub(crate) fn begin_load(&mut self, mode: ExtractionMode, stage: &str) -> TabTicket {
        self.epoch += 1;
        self.mode = mode;
        self.status = TabStatus::Loading {
            stage: stage.to_string(),
        };
        self.document = Document::message(format!("🔄 {}", stage));
        self.ticket()
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    /// Change the mode used by the next load without starting one.
    pub(crate) fn set_mode(&mut self, mode: ExtractionMode) {
        self.mode = mode;
    }

    pub(crate) fn finish_load(&mut self, document: Document, stats: LoadStats) {
        self.title = document.title.clone().unwrap_or_else(|| self.url.clone());
        self.document = document;
        self.status = TabStatus::Loaded(stats);
    }

    pub(crate) fn fail_load(&mut self, message: String) {
        self.document = Document::message(format!(
            "❌ Error: {}\n\nPress Enter to try another URL or search",
            message
        ));
        self.status = TabStatus::Failed { message };
    }

    /// Replace the document with one that is not backed by a fetch.
    /// A tab with a committed page keeps that page's title and URL.
    pub(crate) fn show_document(&mut self, title: &str, url: &str, document: Document) {
        if self.cursor.is_none() {
            self.title = title.to_string();
            self.url = url.to_string();
        }
        self.document = document;
        self.status = TabStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab_with(urls: &[&str]) -> Tab {
        let mut tab = Tab::new(0, 1);
        for url in urls {
            tab.navigate_to(url);
        }
        tab
    }

    #[test]
    fn test_new_tab_has_no_position() {
        let tab = Tab::new(0, 1);
        assert_eq!(tab.cursor(), None);
        assert!(tab.current_url().is_none());
        assert!(!tab.can_go_back());
        assert!(!tab.can_go_forward());
    }

    #[test]
    fn test_back_moves_cursor_only() {
        let mut tab = tab_with(&["https://a.example/", "https://b.example/"]);
        assert_eq!(tab.cursor(), Some(1));

        assert!(tab.go_back());
        assert_eq!(tab.cursor(), Some(0));
        assert_eq!(tab.history().len(), 2);
        assert_eq!(tab.url(), "https://a.example/");
        assert_eq!(tab.current_url(), Some("https://a.example/"));
    }

    #[test]
    fn test_navigate_after_back_discards_forward_branch() {
        let mut tab = tab_with(&["https://a.example/", "https://b.example/", "https://c.example/"]);
        tab.go_back();
        tab.go_back();
        tab.navigate_to("https://d.example/");

        assert_eq!(tab.history(), &["https://a.example/", "https://d.example/"]);
        assert_eq!(tab.cursor(), Some(1));
        assert!(!tab.can_go_forward());
    }

    #[test]
    fn test_out_of_range_moves_are_noops() {
        let mut tab = tab_with(&["https://a.example/"]);
        assert!(!tab.go_back());
        assert!(!tab.go_forward());
        assert_eq!(tab.cursor(), Some(0));

        let mut empty = Tab::new(0, 1);
        assert!(!empty.go_back());
        assert!(!empty.jump_to(0));
    }

    #[test]
    fn test_forward_after_back() {
        let mut tab = tab_with(&["https://a.example/", "https://b.example/"]);
        tab.go_back();
        assert!(tab.go_forward());
        assert_eq!(tab.url(), "https://b.example/");
    }

    #[test]
    fn test_jump_keeps_history() {
        let mut tab = tab_with(&["https://a.example/", "https://b.example/", "https://c.example/"]);
        assert!(tab.jump_to(0));
        assert_eq!(tab.history().len(), 3);
        assert_eq!(tab.url(), "https://a.example/");
        assert!(!tab.jump_to(3));
    }

    #[test]
    fn test_begin_load_advances_epoch() {
        let mut tab = tab_with(&["https://a.example/"]);
        let first = tab.begin_load(ExtractionMode::Full, "Fetching page...");
        let second = tab.begin_load(ExtractionMode::Reader, "Activating reader mode...");

        assert_eq!(first.key, second.key);
        assert_eq!(second.epoch, first.epoch + 1);
        assert!(tab.reader_mode());
        assert!(matches!(tab.status(), TabStatus::Loading { .. }));
    }

    #[test]
    fn test_finish_load_uses_title_or_url() {
        let mut tab = tab_with(&["https://a.example/"]);
        let stats = LoadStats {
            elapsed: Duration::from_millis(5),
            bytes: 10,
            status: 200,
            link_count: 0,
            image_count: 0,
        };

        tab.finish_load(Document::message("body"), stats);
        assert_eq!(tab.title(), "https://a.example/");

        let mut titled = Document::message("body");
        titled.title = Some("A Page".into());
        tab.finish_load(titled, stats);
        assert_eq!(tab.title(), "A Page");
        assert_eq!(tab.status(), &TabStatus::Loaded(stats));
    }
}
