//! The browsing session: every tab, the bookmark set, and the current view.
//!
//! The session is owned by one task. Operations that need the network
//! return a [`FetchJob`] for the caller to dispatch; the finished work
//! comes back as a [`JobOutcome`] and is merged in with [`Session::apply`].

use tracing::{debug, info};

use crate::app::{Result, SkiffError};
use crate::browser::command::Command;
use crate::browser::config::BrowserConfig;
use crate::browser::tab::{Tab, TabTicket};
use crate::browser::views::{self, HELP_URL};
use crate::domain::{Bookmark, BookmarkSet, Image, MediaType, SearchResult};
use crate::jobs::{FetchJob, JobOrigin, JobOutcome};
use crate::resolver;

/// Which numbered list the content pane currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Content,
    History,
    Bookmarks,
    /// The image list, or the detail of the focused image
    Images,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkOutcome {
    Added(Bookmark),
    AlreadyPresent,
    /// The active tab has not committed a page yet
    NoPage,
}

/// What applying an outcome changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Content { tab_id: usize },
    Search,
    ViewerOpened(String),
    Error { tab_id: Option<usize>, message: String },
    /// The outcome belonged to a closed tab or a superseded load
    Stale,
}

pub struct Session {
    config: BrowserConfig,
    tabs: Vec<Tab>,
    active: usize,
    next_key: u64,
    bookmarks: BookmarkSet,
    search_query: String,
    search_results: Vec<SearchResult>,
    search_ticket: u64,
    view_mode: ViewMode,
    focused_image: Option<Image>,
}

impl Session {
    /// A session with a single tab showing the help page.
    pub fn new(config: BrowserConfig, bookmarks: BookmarkSet) -> Self {
        let mut session = Self {
            config,
            tabs: Vec::new(),
            active: 0,
            next_key: 0,
            bookmarks,
            search_query: String::new(),
            search_results: Vec::new(),
            search_ticket: 0,
            view_mode: ViewMode::Content,
            focused_image: None,
        };

        let mut tab = session.spawn_tab();
        tab.show_document("Help", HELP_URL, views::help_document());
        session.tabs.push(tab);
        session
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active]
    }

    fn active_tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn bookmarks(&self) -> &BookmarkSet {
        &self.bookmarks
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.search_results
    }

    pub fn focused_image(&self) -> Option<&Image> {
        self.focused_image.as_ref()
    }

    fn spawn_tab(&mut self) -> Tab {
        self.next_key += 1;
        let mut tab = Tab::new(self.tabs.len(), self.next_key);
        tab.set_mode(self.config.default_mode());
        tab
    }

    fn show_content(&mut self) {
        self.view_mode = ViewMode::Content;
        self.focused_image = None;
    }

    /// Parse and run a line typed into the input bar.
    pub fn submit(&mut self, input: &str) -> Result<Option<FetchJob>> {
        self.run_command(Command::parse(input))
    }

    pub fn run_command(&mut self, command: Command) -> Result<Option<FetchJob>> {
        match command {
            Command::Empty => Ok(None),
            Command::Help => {
                self.show_help();
                Ok(None)
            }
            Command::History => self.show_view(ViewMode::History).map(|_| None),
            Command::Bookmarks => self.show_view(ViewMode::Bookmarks).map(|_| None),
            Command::Images => self.show_view(ViewMode::Images).map(|_| None),
            Command::Reader => Ok(self.toggle_reader_mode()),
            Command::Image(number) => self.focus_image(number).map(|_| None),
            Command::Number(number) => self.select_numbered(number),
            Command::Location(input) => self.navigate(&input),
            Command::Search(query) => self.search(&query),
        }
    }

    /// Navigate the active tab to what the user typed.
    ///
    /// Input that cannot be normalized to an http(s) URL fails with
    /// `InvalidUrl` and no job is produced.
    pub fn navigate(&mut self, input: &str) -> Result<Option<FetchJob>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let current = self.active_tab().url().to_string();
        let url = resolver::normalize_user_input(input, &current)
            .ok_or_else(|| SkiffError::InvalidUrl(input.to_string()))?;
        self.open_url(&url)
    }

    /// Commit an already-absolute URL to the active tab and start loading it.
    /// Image URLs show the image detail instead. Anything that is not
    /// http(s) fails with `InvalidUrl` before history is touched.
    fn open_url(&mut self, url: &str) -> Result<Option<FetchJob>> {
        if !resolver::is_navigable(url) {
            return Err(SkiffError::InvalidUrl(url.to_string()));
        }
        if resolver::is_image_url(url) {
            debug!("Showing image detail for {}", url);
            self.focus(standalone_image(1, url));
            return Ok(None);
        }

        self.show_content();
        let tab = self.active_tab_mut();
        tab.navigate_to(url);
        let mode = tab.mode();
        let ticket = tab.begin_load(mode, "Fetching page...");
        Ok(Some(FetchJob::Page {
            ticket,
            url: url.to_string(),
            mode,
        }))
    }

    /// Load `history[cursor]` again in the tab's current mode.
    fn load_current(&mut self, stage: &str) -> Option<FetchJob> {
        self.show_content();
        let tab = self.active_tab_mut();
        let url = tab.current_url()?.to_string();
        let mode = tab.mode();
        let ticket = tab.begin_load(mode, stage);
        Some(FetchJob::Page { ticket, url, mode })
    }

    pub fn reload(&mut self) -> Option<FetchJob> {
        self.load_current("Reloading...")
    }

    pub fn go_back(&mut self) -> Option<FetchJob> {
        if !self.active_tab_mut().go_back() {
            return None;
        }
        self.load_current("Going back...")
    }

    pub fn go_forward(&mut self) -> Option<FetchJob> {
        if !self.active_tab_mut().go_forward() {
            return None;
        }
        self.load_current("Going forward...")
    }

    /// Re-extract the current page in the other mode. History is untouched.
    pub fn toggle_reader_mode(&mut self) -> Option<FetchJob> {
        self.show_content();
        let tab = self.active_tab_mut();
        let mode = tab.mode().toggled();
        let Some(url) = tab.current_url().map(str::to_string) else {
            tab.set_mode(mode);
            return None;
        };

        let stage = if mode.is_reader() {
            "Activating reader mode..."
        } else {
            "Switching to full page..."
        };
        let ticket = tab.begin_load(mode, stage);
        Some(FetchJob::Page { ticket, url, mode })
    }

    /// Open a tab, optionally navigating it straight away. The new tab
    /// becomes active.
    pub fn new_tab(&mut self, input: Option<&str>) -> Result<Option<FetchJob>> {
        if !self.config.enable_tabs {
            return Err(SkiffError::FeatureDisabled("Tabs"));
        }
        if self.tabs.len() >= self.config.max_tabs {
            return Err(SkiffError::TabLimit(self.config.max_tabs));
        }

        let target = match input.map(str::trim).filter(|s| !s.is_empty()) {
            Some(input) => Some(
                resolver::normalize_user_input(input, "")
                    .ok_or_else(|| SkiffError::InvalidUrl(input.to_string()))?,
            ),
            None => None,
        };

        let tab = self.spawn_tab();
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
        self.show_content();
        info!("Opened tab {} of {}", self.active + 1, self.tabs.len());

        match target {
            Some(url) => self.open_url(&url),
            None => Ok(None),
        }
    }

    /// Close tab `id`. Refused when it is the last tab or does not exist.
    pub fn close_tab(&mut self, id: usize) -> bool {
        if self.tabs.len() <= 1 || id >= self.tabs.len() {
            return false;
        }

        self.tabs.remove(id);
        for (index, tab) in self.tabs.iter_mut().enumerate() {
            tab.set_id(index);
        }

        let last = self.tabs.len() - 1;
        if self.active > last {
            self.active = last;
        } else if self.active >= id {
            self.active = self.active.saturating_sub(1);
        }

        self.show_content();
        true
    }

    pub fn close_active_tab(&mut self) -> bool {
        self.close_tab(self.active)
    }

    /// Make tab `id` active. Nothing is re-extracted.
    pub fn switch_tab(&mut self, id: usize) -> bool {
        if id >= self.tabs.len() {
            return false;
        }
        self.active = id;
        self.show_content();
        true
    }

    pub fn next_tab(&mut self) -> bool {
        if self.tabs.len() < 2 {
            return false;
        }
        self.switch_tab((self.active + 1) % self.tabs.len())
    }

    pub fn prev_tab(&mut self) -> bool {
        if self.tabs.len() < 2 {
            return false;
        }
        let len = self.tabs.len();
        self.switch_tab((self.active + len - 1) % len)
    }

    /// Bookmark the active tab's page under its title.
    pub fn bookmark_current(&mut self) -> Result<BookmarkOutcome> {
        if !self.config.enable_bookmarks {
            return Err(SkiffError::FeatureDisabled("Bookmarks"));
        }

        let tab = self.active_tab();
        let Some(url) = tab.current_url() else {
            return Ok(BookmarkOutcome::NoPage);
        };

        let bookmark = Bookmark::new(tab.title(), url);
        if self.bookmarks.insert(bookmark.clone()) {
            info!("Bookmarked {}", bookmark.url);
            Ok(BookmarkOutcome::Added(bookmark))
        } else {
            Ok(BookmarkOutcome::AlreadyPresent)
        }
    }

    /// Start a search. Results from any earlier search become stale.
    pub fn search(&mut self, query: &str) -> Result<Option<FetchJob>> {
        if !self.config.enable_search {
            return Err(SkiffError::FeatureDisabled("Search"));
        }
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        self.search_ticket += 1;
        self.search_query = query.to_string();
        self.search_results.clear();
        self.view_mode = ViewMode::Search;
        self.focused_image = None;

        Ok(Some(FetchJob::Search {
            ticket: self.search_ticket,
            query: query.to_string(),
        }))
    }

    /// Act on entry `number` of whichever numbered list is showing.
    pub fn select_numbered(&mut self, number: usize) -> Result<Option<FetchJob>> {
        match self.view_mode {
            ViewMode::Content => {
                let document = self.active_tab().document();
                let link = document
                    .link(number)
                    .ok_or(SkiffError::NoSuchEntry {
                        number,
                        available: document.links.len(),
                    })?
                    .clone();

                if link.is_image_target {
                    let image = document
                        .images
                        .iter()
                        .find(|image| image.resolved_url == link.resolved_url)
                        .cloned()
                        .unwrap_or_else(|| standalone_image(link.number, &link.resolved_url));
                    self.focus(image);
                    return Ok(None);
                }
                self.open_url(&link.resolved_url)
            }
            ViewMode::History => {
                let available = self.active_tab().history().len();
                if number == 0 || !self.active_tab_mut().jump_to(number - 1) {
                    return Err(SkiffError::NoSuchEntry { number, available });
                }
                Ok(self.load_current("Loading from history..."))
            }
            ViewMode::Bookmarks => {
                let url = self
                    .bookmarks
                    .get(number)
                    .map(|b| b.url.clone())
                    .ok_or(SkiffError::NoSuchEntry {
                        number,
                        available: self.bookmarks.len(),
                    })?;
                self.open_url(&url)
            }
            ViewMode::Images => self.focus_image(number).map(|_| None),
            ViewMode::Search => {
                let url = number
                    .checked_sub(1)
                    .and_then(|i| self.search_results.get(i))
                    .map(|r| r.url.clone())
                    .ok_or(SkiffError::NoSuchEntry {
                        number,
                        available: self.search_results.len(),
                    })?;
                self.open_url(&url)
            }
        }
    }

    pub fn show_view(&mut self, mode: ViewMode) -> Result<()> {
        match mode {
            ViewMode::History if !self.config.enable_history => {
                return Err(SkiffError::FeatureDisabled("History"));
            }
            ViewMode::Bookmarks if !self.config.enable_bookmarks => {
                return Err(SkiffError::FeatureDisabled("Bookmarks"));
            }
            ViewMode::Search if !self.config.enable_search => {
                return Err(SkiffError::FeatureDisabled("Search"));
            }
            _ => {}
        }

        self.view_mode = mode;
        self.focused_image = None;
        Ok(())
    }

    pub fn show_help(&mut self) {
        self.show_content();
        let tab = self.active_tab_mut();
        tab.show_document("Help", HELP_URL, views::help_document());
    }

    /// Show the detail of image `number` from the active document.
    pub fn focus_image(&mut self, number: usize) -> Result<()> {
        let document = self.active_tab().document();
        let image = document
            .image(number)
            .cloned()
            .ok_or(SkiffError::NoSuchEntry {
                number,
                available: document.images.len(),
            })?;
        self.focus(image);
        Ok(())
    }

    fn focus(&mut self, image: Image) {
        self.view_mode = ViewMode::Images;
        self.focused_image = Some(image);
    }

    /// Leave any listing or image detail and return to the page.
    pub fn escape(&mut self) {
        self.show_content();
    }

    pub fn open_focused_image(&self) -> Option<FetchJob> {
        self.focused_image.as_ref().map(|image| FetchJob::OpenImage {
            url: image.resolved_url.clone(),
        })
    }

    /// Navigate to the page the focused image links to.
    pub fn follow_focused_image_link(&mut self) -> Result<Option<FetchJob>> {
        let Some(link) = self
            .focused_image
            .as_ref()
            .filter(|image| image.is_linked)
            .and_then(|image| image.link_url.clone())
        else {
            return Ok(None);
        };
        let job = self.open_url(&link)?;
        if job.is_some() {
            self.focused_image = None;
        }
        Ok(job)
    }

    /// Merge a finished job into the session.
    ///
    /// Page outcomes are applied only to the tab and load they were issued
    /// for; anything else is dropped as stale.
    pub fn apply(&mut self, outcome: JobOutcome) -> Applied {
        match outcome {
            JobOutcome::ContentReady {
                ticket,
                url,
                document,
                stats,
            } => match self.live_tab_mut(ticket) {
                Some(tab) => {
                    tab.finish_load(document, stats);
                    Applied::Content { tab_id: tab.id() }
                }
                None => {
                    debug!("Discarding stale content for {}", url);
                    Applied::Stale
                }
            },
            JobOutcome::SearchReady {
                ticket,
                query,
                results,
            } => {
                if ticket != self.search_ticket {
                    debug!("Discarding stale results for {:?}", query);
                    return Applied::Stale;
                }
                self.search_results = results;
                Applied::Search
            }
            JobOutcome::ViewerOpened { program } => Applied::ViewerOpened(program),
            JobOutcome::Failed { origin, error } => {
                let message = error.to_string();
                match origin {
                    JobOrigin::Tab(ticket) => match self.live_tab_mut(ticket) {
                        Some(tab) => {
                            tab.fail_load(message.clone());
                            Applied::Error {
                                tab_id: Some(tab.id()),
                                message,
                            }
                        }
                        None => {
                            debug!("Discarding stale failure: {}", message);
                            Applied::Stale
                        }
                    },
                    JobOrigin::Search(ticket) if ticket != self.search_ticket => {
                        debug!("Discarding stale search failure: {}", message);
                        Applied::Stale
                    }
                    JobOrigin::Search(_) | JobOrigin::Viewer => Applied::Error {
                        tab_id: None,
                        message,
                    },
                }
            }
        }
    }

    fn live_tab_mut(&mut self, ticket: TabTicket) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.ticket() == ticket)
    }

    /// Markdown for the content pane in the current view.
    pub fn view_body(&self) -> String {
        let tab = self.active_tab();
        match self.view_mode {
            ViewMode::Content => tab.document().body.clone(),
            ViewMode::History => views::history(tab.history(), tab.cursor()),
            ViewMode::Bookmarks => views::bookmarks(self.bookmarks.as_slice()),
            ViewMode::Images => match &self.focused_image {
                Some(image) => views::image_detail(image),
                None => views::images(&tab.document().images),
            },
            ViewMode::Search => views::search_results(&self.search_query, &self.search_results),
        }
    }
}

fn standalone_image(number: usize, url: &str) -> Image {
    Image {
        number,
        resolved_url: url.to_string(),
        alt_text: String::new(),
        media_type: MediaType::from_url(url),
        is_linked: false,
        link_url: None,
    }
}
