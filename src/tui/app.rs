use std::mem;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::browser::{Applied, BookmarkOutcome, Session, ViewMode};
use crate::config::KeybindingConfig;
use crate::jobs::{FetchJob, JobOutcome};
use crate::tui::event::Action;

pub const PAGE_SIZE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browsing,
    Editing,
}

/// Work a key press asks the event loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch(FetchJob),
    SaveBookmarks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// UI state that lives outside the session: the input line, scrolling and
/// the transient status message.
pub struct TuiApp {
    pub input: String,
    pub input_mode: InputMode,
    pub scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<StatusMessage>,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            input_mode: InputMode::Browsing,
            scroll: 0,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn handle_key(
        &mut self,
        session: &mut Session,
        keys: &KeybindingConfig,
        key: KeyEvent,
    ) -> Option<Effect> {
        if let Some(id) = alt_digit(&key) {
            if session.switch_tab(id) {
                self.scroll = 0;
            }
            return None;
        }

        match self.input_mode {
            InputMode::Editing => self.handle_editing_key(session, keys, key),
            InputMode::Browsing => {
                let action = keys.get_action(&key);
                match key.code {
                    KeyCode::Char(c) if action == Action::None && c.is_ascii_digit() => {
                        self.input_mode = InputMode::Editing;
                        self.input = c.to_string();
                        None
                    }
                    _ => self.perform(session, action),
                }
            }
        }
    }

    fn handle_editing_key(
        &mut self,
        session: &mut Session,
        keys: &KeybindingConfig,
        key: KeyEvent,
    ) -> Option<Effect> {
        let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Enter => {
                let line = mem::take(&mut self.input);
                self.input_mode = InputMode::Browsing;
                self.submit(session, &line)
            }
            KeyCode::Esc => {
                self.input.clear();
                self.input_mode = InputMode::Browsing;
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) if !chord => {
                self.input.push(c);
                None
            }
            _ if chord => {
                let action = keys.get_action(&key);
                self.perform(session, action)
            }
            _ => None,
        }
    }

    /// Run a line from the input bar.
    pub fn submit(&mut self, session: &mut Session, line: &str) -> Option<Effect> {
        self.scroll = 0;
        self.clear_status();
        match session.submit(line) {
            Ok(job) => job.map(Effect::Dispatch),
            Err(e) => {
                self.set_error(e.to_string());
                None
            }
        }
    }

    fn dispatch_or(&mut self, job: Option<FetchJob>, otherwise: &str) -> Option<Effect> {
        self.scroll = 0;
        if job.is_none() {
            self.set_status(otherwise);
        }
        job.map(Effect::Dispatch)
    }

    pub fn perform(&mut self, session: &mut Session, action: Action) -> Option<Effect> {
        match action {
            Action::None => None,
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(PAGE_SIZE);
                None
            }
            Action::PageDown => {
                self.scroll = self.scroll.saturating_add(PAGE_SIZE);
                None
            }
            Action::Back => {
                let job = session.go_back();
                self.dispatch_or(job, "Already at the first page")
            }
            Action::Forward => {
                let job = session.go_forward();
                self.dispatch_or(job, "Already at the latest page")
            }
            Action::Reload => {
                let job = session.reload();
                self.dispatch_or(job, "Nothing to reload")
            }
            Action::ToggleReader => {
                let job = session.toggle_reader_mode();
                let state = if session.active_tab().reader_mode() {
                    "Reader mode on"
                } else {
                    "Reader mode off"
                };
                self.set_status(state);
                self.scroll = 0;
                job.map(Effect::Dispatch)
            }
            Action::NewTab => {
                match session.new_tab(None) {
                    Ok(_) => {
                        self.scroll = 0;
                        self.input_mode = InputMode::Editing;
                        self.input.clear();
                        self.set_status(format!("Opened tab {}", session.active_index() + 1));
                    }
                    Err(e) => self.set_error(e.to_string()),
                }
                None
            }
            Action::CloseTab => {
                if session.close_active_tab() {
                    self.scroll = 0;
                    self.clear_status();
                } else {
                    self.set_status("Cannot close the last tab");
                }
                None
            }
            Action::NextTab | Action::PrevTab => {
                let moved = if action == Action::NextTab {
                    session.next_tab()
                } else {
                    session.prev_tab()
                };
                if moved {
                    self.scroll = 0;
                }
                None
            }
            Action::Bookmark => match session.bookmark_current() {
                Ok(BookmarkOutcome::Added(bookmark)) => {
                    self.set_status(format!("Bookmarked: {}", bookmark.title));
                    Some(Effect::SaveBookmarks)
                }
                Ok(BookmarkOutcome::AlreadyPresent) => {
                    self.set_status("Already bookmarked");
                    None
                }
                Ok(BookmarkOutcome::NoPage) => {
                    self.set_status("No page to bookmark");
                    None
                }
                Err(e) => {
                    self.set_error(e.to_string());
                    None
                }
            },
            Action::OpenImage => {
                let job = session.open_focused_image();
                if job.is_some() {
                    self.set_status("Opening image...");
                } else {
                    self.set_status("No image selected. Type imgN to pick one");
                }
                job.map(Effect::Dispatch)
            }
            Action::FollowImageLink => {
                self.scroll = 0;
                match session.follow_focused_image_link() {
                    Ok(Some(job)) => Some(Effect::Dispatch(job)),
                    Ok(None) => {
                        if session.view_mode() == ViewMode::Images {
                            self.set_status("This image is not linked");
                        }
                        None
                    }
                    Err(e) => {
                        self.set_error(e.to_string());
                        None
                    }
                }
            }
            Action::FocusInput => {
                self.input_mode = InputMode::Editing;
                None
            }
            Action::Help => {
                session.show_help();
                self.scroll = 0;
                None
            }
            Action::Escape => {
                session.escape();
                self.scroll = 0;
                self.clear_status();
                None
            }
        }
    }

    /// Merge a finished job and report it in the status line.
    pub fn handle_outcome(&mut self, session: &mut Session, outcome: JobOutcome) {
        match session.apply(outcome) {
            Applied::Content { tab_id } if tab_id == session.active_index() => {
                self.clear_status();
            }
            Applied::Content { .. } | Applied::Search | Applied::Stale => {}
            Applied::ViewerOpened(program) => {
                self.set_status(format!("Opened image with {}", program));
            }
            Applied::Error { tab_id, message } => {
                if tab_id.map_or(true, |id| id == session.active_index()) {
                    self.set_error(message);
                }
            }
        }
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

/// `Alt+1`..`Alt+9` select tabs 0..8.
fn alt_digit(key: &KeyEvent) -> Option<usize> {
    if !key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}
