//! # Skiff
//!
//! A terminal web browser that distills HTML pages into navigable,
//! link-annotated text.
//!
//! ## Architecture
//!
//! ```text
//! input → Session ──FetchJob──▶ JobRunner ─▶ Fetcher → Extractor / SearchAdapter
//!            ▲                                              │
//!            └──────────────── JobOutcome ◀─────────────────┘
//! ```
//!
//! The [`browser::Session`] is owned by a single task and is the only place
//! tabs, history and bookmarks change. Everything that touches the network
//! runs as a job and reports back with one outcome value.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the browser
//! skiff https://www.rust-lang.org
//!
//! # Print a page in reader mode with its link list
//! skiff dump --reader --links https://blog.rust-lang.org
//!
//! # Search from the shell
//! skiff search tokio runtime
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// extractor, search adapter, image viewer and bookmark store.
pub mod app;

/// Tab and history state machine.
///
/// - [`Session`](browser::Session): tabs, bookmarks, search results and view mode
/// - [`Tab`](browser::Tab): one navigation history plus its current document
/// - [`Command`](browser::Command): parsing of the input line
pub mod browser;

/// Command-line interface using clap.
///
/// - `browse [URL]` - Launch the browser (default)
/// - `dump URL` - Print the extracted text of a page
/// - `search QUERY...` - Print numbered search results
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/skiff/config.toml`, supporting feature switches,
/// fetch settings, extraction selectors, viewer programs, colors and
/// keybindings.
pub mod config;

/// Core data model: documents, links, images, bookmarks, search results.
pub mod domain;

/// Main-content location and the full and reader extraction modes.
pub mod extractor;

/// Single-attempt HTTP fetching.
///
/// - [`PageFetcher`](fetcher::PageFetcher): Async trait for page fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Fetch jobs, their outcomes and the runner that executes them.
pub mod jobs;

/// URL resolution and user-input normalization.
pub mod resolver;

/// Search results page scraping.
pub mod search;

/// Bookmark persistence.
///
/// - [`BookmarkStore`](store::BookmarkStore): whole-file load/save trait
/// - [`JsonBookmarkStore`](store::JsonBookmarkStore): JSON file implementation
pub mod store;

/// Terminal user interface built with ratatui.
///
/// Tab bar, location input, page pane and a status line. Links are
/// followed by typing their number.
pub mod tui;

/// External image viewer.
pub mod viewer;

#[cfg(test)]
mod testing;
