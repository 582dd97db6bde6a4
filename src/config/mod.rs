//! Configuration management.
//!
//! Configuration is read from `~/.config/skiff/config.toml` at startup
//! (or from `--config`). If the file doesn't exist, a default configuration
//! with comments is created. `SKIFF_*` environment variables are applied on
//! top of the file.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use crate::browser::BrowserConfig;
use crate::extractor::ExtractionConfig;
use crate::fetcher::FetchConfig;
use crate::viewer::ViewerConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserConfig,
    pub fetch: FetchConfig,
    pub extraction: ExtractionConfig,
    pub viewer: ViewerConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

impl Config {
    /// Load from the default path, creating a commented default file when
    /// none exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_config_path()?;
        if !path.exists() {
            Self::create_default_config(&path)?;
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. Missing fields use default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// `~/.config/skiff/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("skiff").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, DEFAULT_CONFIG).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Apply `SKIFF_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`. Boolean switches are enabled only by
    /// the value `true`; any other value turns them off.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).map(|v| v.trim().eq_ignore_ascii_case("true"));
        let browser = &mut self.browser;

        if let Some(on) = flag("SKIFF_READER_MODE") {
            browser.reader_mode = on;
        }
        if let Some(on) = flag("SKIFF_BOOKMARKS") {
            browser.enable_bookmarks = on;
        }
        if let Some(on) = flag("SKIFF_HISTORY") {
            browser.enable_history = on;
        }
        if let Some(on) = flag("SKIFF_SEARCH") {
            browser.enable_search = on;
        }
        if let Some(on) = flag("SKIFF_TABS") {
            browser.enable_tabs = on;
        }
        if let Some(raw) = lookup("SKIFF_MAX_TABS") {
            match raw.trim().parse::<usize>() {
                Ok(max) if max > 0 => browser.max_tabs = max,
                _ => warn!("Ignoring SKIFF_MAX_TABS={:?}", raw),
            }
        }
    }
}

const DEFAULT_CONFIG: &str = r##"# Skiff Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+r", "Shift+Tab", "Alt+Left"

[browser]
# Page opened at startup instead of the help page
# start_page = "https://lite.duckduckgo.com/"

# Extract pages in reader mode by default
reader_mode = false

enable_bookmarks = true
enable_history = true
enable_search = true
enable_tabs = true
max_tabs = 10

# Defaults to <data dir>/skiff/bookmarks.json
# bookmarks_file = "/home/me/bookmarks.json"

[fetch]
# Request timeout in seconds
timeout_secs = 20

# {query} is replaced by the encoded search text
search_url = "https://html.duckduckgo.com/html/?q={query}"
fallback_search_url = "https://www.google.com/search?q={query}"

[extraction]
# CSS selectors tried, in priority order, to find the main content
content_selectors = [
    "article",
    "main",
    "[role=\"main\"]",
    ".content",
    "#content",
    "#main",
    ".post-content",
    ".entry-content",
    ".article-content",
    "#mw-content-text",
]

# Elements removed before reader mode extraction
remove_selectors = [
    "nav",
    "header",
    "footer",
    "aside",
    ".sidebar",
    ".ad",
    ".advertisement",
    ".navbar",
    ".menu",
    ".navigation",
    "script",
    "style",
    "iframe",
    ".comments",
    ".social-share",
]

[viewer]
# Tried in order; the image URL is passed as the last argument
programs = ["imv", "shotwell", "feh", "gpicview"]
kitty_inline = true
system_open = true

[colors]
border = "DarkGray"
input_border = "Cyan"
active_tab_fg = "Black"
active_tab_bg = "Cyan"
inactive_tab_fg = "Gray"
heading = "LightCyan"
link_marker = "Yellow"
quote = "Gray"
emphasis = "LightMagenta"
status_fg = "White"
status_bg = "DarkGray"
loading = "Yellow"
error = "LightRed"

[keybindings]
quit = ["q", "Ctrl+c"]
scroll_up = ["k", "Up"]
scroll_down = ["j", "Down"]
page_up = ["PageUp", "b"]
page_down = ["PageDown", "Space"]
back = ["Left", "Alt+Left"]
forward = ["Right", "Alt+Right"]
reload = ["Ctrl+r"]
toggle_reader = ["Ctrl+e"]
new_tab = ["Ctrl+t"]
close_tab = ["Ctrl+w"]
next_tab = ["Tab"]
prev_tab = ["BackTab", "Shift+Tab"]
bookmark = ["Ctrl+d"]
open_image = ["Ctrl+o"]
follow_image_link = ["Ctrl+l"]
focus_input = [":", "g", "/", "Ctrl+s"]
help = ["?", "F1"]
escape = ["Esc"]
"##;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
