//! Key bindings for browsing actions.
//!
//! Bindings are written as strings such as `"q"`, `"Left"` or `"Ctrl+r"`.
//! Text typed into the location bar never reaches these bindings except
//! for chords that carry Ctrl or Alt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub scroll_up: Vec<String>,
    pub scroll_down: Vec<String>,
    pub page_up: Vec<String>,
    pub page_down: Vec<String>,
    pub back: Vec<String>,
    pub forward: Vec<String>,
    pub reload: Vec<String>,
    pub toggle_reader: Vec<String>,
    pub new_tab: Vec<String>,
    pub close_tab: Vec<String>,
    pub next_tab: Vec<String>,
    pub prev_tab: Vec<String>,
    pub bookmark: Vec<String>,
    pub open_image: Vec<String>,
    pub follow_image_link: Vec<String>,
    pub focus_input: Vec<String>,
    pub help: Vec<String>,
    pub escape: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            scroll_up: keys(&["k", "Up"]),
            scroll_down: keys(&["j", "Down"]),
            page_up: keys(&["PageUp", "b"]),
            page_down: keys(&["PageDown", "Space"]),
            back: keys(&["Left", "Alt+Left"]),
            forward: keys(&["Right", "Alt+Right"]),
            reload: keys(&["Ctrl+r"]),
            toggle_reader: keys(&["Ctrl+e"]),
            new_tab: keys(&["Ctrl+t"]),
            close_tab: keys(&["Ctrl+w"]),
            next_tab: keys(&["Tab"]),
            prev_tab: keys(&["BackTab", "Shift+Tab"]),
            bookmark: keys(&["Ctrl+d"]),
            open_image: keys(&["Ctrl+o"]),
            follow_image_link: keys(&["Ctrl+l"]),
            focus_input: keys(&[":", "g", "/", "Ctrl+s"]),
            help: keys(&["?", "F1"]),
            escape: keys(&["Esc"]),
        }
    }
}

impl KeybindingConfig {
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 19] = [
            (&self.quit, Action::Quit),
            (&self.scroll_up, Action::ScrollUp),
            (&self.scroll_down, Action::ScrollDown),
            (&self.page_up, Action::PageUp),
            (&self.page_down, Action::PageDown),
            (&self.back, Action::Back),
            (&self.forward, Action::Forward),
            (&self.reload, Action::Reload),
            (&self.toggle_reader, Action::ToggleReader),
            (&self.new_tab, Action::NewTab),
            (&self.close_tab, Action::CloseTab),
            (&self.next_tab, Action::NextTab),
            (&self.prev_tab, Action::PrevTab),
            (&self.bookmark, Action::Bookmark),
            (&self.open_image, Action::OpenImage),
            (&self.follow_image_link, Action::FollowImageLink),
            (&self.focus_input, Action::FocusInput),
            (&self.help, Action::Help),
            (&self.escape, Action::Escape),
        ];

        table
            .iter()
            .find(|(bindings, _)| matches_key(key, bindings))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }
}

fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|parsed| parsed.matches(key))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored on the event side so `"?"` and `"R"` match however
    /// the terminal reports them.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse `"Ctrl+Shift+a"`-style strings. Modifiers are `Ctrl`, `Shift` and
/// `Alt`; the key is a single character or a named key such as `Enter`,
/// `Esc`, `PageDown` or `F5`.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    // A lone "+" is a key, not a separator.
    let (mods, key_part) = match s.rsplit_once('+') {
        Some((mods, key)) if !key.is_empty() => (Some(mods), key),
        _ => (None, s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in mods.into_iter().flat_map(|m| m.split('+')) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key_part)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_plain_and_named_keys() {
        assert_eq!(parse_key_string("g").unwrap().code, KeyCode::Char('g'));
        assert_eq!(parse_key_string("?").unwrap().code, KeyCode::Char('?'));
        assert_eq!(parse_key_string("PageDown").unwrap().code, KeyCode::PageDown);
        assert_eq!(parse_key_string("F12").unwrap().code, KeyCode::F(12));
        assert_eq!(parse_key_string("Space").unwrap().code, KeyCode::Char(' '));
        assert!(parse_key_string("F13").is_err());
    }

    #[test]
    fn test_parse_modifiers() {
        let binding = parse_key_string("Ctrl+r").unwrap();
        assert_eq!(binding.code, KeyCode::Char('r'));
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL);

        let binding = parse_key_string("Ctrl+Shift+a").unwrap();
        assert_eq!(
            binding.modifiers,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        );

        assert_eq!(parse_key_string("+").unwrap().code, KeyCode::Char('+'));
        assert!(parse_key_string("Hyper+x").is_err());
    }

    #[test]
    fn test_shift_is_ignored_on_events() {
        let binding = parse_key_string("?").unwrap();
        assert!(binding.matches(&key(KeyCode::Char('?'), KeyModifiers::SHIFT)));
        assert!(!binding.matches(&key(KeyCode::Char('?'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_default_actions() {
        let config = KeybindingConfig::default();

        assert_eq!(
            config.get_action(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            config.get_action(&key(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Action::Reload
        );
        assert_eq!(
            config.get_action(&key(KeyCode::Char('e'), KeyModifiers::CONTROL)),
            Action::ToggleReader
        );
        assert_eq!(
            config.get_action(&key(KeyCode::Left, KeyModifiers::NONE)),
            Action::Back
        );
        assert_eq!(
            config.get_action(&key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Action::PrevTab
        );
        assert_eq!(
            config.get_action(&key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Action::None
        );
    }
}
