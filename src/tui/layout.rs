use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::browser::views::truncate;
use crate::browser::{LoadStats, Session, TabStatus, ViewMode};
use crate::config::ColorConfig;
use crate::tui::app::{InputMode, TuiApp};
use crate::tui::markdown;

const TAB_TITLE_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, app: &TuiApp, session: &Session, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(3), // Location / command input
            Constraint::Min(5),    // Page
            Constraint::Length(1), // Load status of the active tab
            Constraint::Length(1), // Messages and key hints
        ])
        .split(frame.area());

    render_tab_bar(frame, session, chunks[0], colors);
    render_input(frame, app, session, chunks[1], colors);
    render_content(frame, app, session, chunks[2], colors);
    render_load_status(frame, session, chunks[3], colors);
    render_status_bar(frame, app, chunks[4], colors);
}

fn render_tab_bar(frame: &mut Frame, session: &Session, area: Rect, colors: &ColorConfig) {
    let spans: Vec<Span> = session
        .tabs()
        .iter()
        .map(|tab| {
            let label = format!(" {}:{} ", tab.id() + 1, truncate(tab.title(), TAB_TITLE_WIDTH));
            if tab.id() == session.active_index() {
                Span::styled(
                    label,
                    Style::default()
                        .fg(colors.active_tab_fg)
                        .bg(colors.active_tab_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(label, Style::default().fg(colors.inactive_tab_fg))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &TuiApp, session: &Session, area: Rect, colors: &ColorConfig) {
    let editing = app.input_mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().fg(colors.input_border)
    } else {
        Style::default().fg(colors.border)
    };

    let text = if editing {
        app.input.clone()
    } else {
        session.active_tab().url().to_string()
    };

    let block = Block::default()
        .title(" Go to URL, search, or type a number ")
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(text).block(block), area);

    if editing {
        frame.set_cursor_position(Position::new(cursor_x(area, &app.input), area.y + 1));
    }
}

/// Column just after the typed text, kept inside the input border.
fn cursor_x(area: Rect, input: &str) -> u16 {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(typed);
    x.min(area.right().saturating_sub(2))
}

fn render_content(frame: &mut Frame, app: &TuiApp, session: &Session, area: Rect, colors: &ColorConfig) {
    let tab = session.active_tab();
    let title = match session.view_mode() {
        ViewMode::Content if tab.reader_mode() => format!(" {} [Reader] ", tab.title()),
        ViewMode::Content => format!(" {} ", tab.title()),
        ViewMode::History => " History ".to_string(),
        ViewMode::Bookmarks => " Bookmarks ".to_string(),
        ViewMode::Images => " Images ".to_string(),
        ViewMode::Search => " Search ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let paragraph = Paragraph::new(markdown::render(&session.view_body(), colors))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_load_status(frame: &mut Frame, session: &Session, area: Rect, colors: &ColorConfig) {
    let tab = session.active_tab();
    let (text, style) = match tab.status() {
        TabStatus::Idle => ("Ready".to_string(), Style::default().fg(colors.status_fg)),
        TabStatus::Loading { stage } => (format!("🔄 {}", stage), Style::default().fg(colors.loading)),
        TabStatus::Loaded(stats) => (
            describe_stats(stats, tab.reader_mode()),
            Style::default().fg(colors.status_fg),
        ),
        TabStatus::Failed { message } => (format!("❌ {}", message), Style::default().fg(colors.error)),
    };

    frame.render_widget(Paragraph::new(text).style(style.bg(colors.status_bg)), area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let (text, style) = match &app.status_message {
        Some(msg) if msg.is_error => (msg.text.clone(), Style::default().fg(colors.error)),
        Some(msg) => (msg.text.clone(), Style::default().fg(colors.status_fg)),
        None if app.input_mode == InputMode::Editing => (
            "Enter:Go  Esc:Cancel  Ctrl+T:New tab".to_string(),
            Style::default().fg(colors.status_fg),
        ),
        None => (
            ":Go  ←/→:Back/Fwd  Ctrl+R:Reload  Ctrl+E:Reader  Ctrl+T/W:Tabs  Ctrl+D:Bookmark  ?:Help  q:Quit"
                .to_string(),
            Style::default().fg(colors.status_fg),
        ),
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// One-line summary of a finished load.
pub fn describe_stats(stats: &LoadStats, reader: bool) -> String {
    format!(
        "✓ HTTP {} · {} · {} links · {} images · {}ms{}",
        stats.status,
        format_bytes(stats.bytes),
        stats.link_count,
        stats.image_count,
        stats.elapsed.as_millis(),
        if reader { " · Reader" } else { "" }
    )
}

fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_describe_stats() {
        let stats = LoadStats {
            elapsed: Duration::from_millis(420),
            bytes: 2048,
            status: 200,
            link_count: 12,
            image_count: 3,
        };
        assert_eq!(
            describe_stats(&stats, true),
            "✓ HTTP 200 · 2.0 KB · 12 links · 3 images · 420ms · Reader"
        );
    }

    #[test]
    fn test_cursor_stays_inside_input_box() {
        let area = Rect::new(2, 0, 40, 3);
        assert_eq!(cursor_x(area, ""), 3);
        assert_eq!(cursor_x(area, "abc"), 6);
        assert_eq!(cursor_x(area, &"x".repeat(70_000)), area.right() - 2);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
