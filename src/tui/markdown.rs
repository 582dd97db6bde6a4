//! Styling for the markdown-like text produced by extraction and the
//! listing views.
//!
//! Only the constructs those producers emit are recognized: `#` headings,
//! `> ` quotes, `- ` list items, `--- Images ---` separators, `**bold**`,
//! `*italic*` and `[n]` / `[imgN]` markers. Anything else passes through as
//! plain text, so rendering cannot fail.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::config::ColorConfig;

pub fn render(body: &str, colors: &ColorConfig) -> Text<'static> {
    Text::from(
        body.lines()
            .map(|line| render_line(line, colors))
            .collect::<Vec<_>>(),
    )
}

fn render_line(line: &str, colors: &ColorConfig) -> Line<'static> {
    if let Some((level, text)) = heading(line) {
        let mut style = Style::default().fg(colors.heading).add_modifier(Modifier::BOLD);
        if level == 1 {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        return Line::from(inline_spans(text, style, colors));
    }

    if let Some(text) = line.strip_prefix("> ") {
        let style = Style::default().fg(colors.quote).add_modifier(Modifier::ITALIC);
        let mut spans = vec![Span::styled("│ ", Style::default().fg(colors.quote))];
        spans.extend(inline_spans(text, style, colors));
        return Line::from(spans);
    }

    if let Some(text) = line.strip_prefix("- ") {
        let mut spans = vec![Span::raw("  • ")];
        spans.extend(inline_spans(text, Style::default(), colors));
        return Line::from(spans);
    }

    if line.starts_with("--- ") && line.ends_with(" ---") {
        return Line::styled(
            line.to_string(),
            Style::default().fg(colors.border).add_modifier(Modifier::BOLD),
        );
    }

    Line::from(inline_spans(line, Style::default(), colors))
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    line[level..].strip_prefix(' ').map(|text| (level, text.trim()))
}

/// `[12]` or `[img3]`
fn is_marker(inner: &str) -> bool {
    let digits = inner.strip_prefix("img").unwrap_or(inner);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn inline_spans(text: &str, base: Style, colors: &ColorConfig) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut buf = String::new();
    let mut bold = false;
    let mut italic = false;
    let mut rest = text;

    let style = |bold: bool, italic: bool| {
        let mut style = base;
        if bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if italic {
            style = style.fg(colors.emphasis).add_modifier(Modifier::ITALIC);
        }
        style
    };

    while let Some(ch) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("**") {
            // An unmatched opener stays literal.
            if bold || after.contains("**") {
                flush(&mut spans, &mut buf, style(bold, italic));
                bold = !bold;
                rest = after;
                continue;
            }
        } else if let Some(after) = rest.strip_prefix('*') {
            if italic || after.contains('*') {
                flush(&mut spans, &mut buf, style(bold, italic));
                italic = !italic;
                rest = after;
                continue;
            }
        } else if ch == '[' {
            if let Some(end) = rest.find(']') {
                if is_marker(&rest[1..end]) {
                    flush(&mut spans, &mut buf, style(bold, italic));
                    spans.push(Span::styled(
                        rest[..=end].to_string(),
                        Style::default()
                            .fg(colors.link_marker)
                            .add_modifier(Modifier::BOLD),
                    ));
                    rest = &rest[end + 1..];
                    continue;
                }
            }
        }

        buf.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    flush(&mut spans, &mut buf, style(bold, italic));
    spans
}

fn flush(spans: &mut Vec<Span<'static>>, buf: &mut String, style: Style) {
    if !buf.is_empty() {
        spans.push(Span::styled(std::mem::take(buf), style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn rendered(body: &str) -> Vec<Line<'static>> {
        render(body, &ColorConfig::default()).lines
    }

    #[test]
    fn test_headings_drop_markers() {
        let lines = rendered("# Title\n#### Deep\n#hashtag");
        let colors = ColorConfig::default();

        assert_eq!(plain(&lines[0]), "Title");
        assert_eq!(lines[0].spans[0].style.fg, Some(colors.heading));
        assert_eq!(plain(&lines[1]), "Deep");
        assert_eq!(plain(&lines[2]), "#hashtag");
    }

    #[test]
    fn test_link_markers_are_highlighted() {
        let lines = rendered("Read more [1] here. 🖼️ [img2] cat");
        let colors = ColorConfig::default();
        let markers: Vec<&Span> = lines[0]
            .spans
            .iter()
            .filter(|s| s.style.fg == Some(colors.link_marker))
            .collect();

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].content, "[1]");
        assert_eq!(markers[1].content, "[img2]");
        assert_eq!(plain(&lines[0]), "Read more [1] here. 🖼️ [img2] cat");
    }

    #[test]
    fn test_emphasis() {
        let lines = rendered("Query: **rust** and *tokio*");
        let bold = lines[0].spans.iter().find(|s| s.content == "rust").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(plain(&lines[0]), "Query: rust and tokio");
    }

    #[test]
    fn test_unmatched_markup_is_literal() {
        let lines = rendered("5 * 3 = 15 and [x] stays");
        assert_eq!(plain(&lines[0]), "5 * 3 = 15 and [x] stays");
    }

    #[test]
    fn test_quotes_lists_and_separators() {
        let lines = rendered("> quoted\n- item\n--- Images ---");
        assert_eq!(plain(&lines[0]), "│ quoted");
        assert_eq!(plain(&lines[1]), "  • item");
        assert_eq!(plain(&lines[2]), "--- Images ---");
    }
}
