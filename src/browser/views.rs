//! Markdown builders for the listing views and built-in pages.

use crate::domain::{Bookmark, Document, Image, SearchResult};

pub const HELP_URL: &str = "help://welcome";

const HISTORY_URL_WIDTH: usize = 60;
const BOOKMARK_URL_WIDTH: usize = 50;

const HELP_TEXT: &str = "# 🌐 Skiff Help

## Quick Start
- Type a **URL** to visit a website
- Type any **text** to search the web
- Use **↑/↓** to scroll, **Enter** to submit
- Type **1, 2, 3...** to follow links
- Type **img1, img2...** to view images

## Essential Shortcuts
- **Ctrl+T** - New tab
- **Ctrl+W** - Close tab
- **Tab / Shift+Tab** - Next / previous tab
- **Alt+1..9** - Jump to tab
- **Ctrl+R** - Reload
- **Ctrl+E** - Reader mode
- **Ctrl+D** - Bookmark page
- **←/→** - Back / forward
- **Ctrl+O** - Open focused image
- **Ctrl+L** - Follow focused image link

## Commands
- **history** or **h** - View history
- **bookmarks** or **b** - View bookmarks
- **images** or **i** - View images
- **reader** or **r** - Reader mode
- **help** or **?** - This page

*Type 'help' anytime to see this page*
";

pub fn help_document() -> Document {
    let mut doc = Document::message(HELP_TEXT);
    doc.title = Some("Help".to_string());
    doc
}

pub fn history(entries: &[String], cursor: Option<usize>) -> String {
    if entries.is_empty() {
        return "# Browser History\n\nNo history yet. Start browsing to build history!".to_string();
    }

    let mut out = String::from("# Browser History\n\n");
    out.push_str("Use ←/→ to navigate, or type a number to jump to that page.\n\n");
    for (i, url) in entries.iter().enumerate() {
        let indicator = if Some(i) == cursor { "➤ " } else { "  " };
        out.push_str(&format!(
            "{}[{}] {}\n",
            indicator,
            i + 1,
            truncate(url, HISTORY_URL_WIDTH)
        ));
    }
    out.push_str(&format!(
        "\nTotal: {} pages | Current position: {}",
        entries.len(),
        cursor.map_or(0, |c| c + 1)
    ));
    out
}

pub fn bookmarks(entries: &[Bookmark]) -> String {
    if entries.is_empty() {
        return "# Bookmarks\n\nNo bookmarks yet! Use Ctrl+D to bookmark the current page.".to_string();
    }

    let mut out = String::from("# Bookmarks\n\n");
    out.push_str("Type a number to open that bookmark, or Ctrl+D to bookmark current page.\n\n");
    for (i, bookmark) in entries.iter().enumerate() {
        out.push_str(&format!("[{}] **{}**\n", i + 1, bookmark.title));
        out.push_str(&format!("    {}\n\n", truncate(&bookmark.url, BOOKMARK_URL_WIDTH)));
    }
    out.push_str(&format!("Total: {} bookmarks", entries.len()));
    out
}

pub fn images(images: &[Image]) -> String {
    if images.is_empty() {
        return "# Images\n\nNo images found on this page.".to_string();
    }

    let mut out = String::from("# Images on This Page\n\n");
    out.push_str("Type a number to view image details.\n\n");
    for image in images {
        out.push_str(&format!("## {}. {}\n", image.number, image.display_alt()));
        out.push_str(&format!("Type: {}\n", image.media_type));
        out.push_str(&format!("URL: {}\n\n", image.resolved_url));
    }
    out.push_str(&format!("Total: {} images | Type number for details", images.len()));
    out
}

pub fn image_detail(image: &Image) -> String {
    let mut out = format!(
        "# 🖼️ Image {}: {}\n\nURL: {}\n\nType: {}\n",
        image.number,
        image.display_alt(),
        image.resolved_url,
        image.media_type
    );

    match image.link_url.as_deref().filter(|_| image.is_linked) {
        Some(link) => {
            out.push_str(&format!("\n🔗 Links to: {}\n", link));
            out.push_str("\nCtrl+L to follow link | Ctrl+O to open image | Esc to go back");
        }
        None => out.push_str("\nCtrl+O to open image | Esc to go back"),
    }
    out
}

pub fn search_results(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("# Search Results\n\n🔍 Searching for: **{}**", query);
    }

    let mut out = String::from("# Search Results\n\n");
    out.push_str(&format!("Query: **{}**\n\n", query));
    out.push_str("Type a number to open that result.\n\n");
    for result in results {
        out.push_str(&format!("[{}] **{}**\n", result.number, result.title));
        out.push_str(&format!("    {}\n", result.url));
        if !result.snippet.is_empty() {
            out.push_str(&format!("    *{}*\n", result.snippet));
        }
        out.push('\n');
    }
    out.push_str(&format!("Found {} results | Type number to open", results.len()));
    out
}

/// Cut `text` to at most `width` characters, ending in "..." when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
