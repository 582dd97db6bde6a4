//! Fixed word lists and text helpers shared by both extraction modes.

const NAVIGATION_WORDS: [&str; 21] = [
    "home",
    "about",
    "contact",
    "login",
    "sign up",
    "register",
    "shop",
    "buy now",
    "subscribe",
    "follow",
    "share",
    "menu",
    "navigation",
    "categories",
    "tags",
    "archives",
    "search",
    "advertise",
    "sponsored",
    "popular",
    "trending",
];

const SKIPPED_LINK_PATTERNS: [&str; 11] = [
    "javascript:",
    "mailto:",
    "tel:",
    "/home",
    "/about",
    "/contact",
    "/login",
    "/signup",
    "/register",
    "/shop",
    "/buy",
];

const SKIPPED_IMAGE_PATTERNS: [&str; 9] = [
    "icon", "logo", "sprite", "button", "arrow", "spacer", "pixel", "tracking", "ads",
];

/// Case-insensitive check against the navigation word list.
pub fn is_navigation_text(text: &str) -> bool {
    let lower = text.to_lowercase();
    NAVIGATION_WORDS.iter().any(|word| lower.contains(word))
}

/// Reader-mode link filter over the anchor text and its raw `href`.
pub fn should_include_link(text: &str, href: &str) -> bool {
    if is_navigation_text(text) {
        return false;
    }
    if href.starts_with('#') {
        return false;
    }
    !SKIPPED_LINK_PATTERNS
        .iter()
        .any(|pattern| href.contains(pattern))
}

/// Reader-mode image filter over `src` and `alt`.
pub fn should_include_image(alt: &str, src: &str) -> bool {
    let src = src.to_lowercase();
    let alt = alt.to_lowercase();
    !SKIPPED_IMAGE_PATTERNS
        .iter()
        .any(|pattern| src.contains(pattern) || alt.contains(pattern))
}

/// Join all whitespace runs into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Markdown heading marker for `h1`..`h6`; levels 4 to 6 share one depth.
pub fn heading_marker(tag: &str) -> Option<&'static str> {
    match tag {
        "h1" => Some("#"),
        "h2" => Some("##"),
        "h3" => Some("###"),
        "h4" | "h5" | "h6" => Some("####"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_text_is_case_insensitive() {
        assert!(is_navigation_text("Please LOGIN first"));
        assert!(is_navigation_text("Trending now"));
        assert!(!is_navigation_text("The borrow checker explained"));
    }

    #[test]
    fn test_should_include_link() {
        assert!(should_include_link("more", "/x"));
        assert!(!should_include_link("more", "#top"));
        assert!(!should_include_link("write us", "mailto:me@site.example"));
        assert!(!should_include_link("team page", "/about/team"));
        assert!(!should_include_link("Subscribe", "/newsletter"));
    }

    #[test]
    fn test_should_include_image() {
        assert!(should_include_image("A mountain lake", "/img/lake.jpg"));
        assert!(!should_include_image("", "/static/site-logo.png"));
        assert!(!should_include_image("Menu Icon", "/img/x.svg"));
    }

    #[test]
    fn test_heading_marker_collapses_deep_levels() {
        assert_eq!(heading_marker("h1"), Some("#"));
        assert_eq!(heading_marker("h3"), Some("###"));
        assert_eq!(heading_marker("h5"), Some("####"));
        assert_eq!(heading_marker("h6"), Some("####"));
        assert_eq!(heading_marker("p"), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Read\n  more \t here. "), "Read more here.");
    }
}
