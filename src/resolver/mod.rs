//! URL resolution and user-input normalization.
//!
//! Everything that turns a raw `href` or a typed location into a target the
//! browser can fetch goes through here. Only `http` and `https` URLs are
//! navigable; anything else is reported as unusable by the callers.

use url::Url;

const IMAGE_SUFFIXES: [&str; 10] = [
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".svg", ".ico", ".tiff", ".tif",
];

const IMAGE_MARKERS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Resolve `href` against `base` using standard reference resolution.
///
/// If either side fails to parse, `href` is returned unchanged. No scheme
/// filtering happens here.
pub fn resolve(base: &str, href: &str) -> String {
    let Ok(base) = Url::parse(base) else {
        return href.to_string();
    };

    match base.join(href) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Normalize what the user typed into the location bar.
///
/// Returns `None` when the input is empty or cannot be turned into an
/// `http`/`https` URL with a host.
pub fn normalize_user_input(input: &str, current_url: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let candidate = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else if input.starts_with("//") {
        format!("https:{}", input)
    } else if input.starts_with('/') {
        resolve(current_url, input)
    } else if input.contains('.') && !input.contains(char::is_whitespace) {
        if input.contains("://") {
            input.to_string()
        } else {
            format!("https://{}", input)
        }
    } else {
        resolve(current_url, input)
    };

    is_navigable(&candidate).then_some(candidate)
}

/// True when `url` parses, uses `http` or `https`, and names a host.
pub fn is_navigable(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Strip line breaks and any embedded whitespace from an attribute URL.
pub fn clean_url(raw: &str) -> String {
    raw.split_whitespace().collect()
}

/// Heuristic check for URLs that point straight at an image file.
pub fn is_image_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    IMAGE_SUFFIXES.iter().any(|ext| lower.ends_with(ext))
        || IMAGE_MARKERS.iter().any(|ext| lower.contains(ext))
}

/// True when `input` reads like a location rather than a search query.
pub fn looks_like_location(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() || input.contains(char::is_whitespace) {
        return false;
    }

    input.starts_with("http://")
        || input.starts_with("https://")
        || input.starts_with('/')
        || input.starts_with("./")
        || input.starts_with("../")
        || input.contains('.')
}
