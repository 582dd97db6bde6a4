use std::fmt;

use serde::{Deserialize, Serialize};

/// Which extraction pass produced a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMode {
    #[default]
    Full,
    Reader,
}

impl ExtractionMode {
    pub fn toggled(self) -> Self {
        match self {
            ExtractionMode::Full => ExtractionMode::Reader,
            ExtractionMode::Reader => ExtractionMode::Full,
        }
    }

    pub fn is_reader(self) -> bool {
        self == ExtractionMode::Reader
    }
}

/// A numbered, navigable link captured during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub number: usize,
    pub text: String,
    /// The `href` attribute exactly as written in the page
    pub href: String,
    pub resolved_url: String,
    pub is_image_target: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaType {
    Jpeg,
    Png,
    Gif,
    WebP,
    Svg,
    Bmp,
    Ico,
    Tiff,
    Image,
}

// Longer extensions first so ".tiff" wins over ".tif" and ".jpeg" over ".jpg".
const MEDIA_EXTENSIONS: [(&str, MediaType); 10] = [
    (".jpeg", MediaType::Jpeg),
    (".tiff", MediaType::Tiff),
    (".webp", MediaType::WebP),
    (".jpg", MediaType::Jpeg),
    (".png", MediaType::Png),
    (".gif", MediaType::Gif),
    (".svg", MediaType::Svg),
    (".bmp", MediaType::Bmp),
    (".ico", MediaType::Ico),
    (".tif", MediaType::Tiff),
];

impl MediaType {
    /// Classify an image by the extension found in its URL.
    pub fn from_url(url: &str) -> Self {
        let lower = url.to_lowercase();
        MEDIA_EXTENSIONS
            .iter()
            .find(|(ext, _)| lower.contains(ext))
            .map(|(_, media)| *media)
            .unwrap_or(MediaType::Image)
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaType::Jpeg => "JPEG",
            MediaType::Png => "PNG",
            MediaType::Gif => "GIF",
            MediaType::WebP => "WebP",
            MediaType::Svg => "SVG",
            MediaType::Bmp => "BMP",
            MediaType::Ico => "ICO",
            MediaType::Tiff => "TIFF",
            MediaType::Image => "Image",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An image reference captured during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub number: usize,
    pub resolved_url: String,
    pub alt_text: String,
    pub media_type: MediaType,
    pub is_linked: bool,
    /// Resolved `href` of the nearest enclosing anchor
    pub link_url: Option<String>,
}

impl Image {
    pub fn display_alt(&self) -> &str {
        if self.alt_text.trim().is_empty() {
            "No description"
        } else {
            &self.alt_text
        }
    }
}

/// The output of one extraction pass.
///
/// A document is never edited after it is produced: a new navigation,
/// reload, or mode switch always builds a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: Option<String>,
    pub body: String,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub mode: ExtractionMode,
}

impl Document {
    /// A link-free document carrying only a message, used for placeholders
    /// such as "Loading..." or an error report.
    pub fn message(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
            links: Vec::new(),
            images: Vec::new(),
            mode: ExtractionMode::Full,
        }
    }

    /// Link by its 1-based number.
    pub fn link(&self, number: usize) -> Option<&Link> {
        number.checked_sub(1).and_then(|i| self.links.get(i))
    }

    /// Image by its 1-based number.
    pub fn image(&self, number: usize) -> Option<&Image> {
        number.checked_sub(1).and_then(|i| self.images.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_prefers_longer_extension() {
        assert_eq!(MediaType::from_url("/scan.TIFF"), MediaType::Tiff);
        assert_eq!(MediaType::from_url("/scan.tif"), MediaType::Tiff);
        assert_eq!(MediaType::from_url("/photo.jpeg?x=1"), MediaType::Jpeg);
        assert_eq!(MediaType::from_url("/photo.jpg"), MediaType::Jpeg);
        assert_eq!(MediaType::from_url("/anim.webp"), MediaType::WebP);
    }

    #[test]
    fn test_media_type_default() {
        assert_eq!(MediaType::from_url("/render?id=42"), MediaType::Image);
        assert_eq!(MediaType::Image.to_string(), "Image");
    }

    #[test]
    fn test_document_lookup_is_one_based() {
        let mut doc = Document::message("body");
        doc.links.push(Link {
            number: 1,
            text: "first".into(),
            href: "/a".into(),
            resolved_url: "https://site.example/a".into(),
            is_image_target: false,
        });

        assert!(doc.link(0).is_none());
        assert_eq!(doc.link(1).map(|l| l.text.as_str()), Some("first"));
        assert!(doc.link(2).is_none());
        assert!(doc.image(1).is_none());
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(ExtractionMode::Full.toggled(), ExtractionMode::Reader);
        assert_eq!(ExtractionMode::Reader.toggled(), ExtractionMode::Full);
        assert!(ExtractionMode::Reader.is_reader());
    }
}
