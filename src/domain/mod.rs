mod bookmark;
mod document;
mod search;

pub use bookmark::{Bookmark, BookmarkSet};
pub use document::{Document, ExtractionMode, Image, Link, MediaType};
pub use search::SearchResult;
