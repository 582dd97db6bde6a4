pub mod json;

use crate::app::Result;
use crate::domain::Bookmark;

pub use json::JsonBookmarkStore;

/// Whole-file bookmark persistence.
pub trait BookmarkStore {
    /// Saved bookmarks in order. A missing or unreadable file yields an
    /// empty list.
    fn load(&self) -> Vec<Bookmark>;

    /// Replace the stored list with `bookmarks`.
    fn save(&self, bookmarks: &[Bookmark]) -> Result<()>;
}
