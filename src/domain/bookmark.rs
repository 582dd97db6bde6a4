use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Insertion-ordered bookmarks, unique by exact URL string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    entries: Vec<Bookmark>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a loaded list, keeping the first entry for each URL.
    pub fn from_entries(entries: Vec<Bookmark>) -> Self {
        let mut set = Self::new();
        for bookmark in entries {
            set.insert(bookmark);
        }
        set
    }

    /// Add a bookmark. Returns false when the URL is already present.
    pub fn insert(&mut self, bookmark: Bookmark) -> bool {
        if self.contains(&bookmark.url) {
            return false;
        }
        self.entries.push(bookmark);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.iter().any(|b| b.url == url)
    }

    /// Bookmark by its 1-based position.
    pub fn get(&self, number: usize) -> Option<&Bookmark> {
        number.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn as_slice(&self) -> &[Bookmark] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
