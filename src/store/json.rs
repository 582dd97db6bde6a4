use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::app::{Result, SkiffError};
use crate::domain::Bookmark;
use crate::store::BookmarkStore;

pub struct JsonBookmarkStore {
    path: PathBuf,
}

impl JsonBookmarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/skiff/bookmarks.json`
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SkiffError::Config("Could not find data directory".into()))?;
        Ok(data_dir.join("skiff").join("bookmarks.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookmarkStore for JsonBookmarkStore {
    fn load(&self) -> Vec<Bookmark> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No bookmarks file at {}", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read bookmarks {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                warn!("Ignoring corrupt bookmarks file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(bookmarks)
            .map_err(|e| SkiffError::Parse(format!("Failed to encode bookmarks: {}", e)))?;
        fs::write(&self.path, data)?;

        debug!("Saved {} bookmarks to {}", bookmarks.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonBookmarkStore::new(dir.path().join("none.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookmarks.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonBookmarkStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonBookmarkStore::new(dir.path().join("nested").join("bookmarks.json"));
        let bookmarks = vec![
            Bookmark::new("Rust", "https://www.rust-lang.org/"),
            Bookmark::new("Tokio", "https://tokio.rs/"),
        ];

        store.save(&bookmarks).unwrap();
        assert_eq!(store.load(), bookmarks);
    }

    #[test]
    fn test_save_replaces_whole_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonBookmarkStore::new(dir.path().join("bookmarks.json"));

        store
            .save(&[Bookmark::new("Old", "https://old.example/")])
            .unwrap();
        store
            .save(&[Bookmark::new("New", "https://new.example/")])
            .unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "New");
    }

    #[test]
    fn test_reads_plain_title_url_objects() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookmarks.json");
        fs::write(&path, r#"[{"title":"Docs","url":"https://docs.rs/"}]"#).unwrap();

        let loaded = JsonBookmarkStore::new(&path).load();
        assert_eq!(loaded, vec![Bookmark::new("Docs", "https://docs.rs/")]);
    }
}
