use serde::{Deserialize, Serialize};

/// Selector lists driving content location and reader-mode cleanup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// CSS selectors tried, in priority order, to locate the main content
    pub content_selectors: Vec<String>,

    /// Article-like selectors reader mode tries before falling back to `body`
    pub reader_selectors: Vec<String>,

    /// Boilerplate subtrees removed before reader-mode traversal
    pub remove_selectors: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            content_selectors: vec![
                "article".to_string(),
                "main".to_string(),
                "[role=\"main\"]".to_string(),
                ".content".to_string(),
                "#content".to_string(),
                "#main".to_string(),
                ".post-content".to_string(),
                ".entry-content".to_string(),
                ".article-content".to_string(),
                // MediaWiki article body
                "#mw-content-text".to_string(),
            ],
            reader_selectors: vec![
                "article".to_string(),
                "main".to_string(),
                "[role='main']".to_string(),
                ".content".to_string(),
                ".post-content".to_string(),
                ".entry-content".to_string(),
                ".article-content".to_string(),
                ".post-body".to_string(),
                ".story-content".to_string(),
                ".main-content".to_string(),
            ],
            remove_selectors: vec![
                "nav".to_string(),
                "header".to_string(),
                "footer".to_string(),
                "aside".to_string(),
                ".sidebar".to_string(),
                ".ad".to_string(),
                ".advertisement".to_string(),
                ".navbar".to_string(),
                ".menu".to_string(),
                ".navigation".to_string(),
                "script".to_string(),
                "style".to_string(),
                "iframe".to_string(),
                ".comments".to_string(),
                ".social-share".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selector_order() {
        let config = ExtractionConfig::default();
        assert_eq!(config.content_selectors.first().map(String::as_str), Some("article"));
        assert_eq!(config.reader_selectors.len(), 10);
        assert!(config.remove_selectors.iter().any(|s| s == "nav"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ExtractionConfig =
            toml::from_str("content_selectors = [\"#story\"]").expect("partial config");
        assert_eq!(config.content_selectors, vec!["#story"]);
        assert_eq!(config.reader_selectors, ExtractionConfig::default().reader_selectors);
    }
}
