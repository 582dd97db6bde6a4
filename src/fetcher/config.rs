use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP and search provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds (default: 20)
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// `Accept` header value
    pub accept: String,

    /// `Accept-Language` header value
    pub accept_language: String,

    /// Search results page; `{query}` is replaced by the encoded query
    pub search_url: String,

    /// Generic web search used when no results could be parsed
    pub fallback_search_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            search_url: "https://html.duckduckgo.com/html/?q={query}".to_string(),
            fallback_search_url: "https://www.google.com/search?q={query}".to_string(),
        }
    }
}

impl FetchConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert!(config.search_url.contains("{query}"));
        assert!(config.fallback_search_url.contains("{query}"));
    }
}
