pub mod config;
pub mod http_fetcher;

pub use config::FetchConfig;
pub use http_fetcher::HttpFetcher;

use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;

/// A successfully fetched HTML page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against it
    pub url: String,
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

/// Single-attempt page fetch. Non-2xx answers are errors.
#[async_trait]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}
