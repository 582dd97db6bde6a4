use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, info};

use crate::app::{Result, SkiffError};
use crate::fetcher::{FetchConfig, FetchedPage, PageFetcher};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&config.accept_language)?);

        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| SkiffError::Config(format!("Invalid header value {:?}: {}", value, e)))
}

/// Pages are parsed as HTML, so only textual content types are accepted.
fn is_textual(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.starts_with("text/") || content_type.contains("html") || content_type.contains("xml")
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!("GET {}", url);
        let start = Instant::now();

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkiffError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_textual(content_type) {
                return Err(SkiffError::Parse(format!(
                    "unsupported content type {}",
                    content_type
                )));
            }
        }

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| SkiffError::Parse(format!("unreadable body: {}", e)))?;
        let elapsed = start.elapsed();

        info!(
            "Fetched {} ({} bytes, HTTP {}) in {:?}",
            final_url,
            body.len(),
            status.as_u16(),
            elapsed
        );

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body,
            elapsed,
        })
    }
}
