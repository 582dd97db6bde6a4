use crate::app::{AppContext, Result, SkiffError};
use crate::domain::{Document, ExtractionMode, SearchResult};
use crate::resolver;

/// Fetch `input` and extract it in `mode`.
pub async fn fetch_document(ctx: &AppContext, input: &str, mode: ExtractionMode) -> Result<Document> {
    let url = resolver::normalize_user_input(input, "")
        .ok_or_else(|| SkiffError::InvalidUrl(input.to_string()))?;

    let page = ctx.fetcher.fetch(&url).await?;
    Ok(ctx.extractor.extract_page(&page.body, &page.url, mode))
}

pub async fn dump(ctx: &AppContext, input: &str, mode: ExtractionMode, links: bool, json: bool) -> Result<()> {
    let document = fetch_document(ctx, input, mode).await?;

    if json {
        let out = serde_json::to_string_pretty(&document)
            .map_err(|e| SkiffError::Parse(format!("Failed to encode document: {}", e)))?;
        println!("{}", out);
    } else {
        print!("{}", format_document(&document, links));
    }
    Ok(())
}

pub async fn search(ctx: &AppContext, words: &[String]) -> Result<()> {
    let query = words.join(" ");
    let results = search_results(ctx, &query).await?;
    print!("{}", format_results(&results));
    Ok(())
}

pub async fn search_results(ctx: &AppContext, query: &str) -> Result<Vec<SearchResult>> {
    let page = ctx.fetcher.fetch(&ctx.search.query_url(query)).await?;
    Ok(ctx.search.parse_results(&page.body, query))
}

pub fn format_document(document: &Document, links: bool) -> String {
    let mut out = String::new();
    if let Some(title) = &document.title {
        out.push_str(&format!("{}\n{}\n\n", title, "=".repeat(title.chars().count())));
    }
    out.push_str(document.body.trim_end());
    out.push('\n');

    if links && !document.links.is_empty() {
        out.push_str("\nLinks:\n");
        for link in &document.links {
            out.push_str(&format!("[{}] {}\n", link.number, link.resolved_url));
        }
    }
    out
}

pub fn format_results(results: &[SearchResult]) -> String {
    let mut out = String::new();
    for result in results {
        out.push_str(&format!("[{}] {}\n    {}\n", result.number, result.title, result.url));
        if !result.snippet.is_empty() {
            out.push_str(&format!("    {}\n", result.snippet));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_context, MockFetcher};

    const PAGE: &str = "<title>Demo</title><h1>Title</h1><p>Read <a href=\"/x\">more</a> here.</p>";

    #[tokio::test]
    async fn test_fetch_document_normalizes_input() {
        let (ctx, _dir) = test_context(MockFetcher::new().with_page("https://site.example/page", PAGE));

        let document = fetch_document(&ctx, "site.example/page", ExtractionMode::Full)
            .await
            .unwrap();
        assert_eq!(document.links[0].resolved_url, "https://site.example/x");

        let out = format_document(&document, true);
        assert!(out.starts_with("Demo\n====\n\n"));
        assert!(out.ends_with("\nLinks:\n[1] https://site.example/x\n"));
    }

    #[tokio::test]
    async fn test_fetch_document_rejects_bad_input() {
        let (ctx, _dir) = test_context(MockFetcher::new());
        let err = fetch_document(&ctx, "ftp://files.example/x", ExtractionMode::Full)
            .await
            .unwrap_err();
        assert!(matches!(err, SkiffError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_search_results_parse_page() {
        let body = "<div class=\"result\"><a class=\"result__a\" href=\"https://tokio.rs/\">Tokio</a>\
                    <a class=\"result__snippet\">An async runtime</a></div>";
        let (ctx, _dir) = test_context(
            MockFetcher::new().with_page("https://html.duckduckgo.com/html/?q=tokio+runtime", body),
        );

        let results = search_results(&ctx, "tokio runtime").await.unwrap();
        assert_eq!(
            format_results(&results),
            "[1] Tokio\n    https://tokio.rs/\n    An async runtime\n"
        );
    }
}
