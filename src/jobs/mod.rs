//! Fetch jobs and their outcomes.
//!
//! A job takes only immutable inputs and yields exactly one
//! [`JobOutcome`]. Jobs run on the tokio runtime; outcomes flow back to the
//! session owner over an mpsc channel and are applied there in arrival
//! order.
//!
//! ```text
//! Session ──FetchJob──▶ JobRunner::dispatch ──tokio::spawn──▶ run_job
//!    ▲                                                          │
//!    └──────────────── JobOutcome (mpsc) ◀──────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::app::{AppContext, Result, SkiffError};
use crate::browser::{LoadStats, TabTicket};
use crate::domain::{Document, ExtractionMode, SearchResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchJob {
    /// Fetch and extract a page for a tab
    Page {
        ticket: TabTicket,
        url: String,
        mode: ExtractionMode,
    },
    /// Run a web search
    Search { ticket: u64, query: String },
    /// Hand an image URL to the external viewer
    OpenImage { url: String },
}

impl FetchJob {
    pub fn origin(&self) -> JobOrigin {
        match self {
            FetchJob::Page { ticket, .. } => JobOrigin::Tab(*ticket),
            FetchJob::Search { ticket, .. } => JobOrigin::Search(*ticket),
            FetchJob::OpenImage { .. } => JobOrigin::Viewer,
        }
    }
}

/// Who a failed job was working for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOrigin {
    Tab(TabTicket),
    Search(u64),
    Viewer,
}

#[derive(Debug)]
pub enum JobOutcome {
    ContentReady {
        ticket: TabTicket,
        url: String,
        document: Document,
        stats: LoadStats,
    },
    SearchReady {
        ticket: u64,
        query: String,
        results: Vec<SearchResult>,
    },
    ViewerOpened {
        program: String,
    },
    Failed {
        origin: JobOrigin,
        error: SkiffError,
    },
}

/// Run one job to completion.
pub async fn run_job(ctx: &AppContext, job: FetchJob) -> JobOutcome {
    let origin = job.origin();

    let result = match job {
        FetchJob::Page { ticket, url, mode } => load_page(ctx, ticket, url, mode).await,
        FetchJob::Search { ticket, query } => search(ctx, ticket, query).await,
        FetchJob::OpenImage { url } => ctx
            .viewer
            .open(&url)
            .map(|program| JobOutcome::ViewerOpened { program }),
    };

    result.unwrap_or_else(|error| {
        warn!("Job failed: {}", error);
        JobOutcome::Failed { origin, error }
    })
}

async fn load_page(
    ctx: &AppContext,
    ticket: TabTicket,
    url: String,
    mode: ExtractionMode,
) -> Result<JobOutcome> {
    let page = ctx.fetcher.fetch(&url).await?;
    let document = ctx.extractor.extract_page(&page.body, &page.url, mode);

    let stats = LoadStats {
        elapsed: page.elapsed,
        bytes: page.body.len(),
        status: page.status,
        link_count: document.links.len(),
        image_count: document.images.len(),
    };

    Ok(JobOutcome::ContentReady {
        ticket,
        url,
        document,
        stats,
    })
}

async fn search(ctx: &AppContext, ticket: u64, query: String) -> Result<JobOutcome> {
    let page = ctx.fetcher.fetch(&ctx.search.query_url(&query)).await?;
    let results = ctx.search.parse_results(&page.body, &query);

    Ok(JobOutcome::SearchReady {
        ticket,
        query,
        results,
    })
}

/// Runs jobs off the owner thread and reports their outcomes.
pub struct JobRunner {
    ctx: Arc<AppContext>,
    tx: mpsc::UnboundedSender<JobOutcome>,
}

impl JobRunner {
    pub fn new(ctx: Arc<AppContext>) -> (Self, mpsc::UnboundedReceiver<JobOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { ctx, tx }, rx)
    }

    pub fn dispatch(&self, job: FetchJob) {
        debug!("Dispatching {:?}", job);
        let ctx = self.ctx.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let outcome = run_job(&ctx, job).await;
            if tx.send(outcome).is_err() {
                debug!("Outcome receiver dropped");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_context, MockFetcher};

    fn ticket() -> TabTicket {
        TabTicket { key: 1, epoch: 1 }
    }

    #[tokio::test]
    async fn test_page_job_extracts_document() {
        let fetcher = MockFetcher::new().with_page(
            "https://site.example/page",
            "<title>Page</title><h1>Title</h1><p>Read <a href=\"/x\">more</a> here.</p>",
        );
        let (ctx, _dir) = test_context(fetcher);

        let outcome = run_job(
            &ctx,
            FetchJob::Page {
                ticket: ticket(),
                url: "https://site.example/page".into(),
                mode: ExtractionMode::Reader,
            },
        )
        .await;

        match outcome {
            JobOutcome::ContentReady {
                ticket: t,
                document,
                stats,
                ..
            } => {
                assert_eq!(t, ticket());
                assert_eq!(document.title.as_deref(), Some("Page"));
                assert!(document.body.contains("Read more [1] here."));
                assert_eq!(stats.status, 200);
                assert_eq!(stats.link_count, 1);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_http_failure_carries_origin() {
        let (ctx, _dir) = test_context(MockFetcher::new());

        let outcome = tokio_test::block_on(run_job(
            &ctx,
            FetchJob::Page {
                ticket: ticket(),
                url: "https://site.example/missing".into(),
                mode: ExtractionMode::Full,
            },
        ));

        match outcome {
            JobOutcome::Failed { origin, error } => {
                assert_eq!(origin, JobOrigin::Tab(ticket()));
                assert_eq!(error.status_code(), Some(404));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_job_without_results_falls_back() {
        let fetcher = MockFetcher::new().with_page(
            "https://html.duckduckgo.com/html/?q=rust",
            "<html><body>no results</body></html>",
        );
        let (ctx, _dir) = test_context(fetcher);

        let outcome = run_job(
            &ctx,
            FetchJob::Search {
                ticket: 3,
                query: "rust".into(),
            },
        )
        .await;

        match outcome {
            JobOutcome::SearchReady {
                ticket, results, ..
            } => {
                assert_eq!(ticket, 3);
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].number, 1);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_runner_delivers_outcomes() {
        let fetcher = MockFetcher::new().with_page("https://site.example/", "<p>Hello there, reader.</p>");
        let (ctx, _dir) = test_context(fetcher);
        let (runner, mut rx) = JobRunner::new(Arc::new(ctx));

        runner.dispatch(FetchJob::Page {
            ticket: ticket(),
            url: "https://site.example/".into(),
            mode: ExtractionMode::Full,
        });

        let outcome = rx.recv().await.expect("outcome");
        assert!(matches!(outcome, JobOutcome::ContentReady { .. }));
    }
}
