//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - Draining the frontier one URL at a time, strictly sequentially
//! - Enforcing the depth bound and scope rules at dequeue time
//! - Rendering, extracting and filtering each page
//! - Offering discovered links one level deeper
//! - Pacing requests and honouring shutdown requests
//!
//! A failure on one URL never aborts the crawl: every iteration produces a
//! [`PageOutcome`] and the loop simply records it and moves on.

use crate::config::Config;
use crate::crawler::document::{
    CrawlOutcome, CrawlStats, Document, PageOutcome, SkipReason, MIN_CONTENT_CHARS,
};
use crate::crawler::frontier::{Frontier, QueuedUrl};
use crate::crawler::renderer::{RenderTimeouts, Renderer};
use crate::extract::extract_page;
use crate::url::ScopeFilter;
use crate::ScribeError;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Failure reasons are cut to this many characters before being logged
pub const MAX_REASON_CHARS: usize = 100;

/// Main crawler coordinator structure
///
/// Owns the frontier and visited set of exactly one crawl run. The renderer
/// is borrowed so the caller can shut it down once the crawl is over.
pub struct Coordinator<'r, R: Renderer + ?Sized> {
    renderer: &'r R,
    scope: ScopeFilter,
    frontier: Frontier,
    max_depth: u32,
    request_delay: Duration,
    timeouts: RenderTimeouts,
    shutdown: Arc<AtomicBool>,
}

impl<'r, R: Renderer + ?Sized> Coordinator<'r, R> {
    /// Creates a new coordinator instance and seeds its frontier
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `renderer` - The renderer every page goes through
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScribeError)` - The base URL could not be canonicalized
    pub fn new(config: &Config, renderer: &'r R) -> Result<Self, ScribeError> {
        let scope = ScopeFilter::from_config(&config.crawler)?;

        let mut frontier = Frontier::new();
        let seeds = config.seed_urls();
        let seeded = frontier.seed(&seeds, &scope);
        tracing::info!(
            "Seeded frontier with {} of {} start URLs (scope: {})",
            seeded,
            seeds.len(),
            scope.base_prefix()
        );

        Ok(Self {
            renderer,
            scope,
            frontier,
            max_depth: config.crawler.max_depth,
            request_delay: config.crawler.request_delay(),
            timeouts: RenderTimeouts::from_config(&config.renderer),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Replaces the shutdown flag with one shared with the caller
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown = flag;
        self
    }

    /// Handle that stops the crawl before its next iteration when set
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Read access to the frontier
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Runs the crawl loop until the frontier is empty or shutdown is requested
    ///
    /// Per-URL failures are recorded in the returned statistics, never
    /// propagated, so this cannot fail once the coordinator exists.
    pub async fn run(mut self) -> CrawlOutcome {
        tracing::info!("Starting crawl (max depth {})", self.max_depth);

        let mut documents = Vec::new();
        let mut stats = CrawlStats::start();
        let start_time = std::time::Instant::now();

        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                tracing::warn!(
                    "Shutdown requested, stopping with {} URLs left in frontier",
                    self.frontier.len()
                );
                stats.interrupted = true;
                break;
            }

            let queued = match self.frontier.pop() {
                Some(q) => q,
                None => {
                    tracing::info!("Frontier is empty, crawl complete");
                    break;
                }
            };

            let outcome = self.process_url(queued).await;
            stats.record(&outcome);
            let rendered = outcome.was_rendered();
            tracing::trace!("Finished {} (rendered: {})", outcome.url(), rendered);

            match outcome {
                PageOutcome::Kept(document) => {
                    stats.links_discovered += document.links.len();
                    documents.push(document);
                }
                PageOutcome::Thin { url, chars } => {
                    tracing::debug!("Skipping thin page {} ({} chars)", url, chars);
                }
                PageOutcome::Failed { url, reason } => {
                    tracing::warn!("Error crawling {}: {}", url, reason);
                }
                PageOutcome::Skipped { url, reason } => {
                    tracing::debug!("Skipped {}: {:?}", url, reason);
                }
            }

            if !rendered {
                continue;
            }

            let pages_rendered = stats.pages_rendered();
            if pages_rendered % 10 == 0 {
                let rate = pages_rendered as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages rendered, {} documents kept, {} in frontier, {:.2} pages/sec",
                    pages_rendered,
                    documents.len(),
                    self.frontier.len(),
                    rate
                );
            }

            if !self.request_delay.is_zero() && !self.frontier.is_empty() {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        stats.finished_at = Some(Utc::now());
        tracing::info!(
            "Crawl finished: {} documents from {} visited URLs in {:?}",
            documents.len(),
            self.frontier.visited_count(),
            start_time.elapsed()
        );

        CrawlOutcome {
            documents,
            visited: self.frontier.into_visited(),
            stats,
        }
    }

    /// Processes a single dequeued URL
    ///
    /// This method:
    /// 1. Drops URLs beyond the depth bound or out of scope
    /// 2. Marks the URL visited before any I/O
    /// 3. Renders and extracts the page
    /// 4. Keeps the document if its content is substantial
    /// 5. Offers the document's links one level deeper
    async fn process_url(&mut self, queued: QueuedUrl) -> PageOutcome {
        let QueuedUrl { url, depth } = queued;

        if depth > self.max_depth {
            return PageOutcome::Skipped {
                url,
                reason: SkipReason::DepthExceeded,
            };
        }

        if !self.scope.in_scope(&url, self.frontier.visited()) {
            return PageOutcome::Skipped {
                url,
                reason: SkipReason::OutOfScope,
            };
        }

        self.frontier.mark_visited(&url);
        tracing::info!("[{}] {}", depth, url);

        let html = match self.renderer.render(&url, &self.timeouts).await {
            Ok(html) => html,
            Err(e) => {
                return PageOutcome::Failed {
                    reason: truncate_message(&e.to_string(), MAX_REASON_CHARS),
                    url,
                }
            }
        };

        let page_url = match Url::parse(&url) {
            Ok(parsed) => parsed,
            Err(e) => {
                return PageOutcome::Failed {
                    reason: truncate_message(&e.to_string(), MAX_REASON_CHARS),
                    url,
                }
            }
        };

        let page = match extract_page(&html, &page_url) {
            Ok(page) => page,
            Err(e) => {
                return PageOutcome::Failed {
                    reason: truncate_message(&e.to_string(), MAX_REASON_CHARS),
                    url,
                }
            }
        };

        let chars = page.content.chars().count();
        if chars < MIN_CONTENT_CHARS {
            return PageOutcome::Thin { url, chars };
        }

        let links: Vec<String> = page
            .links
            .into_iter()
            .filter(|link| *link != url && self.scope.admits(link))
            .collect();

        if depth < self.max_depth {
            let offered = links
                .iter()
                .filter(|link| self.frontier.offer((*link).clone(), depth + 1))
                .count();
            tracing::debug!("Queued {} new links from {}", offered, url);
        }

        tracing::info!("Saved {} ({} chars)", url, chars);

        PageOutcome::Kept(Document {
            url,
            depth,
            title: page.title,
            headings: page.headings,
            content: page.content,
            links,
        })
    }
}

/// Cuts a message to at most `limit` characters
pub fn truncate_message(message: &str, limit: usize) -> String {
    message.chars().take(limit).collect()
}

/// Runs a complete crawl with the given renderer
///
/// # Example
///
/// ```no_run
/// use sumi_scribe::config::load_config;
/// use sumi_scribe::crawler::{run_crawl, HttpRenderer};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("scribe.toml"))?;
/// let renderer = HttpRenderer::new(&config.renderer)?;
/// let outcome = run_crawl(&config, &renderer).await?;
/// println!("{} documents", outcome.documents.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl<R: Renderer + ?Sized>(
    config: &Config,
    renderer: &R,
) -> Result<CrawlOutcome, ScribeError> {
    run_crawl_with_shutdown(config, renderer, Arc::new(AtomicBool::new(false))).await
}

/// Runs a crawl that stops cleanly once `shutdown` is set
///
/// The flag is checked before each dequeue, so the page in flight always
/// finishes and every document collected so far is returned.
pub async fn run_crawl_with_shutdown<R: Renderer + ?Sized>(
    config: &Config,
    renderer: &R,
    shutdown: Arc<AtomicBool>,
) -> Result<CrawlOutcome, ScribeError> {
    let coordinator = Coordinator::new(config, renderer)?.with_shutdown_flag(shutdown);
    Ok(coordinator.run().await)
}
