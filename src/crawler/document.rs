//! Crawl result types

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Contents shorter than this (in characters) are dropped as thin pages
pub const MIN_CONTENT_CHARS: usize = 100;

/// One crawled page that passed the content threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Canonical URL of the page
    pub url: String,

    /// BFS distance from the seed
    pub depth: u32,

    /// Page title, never empty
    pub title: String,

    /// H1-H4 text in document order
    pub headings: Vec<String>,

    /// Cleaned Markdown of the main content region
    pub content: String,

    /// In-scope canonical links found on the page, excluding the page itself
    pub links: Vec<String>,
}

/// Why a dequeued URL was not rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DepthExceeded,
    OutOfScope,
}

/// What happened to one dequeued URL
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// Rendered, extracted and kept
    Kept(Document),

    /// Rendered but the content was below [`MIN_CONTENT_CHARS`]
    Thin { url: String, chars: usize },

    /// Rendering or extraction failed; `reason` is already truncated
    Failed { url: String, reason: String },

    /// Dropped without rendering
    Skipped { url: String, reason: SkipReason },
}

impl PageOutcome {
    /// The URL this outcome is about
    pub fn url(&self) -> &str {
        match self {
            Self::Kept(document) => &document.url,
            Self::Thin { url, .. } | Self::Failed { url, .. } | Self::Skipped { url, .. } => url,
        }
    }

    /// Returns true if a render was attempted for this URL
    pub fn was_rendered(&self) -> bool {
        !matches!(self, Self::Skipped { .. })
    }
}

/// Counters for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlStats {
    pub pages_kept: usize,
    pub pages_thin: usize,
    pub pages_failed: usize,
    pub pages_skipped: usize,
    pub links_discovered: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Set when the crawl stopped on a shutdown request
    pub interrupted: bool,
}

impl CrawlStats {
    /// Fresh counters stamped with the current time
    pub fn start() -> Self {
        Self {
            pages_kept: 0,
            pages_thin: 0,
            pages_failed: 0,
            pages_skipped: 0,
            links_discovered: 0,
            started_at: Utc::now(),
            finished_at: None,
            interrupted: false,
        }
    }

    /// Counts one page outcome
    pub fn record(&mut self, outcome: &PageOutcome) {
        match outcome {
            PageOutcome::Kept(_) => self.pages_kept += 1,
            PageOutcome::Thin { .. } => self.pages_thin += 1,
            PageOutcome::Failed { .. } => self.pages_failed += 1,
            PageOutcome::Skipped { .. } => self.pages_skipped += 1,
        }
    }

    /// Number of pages a render was attempted for
    pub fn pages_rendered(&self) -> usize {
        self.pages_kept + self.pages_thin + self.pages_failed
    }

    /// Wall-clock duration, up to now if the crawl is still running
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.unwrap_or_else(Utc::now) - self.started_at
    }
}

/// Everything a crawl run produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Kept documents in processing order
    pub documents: Vec<Document>,

    /// Every URL the crawl attempted to render
    pub visited: HashSet<String>,

    pub stats: CrawlStats,
}

impl CrawlOutcome {
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
