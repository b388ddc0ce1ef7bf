//! Crawler module for page rendering and crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - The breadth-first frontier and visited set
//! - The renderer capability and its Chromium and HTTP implementations
//! - Overall crawl coordination and per-page outcomes

mod browser;
mod coordinator;
mod document;
mod fetcher;
mod frontier;
mod renderer;

pub use browser::ChromeRenderer;
pub use coordinator::{
    run_crawl, run_crawl_with_shutdown, truncate_message, Coordinator, MAX_REASON_CHARS,
};
pub use document::{
    CrawlOutcome, CrawlStats, Document, PageOutcome, SkipReason, MIN_CONTENT_CHARS,
};
pub use fetcher::{build_http_client, HttpRenderer, DEFAULT_USER_AGENT};
pub use frontier::{Frontier, QueuedUrl};
pub use renderer::{RenderError, RenderTimeouts, Renderer};
