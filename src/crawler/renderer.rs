//! Renderer capability
//!
//! A renderer takes a URL and returns the settled HTML of the page. The crawl
//! controller only depends on this trait; the Chromium and static HTTP
//! implementations live in their own modules.

use crate::config::RendererConfig;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by a renderer for a single URL
///
/// None of these abort a crawl; the controller records them and moves on.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Navigation to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    NotHtml { url: String, content_type: String },

    #[error("Browser error: {0}")]
    Browser(String),
}

/// Time bounds applied to one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTimeouts {
    /// Upper bound for navigation / the HTTP request
    pub navigation: Duration,

    /// Upper bound for the document to stop `loading`
    pub ready: Duration,

    /// Fixed wait for deferred client-side rendering
    pub settle: Duration,

    /// Wait after scrolling to the bottom; `None` disables the scroll
    pub scroll: Option<Duration>,
}

impl RenderTimeouts {
    /// Builds the timeouts from the renderer configuration
    pub fn from_config(config: &RendererConfig) -> Self {
        Self {
            navigation: Duration::from_secs(config.navigation_timeout),
            ready: Duration::from_secs(config.ready_timeout),
            settle: Duration::from_secs(config.settle_time),
            scroll: config
                .scroll_to_bottom
                .then(|| Duration::from_secs(config.scroll_settle_time)),
        }
    }
}

impl Default for RenderTimeouts {
    fn default() -> Self {
        Self::from_config(&RendererConfig::default())
    }
}

/// Produces fully-rendered HTML for a URL
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Renders `url` and returns the resulting HTML document as text
    async fn render(&self, url: &str, timeouts: &RenderTimeouts) -> Result<String, RenderError>;
}
