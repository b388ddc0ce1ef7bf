use crate::config::CrawlerConfig;
use crate::url::normalize::canonicalize;
use crate::UrlError;
use std::collections::HashSet;

/// Binary and media extensions that are never worth rendering
const SKIPPED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".pdf", ".zip", ".exe"];

/// Decides whether a canonical URL may enter the crawl frontier
///
/// A URL is in scope when all of the following hold:
/// 1. It has not been visited yet
/// 2. It is the (canonical) base URL or lies beneath it at a `/` boundary,
///    so `https://example.com.evil.net` and `/docs-internal` under `/docs`
///    are rejected
/// 3. It contains none of the exclusion substrings
/// 4. Its path does not end in a skipped binary/media extension
///
/// Rule 1 depends on crawl state and is checked by [`ScopeFilter::in_scope`];
/// rules 2-4 are static and checked by [`ScopeFilter::admits`].
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    base_prefix: String,
    exclude_patterns: Vec<String>,
}

impl ScopeFilter {
    /// Creates a filter for the given base URL and exclusion substrings
    ///
    /// The base URL is canonicalized so that it compares consistently with
    /// canonical candidates (`https://example.com/` becomes
    /// `https://example.com`).
    pub fn new(base_url: &str, exclude_patterns: Vec<String>) -> Result<Self, UrlError> {
        Ok(Self {
            base_prefix: canonicalize(base_url)?,
            exclude_patterns,
        })
    }

    /// Creates a filter from the crawler section of the configuration
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, UrlError> {
        Self::new(&config.base_url, config.exclude_patterns.clone())
    }

    /// The canonical prefix every crawled URL must start with
    pub fn base_prefix(&self) -> &str {
        &self.base_prefix
    }

    /// The configured exclusion substrings
    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude_patterns
    }

    /// Applies every scope rule, including the visited check
    pub fn in_scope(&self, url: &str, visited: &HashSet<String>) -> bool {
        !visited.contains(url) && self.admits(url)
    }

    /// Applies the prefix, exclusion and extension rules
    pub fn admits(&self, url: &str) -> bool {
        self.within_prefix(url)
            && !self.is_excluded(url)
            && !has_skipped_extension(url)
    }

    fn within_prefix(&self, url: &str) -> bool {
        url.strip_prefix(self.base_prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    /// Returns true if any exclusion substring occurs in the URL
    fn is_excluded(&self, url: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| url.contains(pattern.as_str()))
    }
}

/// Checks the URL path against the skipped extension list, ignoring case
fn has_skipped_extension(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();
    SKIPPED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
