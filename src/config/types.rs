use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Sumi-Scribe
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Builds the seed URLs by appending each start path to the base URL
    pub fn seed_urls(&self) -> Vec<String> {
        self.crawler
            .start_paths
            .iter()
            .map(|path| format!("{}{}", self.crawler.base_url, path))
            .collect()
    }
}

/// Crawl scope and pacing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Site prefix the crawl never leaves
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Paths appended to the base URL to form the seeds
    #[serde(rename = "start-paths", default = "default_start_paths")]
    pub start_paths: Vec<String>,

    /// Maximum BFS distance from a seed
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Substrings that exclude a URL from the crawl
    #[serde(rename = "exclude-patterns", default)]
    pub exclude_patterns: Vec<String>,

    /// Pause between successive pages (seconds)
    #[serde(rename = "request-delay", default = "default_request_delay")]
    pub request_delay: f64,
}

impl CrawlerConfig {
    /// Returns the politeness delay as a Duration
    ///
    /// Validation guarantees the value is finite and non-negative; anything
    /// else collapses to zero here rather than panicking.
    pub fn request_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.request_delay).unwrap_or(Duration::ZERO)
    }
}

/// Headless browser configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// Upper bound for page navigation (seconds)
    #[serde(rename = "navigation-timeout", default = "default_navigation_timeout")]
    pub navigation_timeout: u64,

    /// Upper bound for the document to become interactive (seconds)
    #[serde(rename = "ready-timeout", default = "default_ready_timeout")]
    pub ready_timeout: u64,

    /// Extra wait for client-side rendering once the document is ready (seconds)
    #[serde(rename = "settle-time", default = "default_settle_time")]
    pub settle_time: u64,

    /// Scroll to the bottom of the page to trigger lazy-loaded content
    #[serde(rename = "scroll-to-bottom", default = "default_true")]
    pub scroll_to_bottom: bool,

    /// Wait after scrolling (seconds)
    #[serde(rename = "scroll-settle-time", default = "default_scroll_settle_time")]
    pub scroll_settle_time: u64,

    /// Run Chromium without a window
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Explicit Chromium binary; auto-detected when absent
    #[serde(rename = "chrome-executable", default)]
    pub chrome_executable: Option<String>,

    /// Override for the browser / HTTP user agent
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            navigation_timeout: default_navigation_timeout(),
            ready_timeout: default_ready_timeout(),
            settle_time: default_settle_time(),
            scroll_to_bottom: true,
            scroll_settle_time: default_scroll_settle_time(),
            headless: true,
            chrome_executable: None,
            user_agent: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the JSONL corpus and Markdown files
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// File name of the JSONL corpus inside `directory`
    #[serde(rename = "jsonl-file", default = "default_jsonl_file")]
    pub jsonl_file: String,

    /// Also write one Markdown file per document
    #[serde(rename = "markdown-files", default = "default_true")]
    pub markdown_files: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            jsonl_file: default_jsonl_file(),
            markdown_files: true,
        }
    }
}

fn default_start_paths() -> Vec<String> {
    vec!["/".to_string()]
}

fn default_request_delay() -> f64 {
    2.0
}

fn default_navigation_timeout() -> u64 {
    60
}

fn default_ready_timeout() -> u64 {
    10
}

fn default_settle_time() -> u64 {
    3
}

fn default_scroll_settle_time() -> u64 {
    1
}

fn default_true() -> bool {
    true
}

fn default_output_directory() -> String {
    "output".to_string()
}

fn default_jsonl_file() -> String {
    "crawled_docs.jsonl".to_string()
}
