//! Content extraction from rendered HTML
//!
//! This module turns a settled, fully-rendered HTML document into the pieces
//! a crawled document is made of:
//! - Noise stripping (scripts, styles, navigation, footers, sidebars, frames)
//! - Title and H1-H4 heading extraction
//! - Outgoing link discovery and canonicalization
//! - Main content region detection and Markdown conversion
//!
//! The steps run in that order; later steps assume earlier noise is gone.
//! Stripped subtrees are detached but still owned by the document, so every
//! query after stripping starts at the root element, which only walks
//! attached nodes.

mod cleaning;
mod main_content;
mod markdown;

pub use cleaning::strip_noise;
pub use main_content::{select_main_region, RegionStrategy, REGION_STRATEGIES};
pub use markdown::{clean_markdown, html_to_markdown};

use crate::url::normalize_link;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("BUG: hardcoded CSS selector 'title' is invalid"));

static HEADING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, h4").expect("BUG: hardcoded heading selector is invalid")
});

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("BUG: hardcoded CSS selector 'a[href]' is invalid"));

/// Title used when neither the page nor its URL provides one
pub const UNTITLED: &str = "Untitled";

/// Errors that can occur while extracting a page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Rendered document is empty")]
    EmptyDocument,

    #[error("Markdown conversion failed: {0}")]
    Markdown(String),
}

/// Everything extracted from one rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    /// Page title, never empty
    pub title: String,

    /// H1-H4 text in document order
    pub headings: Vec<String>,

    /// Cleaned Markdown of the main content region
    pub content: String,

    /// Canonical absolute links found outside the stripped noise, deduplicated
    /// in first-seen order; not yet scope-filtered
    pub links: Vec<String>,
}

/// Extracts a structured page from rendered HTML
///
/// # Arguments
///
/// * `html` - The rendered HTML document
/// * `page_url` - The canonical URL the document was rendered from
///
/// # Returns
///
/// * `Ok(ExtractedPage)` - Successfully extracted page
/// * `Err(ExtractError)` - The document was empty or could not be converted
///
/// # Example
///
/// ```
/// use sumi_scribe::extract::extract_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Guide</title></head>
///     <body><main><h1>Install</h1><p>Run the installer.</p><a href="/next/">Next</a></main></body></html>"#;
/// let page = extract_page(html, &Url::parse("https://example.com/guide").unwrap()).unwrap();
/// assert_eq!(page.title, "Guide");
/// assert_eq!(page.headings, vec!["Install"]);
/// assert_eq!(page.links, vec!["https://example.com/next"]);
/// ```
pub fn extract_page(html: &str, page_url: &Url) -> Result<ExtractedPage, ExtractError> {
    if html.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }

    let mut document = Html::parse_document(html);
    strip_noise(&mut document);

    let title = extract_title(&document, page_url);
    let headings = extract_headings(&document);
    let links = extract_links(&document, page_url);

    let (strategy, region) = select_main_region(&document);
    tracing::trace!("Main content region for {}: {:?}", page_url, strategy);

    let content = html_to_markdown(&region.html())?;

    Ok(ExtractedPage {
        title,
        headings,
        content,
        links,
    })
}

/// Page `<title>`, else the final URL path segment, else [`UNTITLED`]
fn extract_title(document: &Html, page_url: &Url) -> String {
    document
        .root_element()
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .or_else(|| last_path_segment(page_url))
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn last_path_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

/// Text of every H1-H4 in document order, whitespace-normalized
fn extract_headings(document: &Html) -> Vec<String> {
    document
        .root_element()
        .select(&HEADING_SELECTOR)
        .map(|heading| {
            heading
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Canonical targets of every hyperlink, deduplicated in first-seen order
fn extract_links(document: &Html, page_url: &Url) -> Vec<String> {
    let mut seen = HashSet::new();

    document
        .root_element()
        .select(&LINK_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| normalize_link(href, page_url))
        .filter(|link| seen.insert(link.clone()))
        .collect()
}
