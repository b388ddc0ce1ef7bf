//! Main content region detection
//!
//! Rendered single-page applications wrap their meaningful content in a small
//! number of conventional containers. The region is chosen by evaluating an
//! ordered list of strategies and taking the first one that matches.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static ROOT_ID_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#root").expect("BUG: hardcoded CSS selector '#root' is invalid"));

static MAIN_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("main").expect("BUG: hardcoded CSS selector 'main' is invalid"));

static ARTICLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("article").expect("BUG: hardcoded CSS selector 'article' is invalid")
});

static CONTAINER_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div[class], section[class]")
        .expect("BUG: hardcoded CSS selector for class containers is invalid")
});

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("BUG: hardcoded CSS selector 'body' is invalid"));

static CONTAINER_CLASS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)content|main|container").expect("BUG: hardcoded container class regex is invalid")
});

/// One way of locating the main content region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStrategy {
    /// An element with `id="root"` (React / Vite mount point)
    RootId,
    /// The first `<main>` element
    Main,
    /// The first `<article>` element
    Article,
    /// The first container whose class mentions content, main or container
    ContainerClass,
    /// The whole `<body>`
    Body,
}

/// Strategies in priority order
pub const REGION_STRATEGIES: &[RegionStrategy] = &[
    RegionStrategy::RootId,
    RegionStrategy::Main,
    RegionStrategy::Article,
    RegionStrategy::ContainerClass,
    RegionStrategy::Body,
];

impl RegionStrategy {
    /// Returns the first attached element this strategy matches, if any
    pub fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let root = document.root_element();
        match self {
            Self::RootId => root.select(&ROOT_ID_SELECTOR).next(),
            Self::Main => root.select(&MAIN_SELECTOR).next(),
            Self::Article => root.select(&ARTICLE_SELECTOR).next(),
            Self::ContainerClass => root.select(&CONTAINER_SELECTOR).find(|element| {
                element
                    .value()
                    .attr("class")
                    .is_some_and(|class| CONTAINER_CLASS_PATTERN.is_match(class))
            }),
            Self::Body => root.select(&BODY_SELECTOR).next(),
        }
    }
}

/// Selects the main content region of a document
///
/// Falls back to the document root when even `<body>` is missing, so a
/// region is always returned together with the strategy that produced it.
pub fn select_main_region(document: &Html) -> (RegionStrategy, ElementRef<'_>) {
    REGION_STRATEGIES
        .iter()
        .find_map(|strategy| strategy.locate(document).map(|element| (*strategy, element)))
        .unwrap_or((RegionStrategy::Body, document.root_element()))
}
