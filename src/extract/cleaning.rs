//! Noise stripping on the parsed DOM
//!
//! Removes structural chrome (scripts, styles, navigation, footers, sidebars,
//! no-script fallbacks, inline frames) and inline base64 images before any
//! text, link or Markdown extraction runs.

use scraper::{Html, Selector};
use std::sync::LazyLock;

// Hardcoded selectors should never fail to parse - if they do, it's a compile-time bug.

static NOISE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script, style, nav, footer, aside, noscript, iframe")
        .expect("BUG: hardcoded noise selector is invalid")
});

static DATA_URI_IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("img[src^='data:']").expect("BUG: hardcoded data-URI image selector is invalid")
});

/// Detaches every noise element and inline data-URI image from the document
///
/// Returns the number of subtrees removed.
pub fn strip_noise(document: &mut Html) -> usize {
    let removed = detach_matching(document, &NOISE_SELECTOR);
    let images = detach_matching(document, &DATA_URI_IMAGE_SELECTOR);

    if images > 0 {
        tracing::trace!("Dropped {} inline data-URI images", images);
    }

    removed + images
}

/// Detaches all elements matching `selector` together with their subtrees
fn detach_matching(document: &mut Html, selector: &Selector) -> usize {
    // Must collect before detaching because selection borrows the tree.
    // Only attached nodes are walked, so earlier passes stay removed.
    let ids: Vec<_> = document
        .root_element()
        .select(selector)
        .map(|element| element.id())
        .collect();

    let mut removed = 0;
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
            removed += 1;
        }
    }
    removed
}
