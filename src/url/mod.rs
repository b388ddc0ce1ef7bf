//! URL handling module for Sumi-Scribe
//!
//! This module provides link canonicalization (the dedup key of the crawl)
//! and the scope rules that decide which URLs may be queued.

mod normalize;
mod scope;

// Re-export main functions
pub use normalize::{canonicalize, normalize_link};
pub use scope::ScopeFilter;
