//! Breadth-first crawl frontier
//!
//! The frontier owns the FIFO queue of `(url, depth)` pairs still to be
//! processed and the set of URLs already visited. Seeds enter at depth 0 and
//! discovered links are only ever offered at `parent depth + 1`, which keeps
//! the traversal breadth-first.
//!
//! Invariants:
//! - a URL is present in the queue at most once at any time
//! - a URL is never offered again once it has been visited
//! - the visited set only grows

use crate::url::{canonicalize, ScopeFilter};
use std::collections::{HashSet, VecDeque};

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// Canonical URL to render
    pub url: String,

    /// BFS distance from the seed that led here
    pub depth: u32,
}

/// Queue, queued-set and visited-set of one crawl run
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<QueuedUrl>,
    queued: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues seed URLs at depth 0
    ///
    /// Each seed is canonicalized and must pass the scope filter's prefix,
    /// exclusion and extension rules. Seeds that fail are dropped with a
    /// warning since they usually point at a configuration mistake.
    ///
    /// # Returns
    ///
    /// The number of seeds actually enqueued
    pub fn seed(&mut self, urls: &[String], scope: &ScopeFilter) -> usize {
        let mut seeded = 0;

        for raw in urls {
            let url = match canonicalize(raw) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Ignoring seed {}: {}", raw, e);
                    continue;
                }
            };

            if !scope.admits(&url) {
                tracing::warn!("Ignoring seed {}: outside crawl scope", url);
                continue;
            }

            if self.enqueue(url, 0) {
                seeded += 1;
            }
        }

        seeded
    }

    /// Removes the oldest entry from the queue
    pub fn pop(&mut self) -> Option<QueuedUrl> {
        let next = self.queue.pop_front()?;
        self.queued.remove(&next.url);
        Some(next)
    }

    /// Offers a discovered URL at the given depth
    ///
    /// The URL is enqueued only if it is neither visited nor already queued.
    ///
    /// # Returns
    ///
    /// * `true` - The URL was enqueued
    /// * `false` - The offer was a no-op
    pub fn offer(&mut self, url: String, depth: u32) -> bool {
        if self.visited.contains(&url) {
            return false;
        }
        self.enqueue(url, depth)
    }

    /// Marks a URL as visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string())
    }

    /// Returns true if the URL has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns true if the URL is waiting in the queue
    pub fn is_queued(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    /// The set of visited URLs
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Number of visited URLs
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of queued URLs
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is left to process
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Consumes the frontier, yielding the visited set
    pub fn into_visited(self) -> HashSet<String> {
        self.visited
    }

    fn enqueue(&mut self, url: String, depth: u32) -> bool {
        if !self.queued.insert(url.clone()) {
            return false;
        }
        self.queue.push_back(QueuedUrl { url, depth });
        true
    }
}
