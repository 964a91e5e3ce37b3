//! Traversal state for a single crawl
//!
//! This module handles:
//! - The FIFO work queue, seeded with the start URL then priority paths
//! - The visited set (monotonically growing)
//! - The page budget
//! - The accumulating [`CrawlResult`] and per-URL outcomes
//!
//! Everything mutable about a crawl lives in one [`TraversalContext`], so the
//! coordinator's loop can be tested by asserting on the context it leaves
//! behind.

use crate::crawler::types::{CrawlProgress, CrawlResult, CrawledPage, SpaWarning};
use crate::state::PageState;
use std::collections::{HashSet, VecDeque};

/// Owned state of one breadth-first traversal
#[derive(Debug)]
pub struct TraversalContext {
    /// Candidates waiting to be processed, in FIFO order
    queue: VecDeque<String>,

    /// URLs currently waiting in `queue`
    queued: HashSet<String>,

    /// URLs already fetched or explicitly skipped
    visited: HashSet<String>,

    /// Maximum number of accepted pages
    max_pages: usize,

    /// Whether the first-page SPA check has run
    first_page_checked: bool,

    result: CrawlResult,
    outcomes: Vec<(String, PageState)>,
}

impl TraversalContext {
    /// Creates an empty context with the given page budget
    pub fn new(max_pages: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            max_pages,
            first_page_checked: false,
            result: CrawlResult::default(),
            outcomes: Vec::new(),
        }
    }

    /// Seeds the queue with the start URL, then every priority URL not
    /// already present
    ///
    /// Priority URLs always sit ahead of anything discovered later.
    pub fn seed(&mut self, start: &str, priority: impl IntoIterator<Item = String>) {
        self.push(start.to_string());
        for url in priority {
            self.push(url);
        }
        tracing::debug!("Seeded queue with {} URLs", self.queue.len());
    }

    fn push(&mut self, url: String) -> bool {
        if self.visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Returns true while there is budget left for another accepted page
    pub fn has_budget(&self) -> bool {
        self.result.pages.len() < self.max_pages
    }

    /// Pops the next candidate
    ///
    /// Returns `None` once the queue is empty or the page budget is spent.
    pub fn next_candidate(&mut self) -> Option<String> {
        if !self.has_budget() {
            return None;
        }
        let url = self.queue.pop_front()?;
        self.queued.remove(&url);
        Some(url)
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Marks a URL visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Enqueues links not already visited or queued
    ///
    /// # Returns
    ///
    /// The number of links actually added
    pub fn enqueue_links(&mut self, links: &[String]) -> usize {
        links
            .iter()
            .filter(|link| self.push((*link).clone()))
            .count()
    }

    /// Number of distinct URLs known to the crawl
    pub fn discovered_count(&self) -> usize {
        self.visited.len() + self.queued.len()
    }

    /// Number of candidates still waiting
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Snapshot of the queue, front first
    pub fn queued_urls(&self) -> Vec<String> {
        self.queue.iter().cloned().collect()
    }

    /// Progress snapshot for the given URL
    pub fn progress(&self, current_url: &str) -> CrawlProgress {
        CrawlProgress {
            crawled: self.result.pages.len(),
            discovered: self.discovered_count(),
            current_url: current_url.to_string(),
        }
    }

    /// Returns true exactly once: the first time it is called
    pub fn take_first_page(&mut self) -> bool {
        !std::mem::replace(&mut self.first_page_checked, true)
    }

    pub fn record(&mut self, url: String, state: PageState) {
        debug_assert!(state.is_terminal(), "recorded non-terminal state {:?}", state);
        tracing::trace!("{} -> {}", url, state.as_str());
        self.outcomes.push((url, state));
    }

    pub fn push_error(&mut self, error: String) {
        self.result.errors.push(error);
    }

    pub fn accept(&mut self, page: CrawledPage) {
        self.result.pages.push(page);
    }

    pub fn pages_accepted(&self) -> usize {
        self.result.pages.len()
    }

    /// Keeps the first LinkedIn URL found
    pub fn offer_linkedin(&mut self, url: Option<String>) {
        if self.result.linkedin_url.is_none() {
            self.result.linkedin_url = url;
        }
    }

    pub fn set_spa_warning(&mut self, warning: SpaWarning) {
        self.result.spa_warning = Some(warning);
    }

    pub fn set_company_name(&mut self, name: Option<String>) {
        if name.is_some() {
            self.result.company_name = name;
        }
    }

    pub fn result(&self) -> &CrawlResult {
        &self.result
    }

    pub fn outcomes(&self) -> &[(String, PageState)] {
        &self.outcomes
    }

    /// Consumes the context, yielding the result and outcomes
    pub fn finish(self) -> (CrawlResult, Vec<(String, PageState)>) {
        (self.result, self.outcomes)
    }
}
