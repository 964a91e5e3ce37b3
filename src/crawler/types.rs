//! Crawl result data model
//!
//! These are the hand-off types for whatever analyzes the crawl. They
//! serialize with camelCase field names.

use crate::extract::PageMeta;
use crate::state::PageState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One accepted page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawledPage {
    /// Normalized URL (origin + path, no trailing slash)
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_headline: Option<String>,
    pub text_content: String,
    /// Same-origin links in document order
    pub outbound_links: Vec<String>,
    pub meta: PageMeta,
}

impl CrawledPage {
    /// Whitespace-separated word count of the text content
    pub fn word_count(&self) -> usize {
        self.text_content.split_whitespace().count()
    }
}

/// Attached when the crawl's first page looks client-rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaWarning {
    #[serde(rename = "isSPA")]
    pub is_spa: bool,
    pub indicators: Vec<String>,
    pub message: String,
}

impl SpaWarning {
    /// Warning for a page the render service could not (or was not asked to) render
    pub fn unrendered(indicators: Vec<String>) -> Self {
        Self {
            is_spa: true,
            indicators,
            message: "This site appears to be a single-page application; content may be \
                      incomplete because it could not be rendered."
                .to_string(),
        }
    }

    /// Warning for a page that still looks client-rendered after rendering
    pub fn still_incomplete(indicators: Vec<String>) -> Self {
        Self {
            is_spa: true,
            indicators,
            message: "This site appears to be a single-page application; it was rendered, \
                      but results may still be incomplete."
                .to_string(),
        }
    }
}

/// Everything one crawl produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Accepted pages in fetch order
    pub pages: Vec<CrawledPage>,
    #[serde(
        rename = "linkedInUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub linkedin_url: Option<String>,
    /// Human-readable per-page failures
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spa_warning: Option<SpaWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl CrawlResult {
    /// An empty result carrying a single error
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
            ..Self::default()
        }
    }
}

/// Progress snapshot emitted before each fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlProgress {
    /// Pages accepted so far
    pub crawled: usize,
    /// Distinct URLs seen so far (queued or visited)
    pub discovered: usize,
    /// URL about to be fetched
    pub current_url: String,
}

/// Observer for [`CrawlProgress`] updates
pub type ProgressCallback<'a> = &'a mut (dyn FnMut(&CrawlProgress) + Send);

/// A crawl result plus the bookkeeping behind it
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub result: CrawlResult,
    /// Terminal state of every dequeued candidate, in processing order
    pub outcomes: Vec<(String, PageState)>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Tallies outcomes by state
    pub fn outcome_counts(&self) -> BTreeMap<PageState, usize> {
        let mut counts = BTreeMap::new();
        for (_, state) in &self.outcomes {
            *counts.entry(*state).or_insert(0) += 1;
        }
        counts
    }

    /// Number of candidates that ended in `state`
    pub fn count(&self, state: PageState) -> usize {
        self.outcomes.iter().filter(|(_, s)| *s == state).count()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
