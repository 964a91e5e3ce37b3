//! Statistics generation from a crawl report
//!
//! This module provides functionality for summarizing and displaying what a
//! crawl did: how many candidates ended in each state, how much text was
//! collected, and how long it took.

use crate::crawler::CrawlReport;
use crate::state::PageState;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Number of pages accepted into the result
    pub pages_accepted: usize,

    /// Number of candidates dequeued (every outcome)
    pub candidates_processed: usize,

    /// Count of candidates by terminal state
    pub outcomes: BTreeMap<PageState, usize>,

    /// Number of error strings recorded
    pub total_errors: usize,

    /// Total words across accepted pages
    pub total_words: usize,

    /// Total same-origin links across accepted pages
    pub total_links: usize,

    /// Whether the SPA warning was attached
    pub spa_warning: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlStatistics {
    /// Computes statistics for a finished crawl
    pub fn from_report(report: &CrawlReport) -> Self {
        let result = &report.result;

        Self {
            pages_accepted: result.pages.len(),
            candidates_processed: report.outcomes.len(),
            outcomes: report.outcome_counts(),
            total_errors: result.errors.len(),
            total_words: result.pages.iter().map(|p| p.word_count()).sum(),
            total_links: result.pages.iter().map(|p| p.outbound_links.len()).sum(),
            spa_warning: result.spa_warning.is_some(),
            started_at: report.started_at,
            finished_at: report.finished_at,
        }
    }

    /// Candidates dropped before any fetch
    pub fn skipped(&self) -> usize {
        self.count_where(PageState::is_skipped)
    }

    /// Candidates that were blocked or failed to fetch
    pub fn failed(&self) -> usize {
        self.count_where(PageState::is_error)
    }

    fn count_where(&self, pred: impl Fn(&PageState) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|(state, _)| pred(state))
            .map(|(_, count)| count)
            .sum()
    }

    /// Wall-clock duration of the crawl in milliseconds
    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    /// Share of fetched candidates that were accepted, in percent
    pub fn acceptance_rate(&self) -> f64 {
        let fetched = self.count_where(PageState::was_fetched);

        if fetched == 0 {
            0.0
        } else {
            (self.pages_accepted as f64 / fetched as f64) * 100.0
        }
    }
}

/// Formats statistics as plain text
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Crawl Statistics ===\n");

    let _ = writeln!(out, "Overview:");
    let _ = writeln!(out, "  Pages accepted: {}", stats.pages_accepted);
    let _ = writeln!(out, "  Candidates processed: {}", stats.candidates_processed);
    let _ = writeln!(out, "  Skipped before fetch: {}", stats.skipped());
    let _ = writeln!(out, "  Failed or blocked: {}", stats.failed());
    let _ = writeln!(out, "  Errors recorded: {}", stats.total_errors);
    let _ = writeln!(out, "  Total words: {}", stats.total_words);
    let _ = writeln!(out, "  Total links: {}", stats.total_links);
    if stats.spa_warning {
        let _ = writeln!(out, "  SPA warning: yes");
    }
    let _ = writeln!(
        out,
        "  Started: {}",
        stats.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "  Elapsed: {}ms", stats.elapsed_ms());
    let _ = writeln!(out);

    if !stats.outcomes.is_empty() {
        let _ = writeln!(out, "Candidates by State:");
        // Sort states by count (descending)
        let mut state_counts: Vec<_> = stats.outcomes.iter().collect();
        state_counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

        for (state, count) in state_counts {
            let percentage = if stats.candidates_processed > 0 {
                (*count as f64 / stats.candidates_processed as f64) * 100.0
            } else {
                0.0
            };
            let _ = writeln!(out, "  {}: {} ({:.1}%)", state, count, percentage);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "Acceptance Rate: {:.1}% of fetched pages",
        stats.acceptance_rate()
    );

    out
}

/// Prints statistics to stderr in a formatted manner
///
/// Stdout is reserved for the crawl result itself.
pub fn print_statistics(stats: &CrawlStatistics) {
    eprint!("{}", format_statistics(stats));
}
