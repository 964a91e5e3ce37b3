//! State module for tracking crawl progress
//!
//! Every candidate URL a crawl dequeues ends in exactly one [`PageState`].
//! The coordinator records these per URL so a run can be audited afterwards
//! (see [`crate::output::CrawlStatistics`]).

mod page_state;

pub use page_state::PageState;
