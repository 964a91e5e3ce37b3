//! Page classification heuristics
//!
//! Layered on top of [`crate::extract`]:
//! - SPA detection decides whether a page needs the render fallback
//! - error-page detection discards soft-404 and placeholder pages
//! - company-name inference reads site metadata
//!
//! Each heuristic is an ordered table of rules so the tie-break order can be
//! read (and tested) in one place.

mod company;
mod error_page;
mod spa;

pub use company::{infer_company_name, CompanySignals};
pub use error_page::{classify_error_page, is_error_page, ErrorPageReason, ERROR_PHRASE_TEXT_LIMIT};
pub use spa::{classify_signals, detect_spa, SpaDetection, SpaSignals, MIN_VISIBLE_CHARS};
