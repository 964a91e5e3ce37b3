//! Error and placeholder page detection
//!
//! Many sites answer missing pages with HTTP 200 and a friendly "not found"
//! page. Those pages are noise for content analysis and are discarded.

use regex::Regex;
use std::sync::OnceLock;

/// Phrase matching only applies to pages with less text than this
pub const ERROR_PHRASE_TEXT_LIMIT: usize = 2000;

/// Title patterns, checked in order
const TITLE_PATTERNS: &[(&str, &str)] = &[
    ("status code", r"\b(?:404|403|410|500|502|503)\b"),
    ("not found", r"(?i)\bnot\s+found\b"),
    ("error", r"(?i)\berror\b"),
    ("sorry", r"(?i)\bsorry\b"),
    ("oops", r"(?i)\boops\b"),
    ("unavailable", r"(?i)\b(?:page|site|service)\s+(?:is\s+)?unavailable\b"),
    ("access denied", r"(?i)\baccess\s+denied\b|\bforbidden\b"),
];

/// Lowercase phrases that mark short pages as error pages
const ERROR_PHRASES: &[&str] = &[
    "page not found",
    "page you requested",
    "page you are looking for",
    "page you're looking for",
    "doesn't exist",
    "does not exist",
    "no longer available",
    "could not be found",
    "couldn't be found",
    "cannot be found",
    "can't be found",
    "oops!",
    "404 error",
    "error 404",
];

static TITLE_RES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();

fn title_res() -> &'static [(&'static str, Regex)] {
    TITLE_RES.get_or_init(|| {
        TITLE_PATTERNS
            .iter()
            .map(|(label, pattern)| {
                (
                    *label,
                    Regex::new(pattern).expect("error title patterns are valid"),
                )
            })
            .collect()
    })
}

/// Why a page was classified as an error page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPageReason {
    /// The title matched an error pattern
    Title(&'static str),

    /// A short page contained an error phrase
    Phrase(&'static str),
}

/// Classifies a page as an error/placeholder page
///
/// # Rules
///
/// 1. Title matches an error pattern (404, "not found", "error", "sorry", ...)
///    regardless of page length
/// 2. Text shorter than [`ERROR_PHRASE_TEXT_LIMIT`] characters contains an
///    error phrase ("page not found", "doesn't exist", "oops!", ...)
///
/// Longer pages are never matched on phrases alone.
pub fn classify_error_page(title: &str, text: &str) -> Option<ErrorPageReason> {
    if let Some((label, _)) = title_res().iter().find(|(_, re)| re.is_match(title)) {
        return Some(ErrorPageReason::Title(*label));
    }

    if text.chars().count() >= ERROR_PHRASE_TEXT_LIMIT {
        return None;
    }

    let lower = text.to_lowercase().replace('\u{2019}', "'");
    ERROR_PHRASES
        .iter()
        .find(|phrase| lower.contains(*phrase))
        .copied()
        .map(ErrorPageReason::Phrase)
}

/// Returns true if the page looks like an error or placeholder page
///
/// # Example
///
/// ```
/// use site_survey::classify::is_error_page;
///
/// assert!(is_error_page("404 Not Found", "Anything at all"));
/// assert!(is_error_page("Acme", "Oops! That page doesn't exist."));
/// assert!(!is_error_page("Acme", "We build widgets."));
/// ```
pub fn is_error_page(title: &str, text: &str) -> bool {
    classify_error_page(title, text).is_some()
}
