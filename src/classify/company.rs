//! Company-name inference from page metadata
//!
//! Sources are tried in a fixed order and the first usable answer wins:
//! `og:site_name`, then the page title, then a copyright notice in the
//! footer.

use crate::extract::UNTITLED_PAGE;
use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

const SITE_NAME_CHARS: RangeInclusive<usize> = 2..=99;
const TITLE_NAME_CHARS: RangeInclusive<usize> = 2..=49;
const COPYRIGHT_NAME_CHARS: RangeInclusive<usize> = 2..=49;

/// Title segments containing these words are page names, not company names
const GENERIC_TITLE_WORDS: &[&str] = &["home", "welcome"];

static TITLE_SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
static COPYRIGHT_RE: OnceLock<Regex> = OnceLock::new();

fn title_separator_re() -> &'static Regex {
    TITLE_SEPARATOR_RE
        .get_or_init(|| Regex::new(r"[|–—]|\s-\s").expect("title separator regex is valid"))
}

fn copyright_re() -> &'static Regex {
    COPYRIGHT_RE.get_or_init(|| {
        Regex::new(
            r"(?i:©|\(c\)|copyright)\s*(?:©\s*)?\d{4}(?:\s*[-–]\s*\d{4})?\s*,?\s*(.+?)\s*(?:\.|,|\bAll\b|\bInc\b|\bLLC\b|\bLtd\b|\bCorp\b|$)",
        )
        .expect("copyright regex is valid")
    })
}

/// The metadata company-name inference draws from
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanySignals<'a> {
    pub og_site_name: Option<&'a str>,
    pub title: Option<&'a str>,
    pub footer_text: Option<&'a str>,
}

type NameSource = fn(&CompanySignals<'_>) -> Option<String>;

/// Ordered sources; the first one that yields a name wins
const NAME_SOURCES: &[(&str, NameSource)] = &[
    ("og:site_name", from_site_name),
    ("title", from_title),
    ("copyright notice", from_copyright),
];

/// Infers the company name behind a site
///
/// # Example
///
/// ```
/// use site_survey::classify::{infer_company_name, CompanySignals};
///
/// let signals = CompanySignals {
///     og_site_name: None,
///     title: Some("Welcome to our site"),
///     footer_text: Some("© 2024 Acme Widgets Inc. All rights reserved."),
/// };
/// assert_eq!(infer_company_name(&signals).as_deref(), Some("Acme Widgets"));
/// ```
pub fn infer_company_name(signals: &CompanySignals<'_>) -> Option<String> {
    NAME_SOURCES.iter().find_map(|(source, rule)| {
        let name = rule(signals)?;
        tracing::debug!("Inferred company name {:?} from {}", name, source);
        Some(name)
    })
}

fn from_site_name(signals: &CompanySignals<'_>) -> Option<String> {
    let name = signals.og_site_name?.trim();
    within(name, &SITE_NAME_CHARS).then(|| name.to_string())
}

fn from_title(signals: &CompanySignals<'_>) -> Option<String> {
    let title = signals.title?.trim();
    if title == UNTITLED_PAGE {
        return None;
    }

    let first = title_separator_re().split(title).next()?.trim();
    let lower = first.to_lowercase();
    if GENERIC_TITLE_WORDS.iter().any(|word| lower.contains(word)) {
        return None;
    }

    within(first, &TITLE_NAME_CHARS).then(|| first.to_string())
}

fn from_copyright(signals: &CompanySignals<'_>) -> Option<String> {
    let footer = signals.footer_text?;
    let captures = copyright_re().captures(footer)?;
    let name = captures
        .get(1)?
        .as_str()
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | '-' | '|' | '©'));

    within(name, &COPYRIGHT_NAME_CHARS).then(|| name.to_string())
}

fn within(value: &str, range: &RangeInclusive<usize>) -> bool {
    range.contains(&value.chars().count())
}
