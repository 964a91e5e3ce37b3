//! Title and primary-headline extraction

use crate::extract::text::collapse_whitespace;
use scraper::{ElementRef, Html, Selector};

/// Title used when a page has neither `<title>` nor `<h1>`
pub const UNTITLED_PAGE: &str = "Untitled Page";

/// Headlines shorter than this are checked against [`NAVIGATION_WORDS`]
const SHORT_HEADLINE_CHARS: usize = 30;

/// Words that mark a short headline as navigation chrome rather than content
const NAVIGATION_WORDS: &[&str] = &[
    "about", "contact", "menu", "home", "services", "blog", "login", "search", "navigation",
    "careers",
];

/// Containers whose headlines are usually site chrome
const CHROME_ELEMENTS: &[&str] = &["header", "nav", "footer"];

/// Extracts the page title
///
/// Falls back to the first `<h1>`, then to [`UNTITLED_PAGE`].
pub fn extract_title(html: &str) -> String {
    let document = Html::parse_document(html);
    title_from_document(&document)
}

pub(crate) fn title_from_document(document: &Html) -> String {
    first_text(document, "title")
        .or_else(|| first_text(document, "h1"))
        .unwrap_or_else(|| UNTITLED_PAGE.to_string())
}

/// Extracts the page's primary headline
///
/// # Selection Rules
///
/// 1. Candidates are the `<h1>` elements outside `<header>`, `<nav>` and
///    `<footer>`; if there are none, every `<h1>` is a candidate
/// 2. Short candidates containing a navigation word are filtered out
/// 3. The first remaining candidate wins
/// 4. If every candidate was filtered, the longest candidate wins
///
/// Returns `None` when the page has no non-empty `<h1>`.
pub fn extract_h1(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    h1_from_document(&document)
}

pub(crate) fn h1_from_document(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;

    let all: Vec<(String, bool)> = document
        .select(&selector)
        .map(|h1| (collapse_whitespace(&h1.text().collect::<String>()), in_chrome(h1)))
        .filter(|(text, _)| !text.is_empty())
        .collect();

    let outside_chrome: Vec<&String> = all
        .iter()
        .filter(|(_, chrome)| !chrome)
        .map(|(text, _)| text)
        .collect();

    let candidates: Vec<&String> = if outside_chrome.is_empty() {
        all.iter().map(|(text, _)| text).collect()
    } else {
        outside_chrome
    };

    if let Some(preferred) = candidates.iter().find(|text| !looks_like_navigation(text)) {
        return Some(preferred.to_string());
    }

    candidates
        .into_iter()
        .max_by_key(|text| text.chars().count())
        .cloned()
}

fn in_chrome(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(|ancestor| ancestor.value().as_element())
        .any(|ancestor| CHROME_ELEMENTS.contains(&ancestor.name()))
}

fn looks_like_navigation(headline: &str) -> bool {
    if headline.chars().count() >= SHORT_HEADLINE_CHARS {
        return false;
    }

    let lower = headline.to_lowercase();
    lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| NAVIGATION_WORDS.contains(&word))
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .find(|text| !text.is_empty())
}
