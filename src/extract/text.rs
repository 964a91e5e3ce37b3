//! Plain-text extraction
//!
//! Text is gathered from DOM text nodes, so HTML entities arrive already
//! decoded. Boilerplate containers are skipped entirely and whitespace is
//! collapsed to single spaces.

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text never counts as page content
const BOILERPLATE_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer",
];

/// Elements that are never visible, used for the SPA content estimate
const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts readable text from an HTML page
///
/// `<script>`, `<style>`, `<nav>`, `<header>` and `<footer>` blocks are
/// removed so repeated chrome does not dominate every page.
///
/// # Example
///
/// ```
/// use site_survey::extract::extract_text;
///
/// let html = "<html><body><nav>Menu</nav><p>Fish &amp; chips</p>\n\n<p>daily</p></body></html>";
/// assert_eq!(extract_text(html), "Fish & chips daily");
/// ```
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    text_from_document(&document)
}

pub(crate) fn text_from_document(document: &Html) -> String {
    collect_text(body_or_root(document), BOILERPLATE_ELEMENTS)
}

/// Estimates the text a visitor would see before any script runs
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    visible_text_from_document(&document)
}

pub(crate) fn visible_text_from_document(document: &Html) -> String {
    collect_text(body_or_root(document), INVISIBLE_ELEMENTS)
}

/// Extracts the text of the page footer
///
/// Prefers `<footer>` elements and falls back to anything whose class or id
/// mentions "footer". Returns `None` when no footer is found.
pub fn extract_footer_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    footer_text_from_document(&document)
}

pub(crate) fn footer_text_from_document(document: &Html) -> Option<String> {
    for selector in ["footer", "[class*='footer'], [id*='footer']"] {
        let Ok(selector) = Selector::parse(selector) else {
            continue;
        };

        let text = document
            .select(&selector)
            .map(|footer| collect_text(footer, INVISIBLE_ELEMENTS))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !text.is_empty() {
            return Some(text);
        }
    }

    None
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn body_or_root(document: &Html) -> ElementRef<'_> {
    Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element())
}

/// Joins every text node under `root`, skipping anything inside `excluded`
fn collect_text(root: ElementRef<'_>, excluded: &[&str]) -> String {
    let mut pieces: Vec<&str> = Vec::new();

    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let inside_excluded = node
            .ancestors()
            .filter_map(|ancestor| ancestor.value().as_element())
            .any(|element| excluded.contains(&element.name()));

        if !inside_excluded {
            pieces.push(text);
        }
    }

    collapse_whitespace(&pieces.join(" "))
}
