//! Link extraction for traversal and LinkedIn discovery

use crate::url::{is_skipped, is_skipped_url, normalize_parsed, same_origin};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

/// href prefixes that never lead to another page
const NON_PAGE_PREFIXES: &[&str] = &["#", "javascript:", "mailto:", "tel:", "data:"];

static LINKEDIN_COMPANY_RE: OnceLock<Regex> = OnceLock::new();

fn linkedin_company_re() -> &'static Regex {
    LINKEDIN_COMPANY_RE.get_or_init(|| {
        Regex::new(r"(?i)^https?://(?:[a-z]{2,3}\.)?linkedin\.com/company/[^/?#\s]+")
            .expect("linkedin regex is valid")
    })
}

/// Extracts all same-origin page links from an HTML document
///
/// # Link Rules
///
/// **Dropped:**
/// - fragment-only, `javascript:`, `mailto:`, `tel:` and `data:` links
/// - links that resolve to a different origin than `page_url`
/// - links matching a skip pattern (admin, assets, cart, feeds, pagination)
///
/// **Kept** links are normalized (origin + path, no trailing slash) and
/// deduplicated in order of first appearance.
///
/// # Example
///
/// ```
/// use site_survey::extract::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/about/">About</a><a href="https://other.com/">Other</a><a href="/about">Again</a>"#;
/// let page = Url::parse("https://example.com/").unwrap();
/// assert_eq!(extract_links(html, &page), vec!["https://example.com/about".to_string()]);
/// ```
pub fn extract_links(html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    links_from_document(&document, page_url, page_url)
}

/// Like [`extract_links`], resolving relative hrefs against `base` while
/// filtering on the origin of `page_url`
///
/// `base` is normally the response URL after redirects.
pub(crate) fn links_from_document(document: &Html, base: &Url, page_url: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(resolved) = resolve_page_link(href, base) else {
            continue;
        };

        if !same_origin(&resolved, page_url) || is_skipped_url(&resolved) {
            continue;
        }

        let Ok(normalized) = normalize_parsed(&resolved) else {
            continue;
        };

        if is_skipped(&normalized) {
            continue;
        }

        if seen.insert(normalized.clone()) {
            links.push(normalized);
        }
    }

    links
}

/// Returns the first LinkedIn company-page link on the page
///
/// Query strings and trailing path segments are dropped, so
/// `https://www.linkedin.com/company/acme/about?trk=x` becomes
/// `https://www.linkedin.com/company/acme`.
pub fn find_linkedin(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    linkedin_from_document(&document)
}

pub(crate) fn linkedin_from_document(document: &Html) -> Option<String> {
    let selector = Selector::parse("a[href]").ok()?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .find_map(|href| {
            linkedin_company_re()
                .find(href.trim())
                .map(|m| m.as_str().to_string())
        })
}

/// Resolves an href to an absolute HTTP(S) URL, or `None` for non-page links
fn resolve_page_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if NON_PAGE_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return None;
    }

    let resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}
