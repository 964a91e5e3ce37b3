//! Static crawl policy tables
//!
//! Two hand-curated lists steer traversal:
//! - priority paths, queued right after the seed so high-value pages are
//!   fetched before anything found organically
//! - skip patterns, which drop admin screens, assets, shopping flows, feeds
//!   and pagination before they are fetched or enqueued

use regex::RegexSet;
use std::sync::OnceLock;
use url::Url;

/// Paths queued immediately after the seed URL, in this order
pub const PRIORITY_PATHS: &[&str] = &[
    "/about",
    "/about-us",
    "/company",
    "/services",
    "/products",
    "/solutions",
    "/pricing",
    "/team",
    "/careers",
    "/contact",
    "/contact-us",
];

/// Patterns matched against a URL's path and query
const SKIP_PATTERNS: &[&str] = &[
    r"(?i)/wp-(admin|login|json|includes)(/|$|\.|\?)",
    r"(?i)/wp-content/uploads/",
    r"(?i)/(admin|administrator|login|logout|signin|sign-in|signup|sign-up|register|account|my-account)(/|$|\?)",
    r"(?i)/(cart|checkout|basket)(/|$|\?)",
    r"(?i)/(feed|rss|atom)(/|$|\?|\.xml)",
    r"(?i)/(tag|author)/",
    r"(?i)/page/\d+(/|$|\?)",
    r"(?i)[?&](page|paged|p)=\d+",
    r"(?i)/cdn-cgi/",
    r"(?i)\.(pdf|jpe?g|png|gif|svg|webp|ico|bmp|css|js|mjs|json|xml|txt|zip|gz|tar|rar|mp3|mp4|mov|avi|webm|woff2?|ttf|eot|docx?|xlsx?|pptx?|csv)($|\?)",
];

static SKIP_SET: OnceLock<RegexSet> = OnceLock::new();

fn skip_set() -> &'static RegexSet {
    SKIP_SET.get_or_init(|| RegexSet::new(SKIP_PATTERNS).expect("skip patterns are valid"))
}

/// Returns true if the URL matches any skip pattern
///
/// Only the path and query are inspected, so a host that happens to contain
/// "admin" is not skipped. The bare path is checked on its own as well, so a
/// query string never hides a match. Strings that do not parse as URLs are matched as
/// given.
///
/// # Examples
///
/// ```
/// use site_survey::url::is_skipped;
///
/// assert!(is_skipped("https://example.com/wp-admin/options.php"));
/// assert!(is_skipped("https://example.com/brochure.PDF"));
/// assert!(!is_skipped("https://admin.example.com/about"));
/// ```
pub fn is_skipped(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => is_skipped_url(&parsed),
        Err(_) => skip_set().is_match(url),
    }
}

/// Same as [`is_skipped`] for an already-parsed URL
pub fn is_skipped_url(url: &Url) -> bool {
    let path = url.path();
    if skip_set().is_match(path) {
        return true;
    }
    url.query()
        .is_some_and(|query| skip_set().is_match(&format!("{}?{}", path, query)))
}

/// Resolves every priority path against the start URL's origin
///
/// The returned URLs are already normalized.
pub fn priority_urls(start: &Url) -> Vec<String> {
    PRIORITY_PATHS
        .iter()
        .filter_map(|path| start.join(path).ok())
        .filter_map(|url| crate::url::normalize_parsed(&url).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_does_not_hide_skip_match() {
        assert!(is_skipped("https://a.com/brochure.pdf?v=2"));
        assert!(is_skipped("https://a.com/wp-admin?x=1"));
        assert!(is_skipped("https://a.com/cart?item=3"));
        assert!(is_skipped("https://a.com/blog?page=2"));
        assert!(!is_skipped("https://a.com/about?ref=nav"));
        // Unparseable input falls back to raw matching
        assert!(is_skipped("/wp-admin?x=1"));
        assert!(is_skipped("/files/report.pdf?download=1"));
    }

    #[test]
    fn test_skip_admin_and_auth() {
        assert!(is_skipped("https://a.com/wp-admin/"));
        assert!(is_skipped("https://a.com/wp-admin"));
        assert!(is_skipped("https://a.com/wp-login.php"));
        assert!(is_skipped("https://a.com/admin"));
        assert!(is_skipped("https://a.com/login"));
        assert!(is_skipped("https://a.com/my-account/orders"));
    }

    #[test]
    fn test_skip_assets() {
        assert!(is_skipped("https://a.com/files/report.pdf"));
        assert!(is_skipped("https://a.com/img/logo.PNG"));
        assert!(is_skipped("https://a.com/static/app.js"));
        assert!(is_skipped("https://a.com/styles/site.css"));
        assert!(is_skipped("https://a.com/sitemap.xml"));
    }

    #[test]
    fn test_skip_commerce_feeds_pagination() {
        assert!(is_skipped("https://a.com/cart"));
        assert!(is_skipped("https://a.com/checkout/step-1"));
        assert!(is_skipped("https://a.com/feed"));
        assert!(is_skipped("https://a.com/blog/feed/"));
        assert!(is_skipped("https://a.com/blog/page/2"));
        assert!(is_skipped("https://a.com/blog?page=3"));
        assert!(is_skipped("https://a.com/tag/rust/"));
    }

    #[test]
    fn test_content_pages_not_skipped() {
        assert!(!is_skipped("https://a.com"));
        assert!(!is_skipped("https://a.com/about"));
        assert!(!is_skipped("https://a.com/blog/administering-teams"));
        assert!(!is_skipped("https://a.com/pages/services"));
        assert!(!is_skipped("https://a.com/javascript-consulting"));
        assert!(!is_skipped("https://admin.a.com/about"));
    }

    #[test]
    fn test_priority_paths_never_skipped() {
        for path in PRIORITY_PATHS {
            let url = format!("https://a.com{}", path);
            assert!(!is_skipped(&url), "{} should not be skipped", url);
        }
    }

    #[test]
    fn test_priority_urls_use_origin() {
        let start = Url::parse("https://a.com/some/deep/page").unwrap();
        let urls = priority_urls(&start);

        assert_eq!(urls.len(), PRIORITY_PATHS.len());
        assert_eq!(urls[0], "https://a.com/about");
        assert!(urls.iter().all(|u| u.starts_with("https://a.com/")));
    }
}
