//! Content extraction from raw HTML
//!
//! Every function here is pure and deterministic: the same markup always
//! produces the same output. Each public `extract_*` function parses its
//! input on its own; [`extract_page`] parses once and runs them all, which
//! is what the crawler uses.

mod headings;
mod links;
mod meta;
mod text;

pub use headings::{extract_h1, extract_title, UNTITLED_PAGE};
pub use links::{extract_links, find_linkedin};
pub use meta::{extract_meta, extract_og_site_name, PageMeta};
pub use text::{collapse_whitespace, extract_footer_text, extract_text, visible_text};

pub(crate) use text::visible_text_from_document;

use scraper::Html;
use url::Url;

/// Everything extracted from one HTML snapshot
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    /// Page title (never empty; see [`extract_title`])
    pub title: String,

    /// Primary headline
    pub h1: Option<String>,

    /// Boilerplate-free text content
    pub text: String,

    /// Same-origin, normalized, deduplicated links
    pub links: Vec<String>,

    /// Description and Open Graph fields
    pub meta: PageMeta,

    /// `og:site_name`
    pub og_site_name: Option<String>,

    /// Footer text
    pub footer_text: Option<String>,

    /// First LinkedIn company-page link
    pub linkedin_url: Option<String>,
}

/// Runs every extractor over one HTML document
///
/// # Arguments
///
/// * `html` - The raw markup
/// * `base` - URL used to resolve relative links (the response URL)
/// * `page_url` - The normalized page URL; only links sharing its origin
///   are kept
pub fn extract_page(html: &str, base: &Url, page_url: &Url) -> ExtractedPage {
    let document = Html::parse_document(html);

    ExtractedPage {
        title: headings::title_from_document(&document),
        h1: headings::h1_from_document(&document),
        text: text::text_from_document(&document),
        links: links::links_from_document(&document, base, page_url),
        meta: meta::meta_from_document(&document),
        og_site_name: meta::og_site_name_from_document(&document),
        footer_text: text::footer_text_from_document(&document),
        linkedin_url: links::linkedin_from_document(&document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_page_combines_all_fields() {
        let html = r#"
            <html>
            <head>
                <title>Acme Widgets | Home</title>
                <meta name="description" content="Widgets and more">
                <meta property="og:site_name" content="Acme">
            </head>
            <body>
                <nav><a href="/about">About</a><a href="/contact/">Contact</a></nav>
                <main>
                    <h1>Industrial widgets, delivered</h1>
                    <p>We ship widgets worldwide.</p>
                    <a href="https://www.linkedin.com/company/acme">Follow us</a>
                </main>
                <footer>© 2024 Acme Widgets Inc. All rights reserved.</footer>
            </body>
            </html>
        "#;
        let url = Url::parse("https://acme.example").unwrap();
        let page = extract_page(html, &url, &url);

        assert_eq!(page.title, "Acme Widgets | Home");
        assert_eq!(page.h1.as_deref(), Some("Industrial widgets, delivered"));
        assert_eq!(
            page.text,
            "Industrial widgets, delivered We ship widgets worldwide. Follow us"
        );
        assert_eq!(
            page.links,
            vec!["https://acme.example/about", "https://acme.example/contact"]
        );
        assert_eq!(page.meta.description.as_deref(), Some("Widgets and more"));
        assert_eq!(page.og_site_name.as_deref(), Some("Acme"));
        assert_eq!(
            page.footer_text.as_deref(),
            Some("© 2024 Acme Widgets Inc. All rights reserved.")
        );
        assert_eq!(
            page.linkedin_url.as_deref(),
            Some("https://www.linkedin.com/company/acme")
        );
    }
}
