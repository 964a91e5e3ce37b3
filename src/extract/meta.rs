//! `<meta>` tag extraction
//!
//! Both `name=` and `property=` attributes are accepted for every key, since
//! sites mix them freely (`<meta name="og:title">` is common in the wild).

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// Descriptive metadata carried by a crawled page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// `<meta name="description">`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `<meta property="og:title">`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,

    /// `<meta property="og:description">`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
}

impl PageMeta {
    /// Returns true if no field is set
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.og_title.is_none() && self.og_description.is_none()
    }
}

/// Extracts description and Open Graph title/description
pub fn extract_meta(html: &str) -> PageMeta {
    let document = Html::parse_document(html);
    meta_from_document(&document)
}

pub(crate) fn meta_from_document(document: &Html) -> PageMeta {
    PageMeta {
        description: meta_content(document, "description"),
        og_title: meta_content(document, "og:title"),
        og_description: meta_content(document, "og:description"),
    }
}

/// Extracts `og:site_name`, used for company-name inference
pub fn extract_og_site_name(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    og_site_name_from_document(&document)
}

pub(crate) fn og_site_name_from_document(document: &Html) -> Option<String> {
    meta_content(document, "og:site_name")
}

/// Returns the trimmed `content` of the first `<meta>` whose name or
/// property equals `key` (case-insensitive)
fn meta_content(document: &Html, key: &str) -> Option<String> {
    let selector = Selector::parse("meta[content]").ok()?;

    document
        .select(&selector)
        .filter(|element| {
            let value = element.value();
            value
                .attr("property")
                .or_else(|| value.attr("name"))
                .is_some_and(|name| name.trim().eq_ignore_ascii_case(key))
        })
        .filter_map(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_all_meta_fields() {
        let html = r#"
            <head>
                <meta name="description" content="We make widgets.">
                <meta property="og:title" content="Acme Widgets">
                <meta property="og:description" content="Widgets for everyone">
            </head>
        "#;
        let meta = extract_meta(html);
        assert_eq!(meta.description.as_deref(), Some("We make widgets."));
        assert_eq!(meta.og_title.as_deref(), Some("Acme Widgets"));
        assert_eq!(meta.og_description.as_deref(), Some("Widgets for everyone"));
    }

    #[test]
    fn test_attribute_order_does_not_matter() {
        let html = r#"
            <head>
                <meta content="Content first" name="description">
                <meta content="OG first" property="og:title">
            </head>
        "#;
        let meta = extract_meta(html);
        assert_eq!(meta.description.as_deref(), Some("Content first"));
        assert_eq!(meta.og_title.as_deref(), Some("OG first"));
    }

    #[test]
    fn test_case_insensitive_keys_and_name_for_og() {
        let html = r#"<head><meta NAME="Description" content="Upper"><meta name="og:description" content="Via name"></head>"#;
        let meta = extract_meta(html);
        assert_eq!(meta.description.as_deref(), Some("Upper"));
        assert_eq!(meta.og_description.as_deref(), Some("Via name"));
    }

    #[test]
    fn test_decodes_entities_in_content() {
        let html = r#"<head><meta name="description" content="Fish &amp; Chips"></head>"#;
        assert_eq!(
            extract_meta(html).description.as_deref(),
            Some("Fish & Chips")
        );
    }

    #[test]
    fn test_missing_and_empty_meta() {
        let html = r#"<head><meta name="description" content="   "></head>"#;
        let meta = extract_meta(html);
        assert!(meta.is_empty());
    }

    #[test]
    fn test_og_site_name() {
        let html = r#"<head><meta property="og:site_name" content=" Acme Inc "></head>"#;
        assert_eq!(extract_og_site_name(html).as_deref(), Some("Acme Inc"));
        assert_eq!(extract_og_site_name("<head></head>"), None);
    }
}
