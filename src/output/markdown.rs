//! Markdown digest of a crawl result
//!
//! This module renders a human-readable summary of crawled pages, including
//! company metadata, SPA warnings, and per-page errors.

use crate::crawler::{CrawlResult, CrawledPage};
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Characters of page text shown per page
const EXCERPT_CHARS: usize = 280;

/// Writes a markdown digest of a crawl result
///
/// # Arguments
///
/// * `result` - The crawl result
/// * `output_path` - Path where the markdown file should be written
pub fn write_markdown_result(result: &CrawlResult, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_result(result);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl result as markdown
pub fn format_markdown_result(result: &CrawlResult) -> String {
    let mut md = String::new();

    // Title
    let heading = result
        .company_name
        .as_deref()
        .or_else(|| result.pages.first().map(|p| p.url.as_str()))
        .unwrap_or("Site");
    md.push_str(&format!("# Site Survey: {}\n\n", heading));

    // Overview
    md.push_str("## Overview\n\n");
    md.push_str(&format!("- **Pages Crawled**: {}\n", result.pages.len()));
    if let Some(company) = &result.company_name {
        md.push_str(&format!("- **Company**: {}\n", company));
    }
    if let Some(linkedin) = &result.linkedin_url {
        md.push_str(&format!("- **LinkedIn**: {}\n", linkedin));
    }
    md.push_str(&format!("- **Errors**: {}\n\n", result.errors.len()));

    // SPA warning
    if let Some(warning) = &result.spa_warning {
        md.push_str(&format!("> **Warning:** {}\n", warning.message));
        if !warning.indicators.is_empty() {
            md.push_str(">\n");
            for indicator in &warning.indicators {
                md.push_str(&format!("> - {}\n", indicator));
            }
        }
        md.push('\n');
    }

    // Pages
    if !result.pages.is_empty() {
        md.push_str("## Pages\n\n");
        for page in &result.pages {
            push_page(&mut md, page);
        }
    }

    // Errors
    if !result.errors.is_empty() {
        md.push_str("## Errors\n\n");
        for error in &result.errors {
            md.push_str(&format!("- {}\n", error));
        }
        md.push('\n');
    }

    md
}

fn push_page(md: &mut String, page: &CrawledPage) {
    md.push_str(&format!("### {}\n\n", page.title));
    md.push_str(&format!("- **URL**: {}\n", page.url));
    if let Some(headline) = &page.primary_headline {
        md.push_str(&format!("- **Headline**: {}\n", headline));
    }
    if let Some(description) = page
        .meta
        .description
        .as_ref()
        .or(page.meta.og_description.as_ref())
    {
        md.push_str(&format!("- **Description**: {}\n", description));
    }
    md.push_str(&format!("- **Words**: {}\n", page.word_count()));
    md.push_str(&format!("- **Links**: {}\n\n", page.outbound_links.len()));

    let excerpt = excerpt(&page.text_content, EXCERPT_CHARS);
    if !excerpt.is_empty() {
        md.push_str(&format!("{}\n\n", excerpt));
    }
}

fn excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    let trimmed = match cut.rfind(char::is_whitespace) {
        Some(idx) => &cut[..idx],
        None => cut.as_str(),
    };
    format!("{}…", trimmed.trim_end())
}
