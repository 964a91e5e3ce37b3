//! Output module for rendering crawl results
//!
//! This module handles:
//! - Serializing a [`CrawlResult`] as camelCase JSON (the hand-off format)
//! - Rendering a human-readable Markdown digest
//! - Computing and printing crawl statistics
//! - Writing output to a file or stdout

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_result, write_markdown_result};
pub use stats::{format_statistics, print_statistics, CrawlStatistics};

use crate::crawler::CrawlResult;
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Format of the rendered crawl result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Markdown digest
    Markdown,
}

/// Renders a crawl result in the requested format
pub fn render_result(result: &CrawlResult, format: OutputFormat) -> OutputResult<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(result)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Markdown => Ok(format_markdown_result(result)),
    }
}

/// Writes rendered output to `path`, or stdout when no path is given
pub fn write_output(content: &str, path: Option<&Path>) -> OutputResult<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!("Wrote output to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}
