//! Site-Survey: a bounded, SSRF-safe site crawler
//!
//! Given a single seed URL, this crate discovers and fetches a capped set of
//! same-origin pages, extracts clean text and structural signals from each,
//! and returns a [`CrawlResult`] ready to hand to a content-analysis step.
//!
//! The crawl never throws for per-page failures: transport errors are
//! recorded in [`CrawlResult::errors`], and client-rendered sites produce a
//! [`SpaWarning`] instead of an error.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod render;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Survey operations
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Refusing to crawl private or internal address: {url}")]
    PrivateAddress { url: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Site-Survey operations
pub type Result<T> = std::result::Result<T, SurveyError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    crawl_website, fetch_linkedin_preview, CrawlProgress, CrawlReport, CrawlResult, CrawledPage,
    PageMeta, SpaWarning,
};
pub use state::PageState;
pub use url::{is_private, normalize_url};
