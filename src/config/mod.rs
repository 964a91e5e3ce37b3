//! Configuration module for Site-Survey
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a crawl with no config file runs on defaults plus
//! the `RENDER_SERVICE_URL` / `RENDER_SERVICE_API_KEY` environment overrides.
//!
//! # Example
//!
//! ```no_run
//! use site_survey::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site-survey.toml")).unwrap();
//! println!("Crawler will accept at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, RenderConfig, UserAgentConfig, DEFAULT_MAX_PAGES};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, parse_config, RENDER_API_KEY_ENV,
    RENDER_URL_ENV,
};
pub use validation::{validate, MAX_PAGES_LIMIT};
