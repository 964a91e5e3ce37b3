//! URL handling module for Site-Survey
//!
//! This module provides URL normalization, the SSRF safety guard, host
//! pattern matching and the static crawl policy (priority paths and skip
//! patterns).

mod guard;
mod matcher;
mod normalize;
mod policy;

pub use guard::{is_private, is_private_url};
pub use matcher::matches_host_pattern;
pub use normalize::{normalize_parsed, normalize_url, same_origin};
pub use policy::{is_skipped, is_skipped_url, priority_urls, PRIORITY_PATHS};
