//! Render fallback for client-rendered pages
//!
//! When the first page of a crawl looks like a single-page application, the
//! crawler can hand its URL to an external headless-rendering service and
//! continue with the rendered HTML instead. The service is optional; without
//! an endpoint and API key the fallback is simply absent.
//!
//! The [`RenderService`] trait is the seam the crawler depends on, so tests
//! can substitute a deterministic fake.

mod client;

pub use client::{RenderClient, API_KEY_HEADER};

use serde::Deserialize;
use std::future::Future;
use thiserror::Error;

/// Errors from the render service
///
/// Every variant is treated the same way by the crawler: the fallback is
/// considered unavailable and the SPA warning is kept.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("render service returned HTTP {0}")]
    Status(u16),

    #[error("render service returned a malformed response: {0}")]
    Malformed(String),

    #[error("render service reported failure")]
    Unsuccessful,

    #[error("render service returned no HTML")]
    MissingHtml,
}

/// Metadata the render service extracts from the rendered DOM
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderMetadata {
    pub title: Option<String>,
    pub og_site_name: Option<String>,
    pub og_title: Option<String>,
    pub description: Option<String>,
    pub h1: Option<String>,
    pub footer_text: Option<String>,
}

/// A successfully rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    pub metadata: Option<RenderMetadata>,
    /// Server-reported render time in milliseconds
    pub elapsed_ms: Option<u64>,
}

/// Something that can turn a URL into rendered HTML
pub trait RenderService {
    fn render(&self, url: &str) -> impl Future<Output = Result<RenderedPage, RenderError>> + Send;
}
