//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a guarded redirect policy
//! - The traversal context (queue, visited set, budget)
//! - Overall crawl coordination
//! - The result data model handed to callers
//!
//! [`crawl_website`] is the convenience entry point; [`Coordinator`] is the
//! configurable one.

mod coordinator;
mod fetcher;
mod scheduler;
mod types;

pub use coordinator::{seeded_queue, Coordinator, DEFAULT_PACING};
pub use fetcher::{
    build_http_client, is_html_content_type, FetchResult, HttpFetcher, PageFetcher, ACCEPT_HTML,
    MAX_REDIRECTS,
};
pub use scheduler::TraversalContext;
pub use types::{
    CrawlProgress, CrawlReport, CrawlResult, CrawledPage, ProgressCallback, SpaWarning,
};

pub use crate::extract::PageMeta;

use crate::config::{Config, DEFAULT_MAX_PAGES};
use crate::extract::extract_text;
use crate::render::RenderClient;
use crate::url::is_private_url;
use crate::SurveyError;
use url::Url;

/// Crawls a site with default settings
///
/// Uses the default configuration plus the `RENDER_SERVICE_URL` /
/// `RENDER_SERVICE_API_KEY` environment overrides. Never fails: a private or
/// malformed seed yields an empty result with one error, and per-page
/// failures are collected in [`CrawlResult::errors`].
///
/// # Arguments
///
/// * `start_url` - Seed URL; only its origin is crawled
/// * `max_pages` - Maximum number of accepted pages (see [`DEFAULT_MAX_PAGES`])
/// * `on_progress` - Optional observer called before each fetch
///
/// # Example
///
/// ```no_run
/// use site_survey::crawl_website;
///
/// # async fn example() {
/// let result = crawl_website("https://example.com", 10, None).await;
/// for page in &result.pages {
///     println!("{}: {}", page.url, page.title);
/// }
/// # }
/// ```
pub async fn crawl_website(
    start_url: &str,
    max_pages: usize,
    on_progress: Option<ProgressCallback<'_>>,
) -> CrawlResult {
    let config = Config::from_env();
    match crawl_website_with_config(start_url, max_pages, &config, on_progress).await {
        Ok(report) => report.result,
        Err(e) => {
            tracing::error!("Could not start crawl of {}: {}", start_url, e);
            CrawlResult::rejected(e.to_string())
        }
    }
}

/// Crawls a site with the default page budget
pub async fn crawl_website_default(start_url: &str) -> CrawlResult {
    crawl_website(start_url, DEFAULT_MAX_PAGES, None).await
}

/// Crawls a site with an explicit configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran (it may still contain per-page errors)
/// * `Err(SurveyError)` - The HTTP client could not be built
pub async fn crawl_website_with_config(
    start_url: &str,
    max_pages: usize,
    config: &Config,
    on_progress: Option<ProgressCallback<'_>>,
) -> Result<CrawlReport, SurveyError> {
    let fetcher = HttpFetcher::new(&config.user_agent, config.crawler.page_timeout())?;
    let renderer = RenderClient::from_config(&config.render);

    if renderer.is_some() {
        tracing::debug!("Render fallback enabled");
    }

    let coordinator = Coordinator::new(fetcher, renderer).with_pacing(config.crawler.pacing());
    Ok(coordinator.run(start_url, max_pages, on_progress).await)
}

/// Fetches a LinkedIn company page and returns its visible text
///
/// Subject to the same private-address guard as the crawler. Returns `None`
/// on any failure. Uses the default user agent and page timeout; see
/// [`fetch_linkedin_preview_with_config`].
pub async fn fetch_linkedin_preview(url: &str) -> Option<String> {
    fetch_linkedin_preview_with_config(url, &Config::default()).await
}

/// [`fetch_linkedin_preview`] with the configured user agent and timeout
pub async fn fetch_linkedin_preview_with_config(url: &str, config: &Config) -> Option<String> {
    let fetcher = match preview_fetcher(config) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::warn!("Could not build LinkedIn preview client: {}", e);
            return None;
        }
    };
    preview_with(&fetcher, url).await
}

fn preview_fetcher(config: &Config) -> Result<HttpFetcher, reqwest::Error> {
    HttpFetcher::new(&config.user_agent, config.crawler.page_timeout())
}

/// [`fetch_linkedin_preview`] with a caller-supplied fetcher
pub async fn preview_with<F: PageFetcher>(fetcher: &F, url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    if is_private_url(&parsed) {
        tracing::warn!("Refusing LinkedIn preview of private address {}", url);
        return None;
    }

    match fetcher.fetch(&parsed).await {
        FetchResult::Success { body, .. } => {
            let text = extract_text(&body);
            (!text.is_empty()).then_some(text)
        }
        other => {
            if let Some(message) = other.failure_message(url) {
                tracing::debug!("LinkedIn preview failed: {}", message);
            }
            None
        }
    }
}
