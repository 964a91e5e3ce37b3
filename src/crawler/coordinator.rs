//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Rejecting private seeds before any network activity
//! - Driving the [`TraversalContext`] queue
//! - Guarding, fetching, classifying, and extracting each page
//! - The first-page SPA check and render fallback
//! - Politeness pacing between fetches

use crate::classify::{classify_error_page, detect_spa, infer_company_name, CompanySignals};
use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::scheduler::TraversalContext;
use crate::crawler::types::{CrawlReport, CrawlResult, CrawledPage, ProgressCallback, SpaWarning};
use crate::extract::{extract_footer_text, extract_og_site_name, extract_page, extract_title};
use crate::render::{RenderClient, RenderMetadata, RenderService};
use crate::state::PageState;
use crate::url::{is_private_url, is_skipped_url, normalize_parsed, priority_urls};
use crate::SurveyError;
use chrono::Utc;
use std::time::Duration;
use url::Url;

/// Default delay between fetches
pub const DEFAULT_PACING: Duration = Duration::from_millis(100);

/// Main crawler coordinator structure
///
/// Generic over the page fetcher and render service so traversal can run
/// against in-memory fakes.
pub struct Coordinator<F, R = RenderClient> {
    fetcher: F,
    renderer: Option<R>,
    pacing: Duration,
}

impl<F: PageFetcher, R: RenderService> Coordinator<F, R> {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Fetches pages
    /// * `renderer` - Optional render fallback; `None` disables it
    pub fn new(fetcher: F, renderer: Option<R>) -> Self {
        Self {
            fetcher,
            renderer,
            pacing: DEFAULT_PACING,
        }
    }

    /// Sets the delay between fetches
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Runs the main crawl loop
    ///
    /// # Loop
    ///
    /// 1. Dequeue the next candidate; drop duplicates and skip-pattern matches
    /// 2. Mark it visited and report progress
    /// 3. Refuse private addresses, otherwise fetch
    /// 4. On the first fetched page, detect SPA and try the render fallback
    /// 5. Extract content; discard error pages, accept the rest
    /// 6. Enqueue newly discovered links, then pause for pacing
    ///
    /// Stops when the queue is empty or `max_pages` pages have been
    /// accepted. Per-page failures are recorded in the result, never
    /// returned.
    pub async fn run(
        &self,
        start_url: &str,
        max_pages: usize,
        mut on_progress: Option<ProgressCallback<'_>>,
    ) -> CrawlReport {
        let started_at = Utc::now();

        let start = match admit_start_url(start_url) {
            Ok(start) => start,
            Err(e) => {
                tracing::warn!("Rejected crawl of {}: {}", start_url, e);
                return CrawlReport {
                    result: CrawlResult::rejected(e.to_string()),
                    outcomes: vec![(start_url.to_string(), PageState::FetchBlockedPrivate)],
                    started_at,
                    finished_at: Utc::now(),
                };
            }
        };

        let mut ctx = TraversalContext::new(max_pages);
        ctx.seed(&start.normalized, priority_urls(&start.url));

        tracing::info!(
            "Starting crawl of {} (max {} pages, {} URLs seeded)",
            start.normalized,
            max_pages,
            ctx.queue_len()
        );

        while let Some(candidate) = ctx.next_candidate() {
            let Some((url, normalized)) = parse_candidate(&candidate) else {
                tracing::debug!("Skipping unparseable candidate {}", candidate);
                ctx.record(candidate, PageState::SkipFiltered);
                continue;
            };

            if ctx.is_visited(&normalized) {
                tracing::debug!("Already visited {}", normalized);
                ctx.record(normalized, PageState::VisitedDuplicate);
                continue;
            }

            if is_skipped_url(&url) {
                tracing::debug!("Skipping {} (matches skip pattern)", normalized);
                ctx.record(normalized, PageState::SkipFiltered);
                continue;
            }

            ctx.mark_visited(&normalized);

            let progress = ctx.progress(&normalized);
            if let Some(callback) = on_progress.as_deref_mut() {
                callback(&progress);
            }

            if is_private_url(&url) {
                tracing::warn!("Blocked private or internal URL {}", normalized);
                ctx.push_error(format!("Blocked private or internal URL: {}", normalized));
                ctx.record(normalized, PageState::FetchBlockedPrivate);
                continue;
            }

            let state = self.visit(&mut ctx, &url, &normalized).await;
            ctx.record(normalized, state);

            if !self.pacing.is_zero() && ctx.has_budget() && ctx.queue_len() > 0 {
                tokio::time::sleep(self.pacing).await;
            }
        }

        let (result, outcomes) = ctx.finish();
        let finished_at = Utc::now();

        tracing::info!(
            "Crawl of {} finished: {} pages, {} errors in {}ms",
            start.normalized,
            result.pages.len(),
            result.errors.len(),
            (finished_at - started_at).num_milliseconds()
        );

        CrawlReport {
            result,
            outcomes,
            started_at,
            finished_at,
        }
    }

    /// Fetches and processes one admitted URL, returning its terminal state
    async fn visit(&self, ctx: &mut TraversalContext, url: &Url, normalized: &str) -> PageState {
        match self.fetcher.fetch(url).await {
            FetchResult::Success {
                final_url, body, ..
            } => self.process_page(ctx, url, normalized, &final_url, body).await,

            FetchResult::NotHtml { content_type } => {
                tracing::debug!("Discarding {} (content type {:?})", normalized, content_type);
                PageState::NotHtml
            }

            failure if failure.is_not_found() => {
                tracing::debug!("Discarding {} (not found)", normalized);
                PageState::ErrorPageDiscarded
            }

            failure => {
                if let Some(message) = failure.failure_message(normalized) {
                    tracing::warn!("{}", message);
                    ctx.push_error(message);
                }
                PageState::FetchFailed
            }
        }
    }

    async fn process_page(
        &self,
        ctx: &mut TraversalContext,
        url: &Url,
        normalized: &str,
        final_url: &Url,
        body: String,
    ) -> PageState {
        let html = if ctx.take_first_page() {
            self.check_first_page(ctx, normalized, body).await
        } else {
            body
        };

        let extracted = extract_page(&html, final_url, url);

        if let Some(reason) = classify_error_page(&extracted.title, &extracted.text) {
            tracing::debug!("Discarding error page {} ({:?})", normalized, reason);
            return PageState::ErrorPageDiscarded;
        }

        ctx.offer_linkedin(extracted.linkedin_url);

        let added = ctx.enqueue_links(&extracted.links);
        ctx.accept(CrawledPage {
            url: normalized.to_string(),
            title: extracted.title,
            primary_headline: extracted.h1,
            text_content: extracted.text,
            outbound_links: extracted.links,
            meta: extracted.meta,
        });

        tracing::info!(
            "Crawled {} ({} pages, {} new links queued)",
            normalized,
            ctx.pages_accepted(),
            added
        );

        PageState::Accepted
    }

    /// Runs SPA detection on the first page and, if needed, the render
    /// fallback
    ///
    /// Returns the HTML snapshot to extract from. Also sets the company
    /// name and, when the page stays client-rendered, the SPA warning.
    async fn check_first_page(&self, ctx: &mut TraversalContext, url: &str, html: String) -> String {
        let detection = detect_spa(&html);
        if !detection.is_spa {
            ctx.set_company_name(company_from_html(&html));
            return html;
        }

        tracing::info!(
            "{} looks client-rendered ({}): {}",
            url,
            detection.matched_rule.unwrap_or("unknown rule"),
            detection.indicators.join(", ")
        );

        let Some(renderer) = &self.renderer else {
            tracing::debug!("No render service configured; keeping unrendered HTML");
            ctx.set_spa_warning(SpaWarning::unrendered(detection.indicators));
            ctx.set_company_name(company_from_html(&html));
            return html;
        };

        match renderer.render(url).await {
            Ok(rendered) => {
                let after = detect_spa(&rendered.html);
                if after.is_spa {
                    tracing::info!("{} still looks client-rendered after rendering", url);
                    ctx.set_spa_warning(SpaWarning::still_incomplete(after.indicators));
                } else {
                    tracing::info!("Render fallback resolved client-rendered content for {}", url);
                }

                let company = rendered
                    .metadata
                    .as_ref()
                    .and_then(company_from_metadata)
                    .or_else(|| company_from_html(&rendered.html));
                ctx.set_company_name(company);
                rendered.html
            }
            Err(_) => {
                ctx.set_spa_warning(SpaWarning::unrendered(detection.indicators));
                ctx.set_company_name(company_from_html(&html));
                html
            }
        }
    }
}

/// A seed URL that passed the entry guard
struct AdmittedStart {
    url: Url,
    normalized: String,
}

fn admit_start_url(start_url: &str) -> Result<AdmittedStart, SurveyError> {
    let refuse = || SurveyError::PrivateAddress {
        url: start_url.to_string(),
    };

    let url = Url::parse(start_url.trim()).map_err(|_| refuse())?;
    if is_private_url(&url) {
        return Err(refuse());
    }
    let normalized = normalize_parsed(&url)?;

    Ok(AdmittedStart { url, normalized })
}

/// The queue a crawl of `start_url` would begin with, without fetching
/// anything
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The normalized seed followed by the priority URLs
/// * `Err(SurveyError)` - The seed is private, internal, or malformed
pub fn seeded_queue(start_url: &str) -> Result<Vec<String>, SurveyError> {
    let start = admit_start_url(start_url)?;
    let mut ctx = TraversalContext::new(0);
    ctx.seed(&start.normalized, priority_urls(&start.url));
    Ok(ctx.queued_urls())
}

fn parse_candidate(candidate: &str) -> Option<(Url, String)> {
    let url = Url::parse(candidate).ok()?;
    let normalized = normalize_parsed(&url).ok()?;
    Some((url, normalized))
}

fn company_from_html(html: &str) -> Option<String> {
    let og_site_name = extract_og_site_name(html);
    let title = extract_title(html);
    let footer_text = extract_footer_text(html);

    infer_company_name(&CompanySignals {
        og_site_name: og_site_name.as_deref(),
        title: Some(&title),
        footer_text: footer_text.as_deref(),
    })
}

fn company_from_metadata(metadata: &RenderMetadata) -> Option<String> {
    infer_company_name(&CompanySignals {
        og_site_name: metadata.og_site_name.as_deref(),
        title: metadata.title.as_deref(),
        footer_text: metadata.footer_text.as_deref(),
    })
}
