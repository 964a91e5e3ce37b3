//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building HTTP clients with the crawler's user agent
//! - A redirect policy that refuses private targets and long chains
//! - Content-Type filtering (HTML/XHTML only)
//! - Error classification into [`FetchResult`] variants
//!
//! The private-address check on the *requested* URL is the coordinator's
//! job; this module only guards redirect targets.

use crate::config::UserAgentConfig;
use crate::url::is_private_url;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{redirect, Client};
use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum redirect hops followed for one request
pub const MAX_REDIRECTS: usize = 5;

/// Accept header sent with every page request
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched an HTML page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch)
    NotHtml {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Non-2xx response
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Request exceeded its timeout
    Timeout {
        /// The timeout that elapsed, in milliseconds
        timeout_ms: u64,
    },

    /// Network error (connection refused, DNS, TLS, refused redirect, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true for 404/410 responses: the page simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpError { status_code: 404 | 410 })
    }

    /// Error string recorded in the crawl result, if this outcome is a failure
    ///
    /// Successful fetches and non-HTML responses produce no error.
    pub fn failure_message(&self, url: &str) -> Option<String> {
        match self {
            Self::Success { .. } | Self::NotHtml { .. } => None,
            Self::HttpError { status_code } => {
                Some(format!("Failed to fetch {}: HTTP {}", url, status_code))
            }
            Self::Timeout { timeout_ms } => Some(format!(
                "Failed to fetch {}: request timed out after {}ms",
                url, timeout_ms
            )),
            Self::NetworkError { error } => Some(format!("Failed to fetch {}: {}", url, error)),
        }
    }
}

/// Something that can fetch a page
///
/// The crawler is generic over this so traversal can be tested without a
/// network.
pub trait PageFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = FetchResult> + Send;
}

/// Reason a redirect was not followed
#[derive(Debug, Error)]
enum RedirectRefused {
    #[error("redirect to private or internal address refused: {0}")]
    PrivateTarget(String),

    #[error("too many redirects (more than {0})")]
    TooMany(usize),
}

fn redirect_policy() -> redirect::Policy {
    redirect::Policy::custom(|attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            return attempt.error(RedirectRefused::TooMany(MAX_REDIRECTS));
        }
        if is_private_url(attempt.url()) {
            let target = attempt.url().to_string();
            return attempt.error(RedirectRefused::PrivateTarget(target));
        }
        attempt.follow()
    })
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Overall per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_survey::config::UserAgentConfig;
/// use site_survey::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

    Client::builder()
        .user_agent(config.header_value())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(redirect_policy())
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a real HTTP client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher identifying itself with `user_agent`
    pub fn new(user_agent: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, timeout)?,
            user_agent: user_agent.header_value(),
            timeout,
        })
    }

    /// The User-Agent header sent with every request
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    fn classify_error(&self, e: reqwest::Error) -> FetchResult {
        if e.is_timeout() {
            return FetchResult::Timeout {
                timeout_ms: self.timeout_ms(),
            };
        }

        if let Some(refused) = find_redirect_refusal(&e) {
            return FetchResult::NetworkError {
                error: refused.to_string(),
            };
        }

        if e.is_connect() {
            FetchResult::NetworkError {
                error: "connection failed".to_string(),
            }
        } else {
            FetchResult::NetworkError {
                error: e.to_string(),
            }
        }
    }
}

fn find_redirect_refusal(e: &reqwest::Error) -> Option<&RedirectRefused> {
    let mut source = e.source();
    while let Some(err) = source {
        if let Some(refused) = err.downcast_ref::<RedirectRefused>() {
            return Some(refused);
        }
        source = err.source();
    }
    None
}

/// Returns true for `text/html` and XHTML content types
pub fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

impl PageFetcher for HttpFetcher {
    /// Fetches a URL with error classification
    ///
    /// # Request Flow
    ///
    /// 1. GET with the crawler user agent and an HTML-only Accept header
    /// 2. Follow up to [`MAX_REDIRECTS`] redirects, refusing private targets
    /// 3. Non-2xx → `HttpError`
    /// 4. Non-HTML Content-Type → `NotHtml`
    /// 5. Read the body
    ///
    /// There are no retries; a failure is reported once.
    async fn fetch(&self, url: &Url) -> FetchResult {
        tracing::debug!("Fetching {}", url);

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return self.classify_error(e),
        };

        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return FetchResult::HttpError {
                status_code: status.as_u16(),
            };
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_html_content_type(&content_type) {
            return FetchResult::NotHtml { content_type };
        }

        match response.text().await {
            Ok(body) => FetchResult::Success {
                final_url,
                status_code: status.as_u16(),
                body,
            },
            Err(e) => self.classify_error(e),
        }
    }
}
