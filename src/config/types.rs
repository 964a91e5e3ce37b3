use serde::Deserialize;
use std::time::Duration;

/// Default page budget per crawl
pub const DEFAULT_MAX_PAGES: usize = 25;

/// Main configuration structure for Site-Survey
///
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub render: RenderConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of accepted pages per crawl
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Timeout for each page fetch (milliseconds)
    #[serde(rename = "page-timeout-ms")]
    pub page_timeout_ms: u64,

    /// Delay between successive fetches (milliseconds)
    #[serde(rename = "pacing-ms")]
    pub pacing_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            page_timeout_ms: 5_000,
            pacing_ms: 100,
        }
    }
}

impl CrawlerConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SiteSurvey".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/site-survey/site-survey".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the user agent header
    ///
    /// Format: `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// External render service configuration
///
/// The fallback is only active when both `endpoint` and `api_key` are set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Base URL of the render service; requests go to `{endpoint}/render`
    pub endpoint: Option<String>,

    /// API key sent with every render request
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,

    /// How long the service waits for client-side rendering (milliseconds)
    #[serde(rename = "wait-for-ms")]
    pub wait_for_ms: u64,

    /// Overall render timeout (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            wait_for_ms: 3_000,
            timeout_ms: 30_000,
        }
    }
}

impl RenderConfig {
    /// Returns true if both endpoint and API key are present
    pub fn is_configured(&self) -> bool {
        self.endpoint.as_deref().is_some_and(|e| !e.trim().is_empty())
            && self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
