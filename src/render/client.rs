use crate::config::RenderConfig;
use crate::render::{RenderError, RenderMetadata, RenderService, RenderedPage};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Header carrying the render service API key
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderRequest<'a> {
    url: &'a str,
    wait_for: u64,
    timeout: u64,
}

#[derive(Debug, Deserialize)]
struct RenderResponse {
    success: bool,
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    metadata: Option<RenderMetadata>,
    #[serde(default)]
    elapsed: Option<f64>,
}

/// HTTP client for the external render service
///
/// Sends `POST {endpoint}/render` with the API key header and a JSON body
/// `{ url, waitFor, timeout }`.
#[derive(Debug, Clone)]
pub struct RenderClient {
    client: Client,
    render_url: String,
    api_key: String,
    wait_for_ms: u64,
    timeout_ms: u64,
}

impl RenderClient {
    /// Builds a client from configuration
    ///
    /// Returns `None` unless both an endpoint and an API key are configured.
    pub fn from_config(config: &RenderConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }

        let endpoint = config.endpoint.as_deref()?.trim().trim_end_matches('/');
        let api_key = config.api_key.as_deref()?.trim();

        let client = match Client::builder().timeout(config.timeout()).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Failed to build render service client: {}", e);
                return None;
            }
        };

        Some(Self {
            client,
            render_url: format!("{}/render", endpoint),
            api_key: api_key.to_string(),
            wait_for_ms: config.wait_for_ms,
            timeout_ms: config.timeout_ms,
        })
    }

    /// The full URL render requests are sent to
    pub fn render_url(&self) -> &str {
        &self.render_url
    }

    async fn request(&self, url: &str) -> Result<RenderedPage, RenderError> {
        let body = RenderRequest {
            url,
            wait_for: self.wait_for_ms,
            timeout: self.timeout_ms,
        };

        let response = self
            .client
            .post(&self.render_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let parsed: RenderResponse = serde_json::from_slice(&bytes)
            .map_err(|e| RenderError::Malformed(e.to_string()))?;

        if !parsed.success {
            return Err(RenderError::Unsuccessful);
        }

        let html = parsed
            .html
            .filter(|h| !h.trim().is_empty())
            .ok_or(RenderError::MissingHtml)?;

        Ok(RenderedPage {
            html,
            metadata: parsed.metadata,
            elapsed_ms: parsed.elapsed.filter(|e| *e >= 0.0).map(|e| e as u64),
        })
    }
}

impl RenderService for RenderClient {
    async fn render(&self, url: &str) -> Result<RenderedPage, RenderError> {
        tracing::info!("Requesting rendered HTML for {}", url);

        let result = self.request(url).await;
        match &result {
            Ok(page) => tracing::debug!(
                "Render service returned {} bytes for {} ({:?}ms)",
                page.html.len(),
                url,
                page.elapsed_ms
            ),
            Err(e) => tracing::warn!("Render fallback failed for {}: {}", url, e),
        }
        result
    }
}
