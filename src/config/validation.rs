use crate::config::types::{Config, CrawlerConfig, RenderConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound for `max-pages`
pub const MAX_PAGES_LIMIT: usize = 500;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_render_config(&config.render)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages > MAX_PAGES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-pages must be between 0 and {}, got {}",
            MAX_PAGES_LIMIT, config.max_pages
        )));
    }

    if config.page_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "page-timeout-ms must be >= 100ms, got {}ms",
            config.page_timeout_ms
        )));
    }

    if config.pacing_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "pacing-ms must be <= 60000ms, got {}ms",
            config.pacing_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    Ok(())
}

/// Validates render service configuration
fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    if let Some(endpoint) = &config.endpoint {
        let url = Url::parse(endpoint)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid render endpoint: {}", e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "render endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }
    }

    if let Some(api_key) = &config.api_key {
        if api_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "render api-key cannot be empty when set".to_string(),
            ));
        }
    }

    if config.timeout_ms <= config.wait_for_ms {
        return Err(ConfigError::Validation(format!(
            "render timeout-ms ({}) must exceed wait-for-ms ({})",
            config.timeout_ms, config.wait_for_ms
        )));
    }

    Ok(())
}
