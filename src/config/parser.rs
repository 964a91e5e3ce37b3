use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable overriding `[render] endpoint`
pub const RENDER_URL_ENV: &str = "RENDER_SERVICE_URL";

/// Environment variable overriding `[render] api-key`
pub const RENDER_API_KEY_ENV: &str = "RENDER_SERVICE_API_KEY";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_survey::config::load_config;
///
/// let config = load_config(Path::new("site-survey.toml")).unwrap();
/// println!("Max pages: {}", config.crawler.max_pages);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 fingerprint of the configuration file content
///
/// Logged at startup so a crawl can be tied to the exact config it ran with.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

impl Config {
    /// Builds the default configuration with environment overrides applied
    ///
    /// Overrides that fail validation are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        match config.apply_env_overrides() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!("Ignoring render service environment overrides: {}", e);
                Self::default()
            }
        }
    }

    /// Replaces the render endpoint/key with `RENDER_SERVICE_URL` and
    /// `RENDER_SERVICE_API_KEY` when those are set and non-empty, then
    /// re-validates the whole configuration
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The overridden configuration is valid
    /// * `Err(ConfigError)` - An override produced an invalid configuration
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = non_empty(RENDER_URL_ENV) {
            self.render.endpoint = Some(endpoint);
        }
        if let Some(api_key) = non_empty(RENDER_API_KEY_ENV) {
            self.render.api_key = Some(api_key);
        }

        validate(self)
    }
}
