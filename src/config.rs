//! Application configuration
//!
//! Configuration is read from a YAML or JSON file (chosen by extension) and
//! every section falls back to defaults, so an empty file is a valid config.
//!
//! ```yaml
//! provider:
//!   kind: http
//!   base_url: http://127.0.0.1:8000
//!   requests_per_second: 10
//! loader:
//!   page_size: 20
//!   error_policy: retry_on_next_trigger
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::LoaderConfig;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Backend address used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where listing data comes from
    pub provider: ProviderConfig,

    /// Paginated loader settings
    pub loader: LoaderConfig,
}

impl AppConfig {
    /// Load configuration from a `.yaml`/`.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&contents)?,
            Some("json") => Self::from_json(&contents)?,
            _ => {
                return Err(Error::config(format!(
                    "Unsupported config format: {} (expected .yaml, .yml or .json)",
                    path.display()
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check values serde cannot check
    pub fn validate(&self) -> Result<()> {
        if self.loader.page_size == 0 {
            return Err(Error::invalid_value(
                "loader.page_size",
                "must be greater than 0",
            ));
        }

        match &self.provider {
            ProviderConfig::Http(http) => {
                let url = url::Url::parse(&http.base_url)?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(Error::invalid_value(
                        "provider.base_url",
                        format!("unsupported scheme '{}'", url.scheme()),
                    ));
                }
            }
            ProviderConfig::Fixture { path } => {
                if path.as_os_str().is_empty() {
                    return Err(Error::invalid_value("provider.path", "must not be empty"));
                }
            }
        }

        Ok(())
    }

    /// Point the HTTP provider at another backend
    pub fn override_base_url(&mut self, base_url: impl Into<String>) {
        let base_url = base_url.into();
        match &mut self.provider {
            ProviderConfig::Http(http) => http.base_url = base_url,
            ProviderConfig::Fixture { .. } => {
                self.provider = ProviderConfig::Http(HttpProviderConfig {
                    base_url,
                    ..HttpProviderConfig::default()
                });
            }
        }
    }

    /// Serve listings from a fixture file instead of the backend
    pub fn override_fixture(&mut self, path: impl Into<PathBuf>) {
        self.provider = ProviderConfig::Fixture { path: path.into() };
    }
}

// ============================================================================
// Provider Config
// ============================================================================

/// Listing data source, exactly one at a time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// REST backend
    Http(HttpProviderConfig),

    /// JSON array of listings on disk
    Fixture {
        /// Path to the fixture file
        path: PathBuf,
    },
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::Http(HttpProviderConfig::default())
    }
}

/// REST backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpProviderConfig {
    /// Backend base URL
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Retries per request inside the HTTP client
    pub max_retries: u32,

    /// Backoff strategy between retries
    pub backoff: BackoffType,

    /// First backoff delay in milliseconds
    pub initial_backoff_ms: u64,

    /// Backoff ceiling in milliseconds
    pub max_backoff_ms: u64,

    /// Client-side rate limit, 0 disables it
    pub requests_per_second: u32,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_retries: 3,
            backoff: BackoffType::Exponential,
            initial_backoff_ms: 100,
            max_backoff_ms: 60_000,
            requests_per_second: 10,
        }
    }
}

impl HttpProviderConfig {
    /// HTTP client configuration for these settings
    pub fn client_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );

        match RateLimiterConfig::per_second(self.requests_per_second) {
            Some(limit) => builder.rate_limit(limit).build(),
            None => builder.no_rate_limit().build(),
        }
    }
}
