//! Dashboard configuration.
//!
//! Settings come from an optional YAML file, then command-line flags and
//! environment variables override individual values:
//!
//! ```yaml
//! endpoint: "https://analysis.example.com/analyze/"
//! timeout_secs: 60
//! preview_count: 3
//! summary_preview_chars: 100
//! ```
//!
//! Every key is optional.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Endpoint used when neither the config file nor the CLI names one.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/analyze/";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// URL the topic is POSTed to.
    pub endpoint: String,
    /// Request timeout in seconds, at least 1. `None` keeps the HTTP client's default.
    pub timeout_secs: Option<u64>,
    /// Records shown in the overview preview.
    pub preview_count: usize,
    /// Characters of summary shown in the breakdown table.
    pub summary_preview_chars: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            preview_count: 3,
            summary_preview_chars: 100,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `path`, or defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: shown.clone(),
            source,
        })?;
        config.timeout()?;
        info!(path = %shown, endpoint = %config.endpoint, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to `null`, which `#[serde(default)]` does not cover.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Apply command-line / environment overrides on top of the file values.
    pub fn with_overrides(mut self, endpoint: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    /// The per-request timeout. A zero timeout would fail every request, so it is rejected.
    pub fn timeout(&self) -> Result<Option<Duration>, ConfigError> {
        match self.timeout_secs {
            Some(0) => Err(ConfigError::ZeroTimeout),
            secs => Ok(secs.map(Duration::from_secs)),
        }
    }

    /// The endpoint as a validated HTTP(S) URL.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|source| ConfigError::Endpoint {
            endpoint: self.endpoint.clone(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::Scheme(other.to_string())),
        }
    }
}
