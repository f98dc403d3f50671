//! Client configuration
//!
//! Configuration is built either programmatically through
//! [`ClientConfig::builder`] or from `STAYFOLIO_*` environment variables with
//! [`ClientConfig::from_env`].
//!
//! # Example
//!
//! ```ignore
//! use stayfolio_client::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .api_base_url("https://api.stayfolio.example")
//!     .frontend_base_url("https://stayfolio.example")
//!     .build()?;
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;

/// Frontend origin used for share links when none is configured
pub const DEFAULT_FRONTEND_BASE_URL: &str = "http://localhost:5173";

/// Environment variable holding the remote API origin (required)
pub const ENV_API_BASE_URL: &str = "STAYFOLIO_API_BASE_URL";

/// Environment variable holding the frontend origin for share links
pub const ENV_FRONTEND_BASE_URL: &str = "STAYFOLIO_FRONTEND_BASE_URL";

/// Environment variable overriding the session file location
pub const ENV_SESSION_FILE: &str = "STAYFOLIO_SESSION_FILE";

/// Environment variable setting a per-request timeout in seconds
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "STAYFOLIO_REQUEST_TIMEOUT_SECS";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_base_url: String,
    frontend_base_url: String,
    session_file: Option<PathBuf>,
    request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Start building a configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from `STAYFOLIO_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub(crate) fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_base_url = lookup(ENV_API_BASE_URL).ok_or(ConfigError::Missing(ENV_API_BASE_URL))?;

        let mut builder = Self::builder().api_base_url(api_base_url);

        if let Some(frontend) = lookup(ENV_FRONTEND_BASE_URL).filter(|v| !v.trim().is_empty()) {
            builder = builder.frontend_base_url(frontend);
        }

        if let Some(path) = lookup(ENV_SESSION_FILE).filter(|v| !v.trim().is_empty()) {
            builder = builder.session_file(path);
        }

        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(ENV_REQUEST_TIMEOUT_SECS))?;
            if secs == 0 {
                return Err(ConfigError::Invalid(ENV_REQUEST_TIMEOUT_SECS));
            }
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Remote API origin, without a trailing slash
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Frontend origin used for share links, without a trailing slash
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    /// Explicit session file, if configured
    pub fn session_file(&self) -> Option<&Path> {
        self.session_file.as_deref()
    }

    /// Per-request timeout. `None` means requests may wait indefinitely.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    api_base_url: Option<String>,
    frontend_base_url: Option<String>,
    session_file: Option<PathBuf>,
    request_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the remote API origin, e.g. `https://api.example.com`
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the frontend origin used for share links
    #[must_use]
    pub fn frontend_base_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_base_url = Some(url.into());
        self
    }

    /// Persist the session token in this file
    #[must_use]
    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Abort requests that take longer than this
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_base_url = self
            .api_base_url
            .ok_or(ConfigError::Missing("api_base_url"))?;
        let api_base_url = normalize_origin(&api_base_url, "api_base_url")?;

        let frontend_base_url = normalize_origin(
            self.frontend_base_url
                .as_deref()
                .unwrap_or(DEFAULT_FRONTEND_BASE_URL),
            "frontend_base_url",
        )?;

        if self.request_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::Invalid("request_timeout"));
        }

        Ok(ClientConfig {
            api_base_url,
            frontend_base_url,
            session_file: self.session_file,
            request_timeout: self.request_timeout,
        })
    }
}

/// Require an absolute http(s) URL and strip trailing slashes
fn normalize_origin(raw: &str, field: &'static str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|_| ConfigError::Invalid(field))?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(ConfigError::Invalid(field));
    }
    Ok(trimmed.to_string())
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid value for configuration: {0}")]
    Invalid(&'static str),
}
