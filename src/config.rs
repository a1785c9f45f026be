//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::str::FromStr;

use reqwest::Url;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS, MAX_TTL_SECS};
use crate::error::{ProxyError, Result};
use crate::upstream::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Default HTTP listen port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of responses the cache can hold
    pub max_entries: usize,
    /// Lifetime of a cached response in seconds
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the GitHub REST API
    pub upstream_url: String,
    /// Timeout of one upstream call in seconds
    pub upstream_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum cached responses (default: 500)
    /// - `CACHE_TTL` - Cached response lifetime in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `UPSTREAM_URL` - GitHub API base URL (default: https://api.github.com)
    /// - `UPSTREAM_TIMEOUT` - Upstream call timeout in seconds (default: 10)
    ///
    /// Unparsable numbers fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            max_entries: env_or("CACHE_MAX_ENTRIES", DEFAULT_MAX_ENTRIES),
            cache_ttl: env_or("CACHE_TTL", DEFAULT_TTL_SECS),
            server_port: env_or("SERVER_PORT", DEFAULT_SERVER_PORT),
            upstream_url: env::var("UPSTREAM_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            upstream_timeout: env_or("UPSTREAM_TIMEOUT", DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Rejects values the proxy cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(ProxyError::InvalidConfig(
                "CACHE_MAX_ENTRIES must be positive".to_string(),
            ));
        }
        if self.cache_ttl == 0 {
            return Err(ProxyError::InvalidConfig(
                "CACHE_TTL must be positive".to_string(),
            ));
        }
        if self.cache_ttl > MAX_TTL_SECS {
            return Err(ProxyError::InvalidConfig(format!(
                "CACHE_TTL must not exceed {MAX_TTL_SECS}"
            )));
        }
        if self.upstream_timeout == 0 {
            return Err(ProxyError::InvalidConfig(
                "UPSTREAM_TIMEOUT must be positive".to_string(),
            ));
        }
        Url::parse(&self.upstream_url)
            .map_err(|e| ProxyError::InvalidConfig(format!("UPSTREAM_URL is invalid: {e}")))?;
        Ok(())
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            cache_ttl: DEFAULT_TTL_SECS,
            server_port: DEFAULT_SERVER_PORT,
            upstream_url: DEFAULT_BASE_URL.to_string(),
            upstream_timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}
