//! GitHub gist listing client
//!
//! Issues the single outbound call the proxy makes and classifies its failures.

use std::time::Duration;

use reqwest::{header, Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ProxyError, Result};
use crate::models::PageParams;

/// Default base URL of the GitHub REST API
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Media type pinning the v3 REST API
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Default bound on a single outbound call
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for the `GET /users/{username}/gists` endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    /// HTTP client with timeout and user agent applied
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: Url,
}

impl UpstreamClient {
    /// Creates a client against `base_url`, failing on an unparsable URL or
    /// if the TLS backend cannot be initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ProxyError::InvalidConfig(format!("invalid upstream URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ProxyError::InvalidConfig(format!(
                "upstream URL cannot be a base: {base_url}"
            )));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProxyError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// URL of the gist listing for `username`, without query parameters.
    ///
    /// The username is percent-encoded as a single path segment.
    pub fn gists_url(&self, username: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["users", username, "gists"]);
        }
        url
    }

    /// Fetches one page of `username`'s gists.
    ///
    /// Single attempt. The decoded body is returned as-is, whatever its shape.
    pub async fn fetch_gists(&self, username: &str, params: PageParams) -> Result<Value> {
        let url = self.gists_url(username);
        debug!(%url, page = params.page, per_page = params.per_page, "fetching gists");

        let response = self
            .http_client
            .get(url)
            .query(&[("page", params.page), ("per_page", params.per_page)])
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| {
                warn!(username, error = %e, "upstream request failed");
                ProxyError::UpstreamUnreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(username, status = status.as_u16(), "upstream returned error status");
            return Err(ProxyError::UpstreamStatus(status.as_u16()));
        }

        response.json::<Value>().await.map_err(|e| {
            warn!(username, error = %e, "failed to read upstream body");
            if e.is_decode() {
                ProxyError::UpstreamPayload(e.to_string())
            } else {
                ProxyError::UpstreamUnreachable(e.to_string())
            }
        })
    }
}
