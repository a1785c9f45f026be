//! API Handlers
//!
//! The gist listing handler: validate, look up, fetch on miss, render.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use axum::extract::{rejection::QueryRejection, Path, Query, State};
use tracing::debug;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{ListQuery, PrettyJson};
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers.
///
/// Built once at startup and injected into the router; tests build their own.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe response cache
    pub cache: Arc<RwLock<CacheStore>>,
    /// GitHub API client
    pub upstream: UpstreamClient,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(cache: CacheStore, upstream: UpstreamClient) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            upstream,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let cache = CacheStore::new(config.max_entries, config.cache_ttl)?;
        let upstream = UpstreamClient::new(
            &config.upstream_url,
            Duration::from_secs(config.upstream_timeout),
        )?;
        Ok(Self::new(cache, upstream))
    }
}

/// Handler for GET /:username
///
/// Serves a page of the user's gists, from the cache when a fresh copy exists.
pub async fn list_gists_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<PrettyJson> {
    let Query(query) =
        query.map_err(|rejection| ProxyError::validation("query", rejection.body_text()))?;
    let params = query.validate()?;
    let key = params.cache_key(&username);

    // Lock is released before the upstream call
    let cached = state.cache.write().await.get(&key);
    if let Some(value) = cached {
        debug!(%key, "cache hit");
        return Ok(PrettyJson(value));
    }

    debug!(%key, "cache miss");
    let value = state.upstream.fetch_gists(&username, params).await?;

    let stats = {
        let mut cache = state.cache.write().await;
        cache.put(key, value.clone());
        cache.stats()
    };
    debug!(
        entries = stats.total_entries,
        hit_rate = stats.hit_rate(),
        "cached upstream response"
    );

    Ok(PrettyJson(value))
}
