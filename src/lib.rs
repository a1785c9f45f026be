//! Gist Proxy - A caching passthrough for the GitHub gist listing API
//!
//! Validates pagination, caches responses with TTL expiration and LRU
//! eviction, and translates upstream failures into uniform JSON errors.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{ProxyError, Result};
