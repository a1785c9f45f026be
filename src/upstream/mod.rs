//! Upstream Module
//!
//! Outbound access to the GitHub REST API.

mod client;

pub use client::{UpstreamClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, GITHUB_ACCEPT};
