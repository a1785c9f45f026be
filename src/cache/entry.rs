//! Cache Entry Module
//!
//! Defines a single cached upstream payload together with its expiry deadline.

use std::time::{Duration, Instant};

use serde_json::Value;

use crate::cache::MAX_TTL_SECS;

// == Cache Entry ==
/// Represents a single cached upstream payload and its expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The decoded upstream payload
    pub value: Value,
    /// When the entry was inserted
    pub inserted_at: Instant,
    /// When the entry stops being visible to lookups
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` after now.
    pub fn new(value: Value, ttl: Duration) -> Self {
        Self::new_at(value, ttl, Instant::now())
    }

    /// Creates an entry inserted at `now`.
    ///
    /// `ttl` is clamped to [`MAX_TTL_SECS`], so the deadline is always
    /// representable.
    pub fn new_at(value: Value, ttl: Duration, now: Instant) -> Self {
        let ttl = ttl.min(Duration::from_secs(MAX_TTL_SECS));

        Self {
            value,
            inserted_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches the deadline, so a
    /// lookup exactly at `inserted_at + ttl` already misses.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against an explicit instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
