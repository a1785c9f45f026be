//! Cache Store Module
//!
//! Response cache combining LRU ordering and TTL expiration in a single
//! bounded map. Each entry carries its own deadline, which is checked lazily
//! when the entry is read.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, MAX_TTL_SECS};
use crate::error::{ProxyError, Result};

// == Cache Store ==
/// Bounded, time-expiring store of upstream payloads keyed by request fingerprint.
#[derive(Debug)]
pub struct CacheStore {
    /// Entries ordered from most to least recently used
    entries: LruCache<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Lifetime of every entry from its (re)insertion
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` entries, each
    /// visible for `ttl_secs` seconds after insertion.
    ///
    /// Fails if either bound is zero or the TTL exceeds [`MAX_TTL_SECS`].
    pub fn new(max_entries: usize, ttl_secs: u64) -> Result<Self> {
        Self::with_ttl(max_entries, Duration::from_secs(ttl_secs))
    }

    /// Like [`new`](Self::new) with a sub-second TTL granularity.
    pub fn with_ttl(max_entries: usize, ttl: Duration) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_entries).ok_or_else(|| {
            ProxyError::InvalidConfig("cache capacity must be positive".to_string())
        })?;
        if ttl.is_zero() {
            return Err(ProxyError::InvalidConfig(
                "cache TTL must be positive".to_string(),
            ));
        }
        if ttl > Duration::from_secs(MAX_TTL_SECS) {
            return Err(ProxyError::InvalidConfig(format!(
                "cache TTL must not exceed {MAX_TTL_SECS} seconds"
            )));
        }

        Ok(Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::new(),
            ttl,
        })
    }

    // == Get ==
    /// Returns a copy of the cached payload if present and not expired.
    ///
    /// A hit promotes the entry to most recently used without touching its
    /// deadline. An expired entry is dropped and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        self.get_at(key, Instant::now())
    }

    /// [`get`](Self::get) evaluated at `now`.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<Value> {
        let expired = match self.entries.peek(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.pop(key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Put ==
    /// Inserts or overwrites `key`, restarting its expiry clock.
    ///
    /// When a new key arrives at capacity, the least recently used entry is
    /// evicted first.
    pub fn put(&mut self, key: String, value: Value) {
        self.put_at(key, value, Instant::now());
    }

    /// [`put`](Self::put) with the entry inserted at `now`.
    pub fn put_at(&mut self, key: String, value: Value, now: Instant) {
        let replacing = self.entries.contains(&key);
        let entry = CacheEntry::new_at(value, self.ttl, now);

        if let Some((evicted_key, _)) = self.entries.push(key, entry) {
            if !replacing {
                debug!(key = %evicted_key, "evicted least recently used entry");
                self.stats.record_eviction();
            }
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of resident entries, expired ones included until they are read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Whether `key` is resident, without affecting recency or expiry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(max_entries: usize) -> CacheStore {
        CacheStore::new(max_entries, 300).unwrap()
    }

    #[test]
    fn test_store_new() {
        let store = store(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
    }

    #[test]
    fn test_store_rejects_zero_capacity() {
        assert!(matches!(
            CacheStore::new(0, 300),
            Err(ProxyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_store_rejects_zero_ttl() {
        assert!(matches!(
            CacheStore::new(10, 0),
            Err(ProxyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = store(100);

        store.put("octocat-1-30".to_string(), json!([{"id": "abc"}]));

        assert_eq!(store.get("octocat-1-30"), Some(json!([{"id": "abc"}])));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store(100);
        assert_eq!(store.get("nobody-1-30"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = store(100);

        store.put("key".to_string(), json!(1));
        store.put("key".to_string(), json!(2));

        assert_eq!(store.get("key"), Some(json!(2)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_rejects_oversized_ttl() {
        assert!(matches!(
            CacheStore::new(500, u64::MAX),
            Err(ProxyError::InvalidConfig(_))
        ));
        assert!(CacheStore::new(500, MAX_TTL_SECS + 1).is_err());
        assert!(CacheStore::new(500, MAX_TTL_SECS).is_ok());
    }

    #[test]
    fn test_store_put_with_max_ttl() {
        let mut store = CacheStore::new(500, MAX_TTL_SECS).unwrap();

        store.put("k".to_string(), json!(1));

        assert_eq!(store.get("k"), Some(json!(1)));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::with_ttl(100, Duration::from_millis(50)).unwrap();
        let start = Instant::now();

        store.put_at("key".to_string(), json!("v"), start);
        assert!(store.get_at("key", start + Duration::from_millis(49)).is_some());

        assert_eq!(store.get_at("key", start + Duration::from_millis(50)), None);
        assert!(!store.contains("key"), "expired entry is dropped on read");
        assert_eq!(store.stats().expirations, 1);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_overwrite_resets_expiry() {
        let mut store = CacheStore::with_ttl(100, Duration::from_millis(200)).unwrap();
        let start = Instant::now();

        store.put_at("key".to_string(), json!("old"), start);
        store.put_at(
            "key".to_string(),
            json!("new"),
            start + Duration::from_millis(120),
        );

        assert_eq!(
            store.get_at("key", start + Duration::from_millis(240)),
            Some(json!("new"))
        );
        assert_eq!(store.get_at("key", start + Duration::from_millis(320)), None);
    }

    #[test]
    fn test_store_get_does_not_extend_expiry() {
        let mut store = CacheStore::with_ttl(100, Duration::from_millis(200)).unwrap();
        let start = Instant::now();

        store.put_at("key".to_string(), json!("v"), start);
        assert!(store.get_at("key", start + Duration::from_millis(120)).is_some());

        assert_eq!(store.get_at("key", start + Duration::from_millis(240)), None);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = store(3);

        store.put("key1".to_string(), json!(1));
        store.put("key2".to_string(), json!(2));
        store.put("key3".to_string(), json!(3));

        // Cache is full, adding key4 should evict key1 (oldest)
        store.put("key4".to_string(), json!(4));

        assert_eq!(store.len(), 3);
        assert!(!store.contains("key1"));
        assert!(store.contains("key2"));
        assert!(store.contains("key3"));
        assert!(store.contains("key4"));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = store(3);

        store.put("key1".to_string(), json!(1));
        store.put("key2".to_string(), json!(2));
        store.put("key3".to_string(), json!(3));

        // Access key1 to make it most recently used
        store.get("key1").unwrap();

        // Adding key4 should evict key2 (now oldest)
        store.put("key4".to_string(), json!(4));

        assert!(store.contains("key1"));
        assert!(!store.contains("key2"));
    }

    #[test]
    fn test_store_contains_does_not_touch() {
        let mut store = store(2);

        store.put("a".to_string(), json!(1));
        store.put("b".to_string(), json!(2));
        assert!(store.contains("a"));

        store.put("c".to_string(), json!(3));

        assert!(!store.contains("a"));
    }

    #[test]
    fn test_store_stats() {
        let mut store = store(100);

        store.put("key1".to_string(), json!(1));
        store.get("key1").unwrap(); // hit
        let _ = store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
