//! Cache Module
//!
//! In-memory response cache with TTL expiration and LRU eviction.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default number of resident entries
pub const DEFAULT_MAX_ENTRIES: usize = 500;

/// Default entry lifetime in seconds
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Longest entry lifetime the store accepts (30 days)
pub const MAX_TTL_SECS: u64 = 30 * 24 * 60 * 60;
