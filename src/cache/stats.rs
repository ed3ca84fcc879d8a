//! Cache Statistics Module
//!
//! Diagnostic snapshot of the cache: live keys, limits and counters.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of the cache, taken after an expiration sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of live entries
    pub size: usize,
    /// Capacity of the cache
    pub max_entries: usize,
    /// Default TTL in milliseconds
    pub ttl_ms: u64,
    /// Live keys, oldest insertion first
    pub keys: Vec<String>,
    /// Lookups that returned a value
    pub hits: u64,
    /// Lookups for unknown or expired keys
    pub misses: u64,
    /// Entries dropped to make room
    pub evictions: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Counters ==
/// Running counters kept by the store.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Counters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Counters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
