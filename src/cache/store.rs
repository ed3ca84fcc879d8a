//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order tracking
//! and TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::stats::Counters;
use crate::cache::{duration_ms, CacheEntry, CacheStats, Clock, InsertionOrder, SystemClock};

// == Cache ==
/// In-memory key/value store with per-entry expiration and a maximum entry count.
///
/// None of the operations fail: an unknown or expired key is simply absent.
#[derive(Debug)]
pub struct Cache<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Insertion order, used only to pick an eviction victim
    order: InsertionOrder,
    /// Hit/miss/eviction counters
    counters: Counters,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T> Cache<T> {
    // == Constructor ==
    /// Creates a new cache with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold (at least 1)
    /// * `default_ttl` - TTL for entries stored without an explicit one
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self::with_clock(max_entries, default_ttl, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    pub fn with_clock(max_entries: usize, default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            counters: Counters::default(),
            max_entries: max_entries.max(1),
            default_ttl,
            clock,
        }
    }

    // == Set ==
    /// Stores a value under `key`, replacing any previous value.
    ///
    /// Expired entries are swept first. If the cache is still full after the
    /// sweep, the oldest inserted entry is evicted, even when `key` is
    /// already present. Reads never refresh an entry's position.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses the default TTL if None)
    pub fn set(&mut self, key: impl Into<String>, value: T, ttl: Option<Duration>) {
        let key = key.into();
        let now = self.clock.now_ms();

        self.sweep(now);

        if self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.order.pop_oldest() {
                if let Some(entry) = self.entries.remove(&evicted) {
                    self.counters.record_eviction();
                    debug!(
                        key = %evicted,
                        age_ms = now.saturating_sub(entry.created_at),
                        "cache eviction"
                    );
                }
            }
        }

        let entry = CacheEntry::new(value, now, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.clone(), entry);
        self.order.insert(&key);
    }

    // == Has ==
    /// Returns whether a live entry exists for `key`.
    ///
    /// An expired entry is removed as a side effect.
    pub fn has(&mut self, key: &str) -> bool {
        self.live_entry(key).is_some()
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Size ==
    /// Sweeps expired entries, then returns the number of live entries.
    pub fn size(&mut self) -> usize {
        self.cleanup_expired();
        self.entries.len()
    }

    // == Keys ==
    /// Sweeps expired entries, then returns live keys oldest first.
    pub fn keys(&mut self) -> Vec<String> {
        self.cleanup_expired();
        self.order.iter().cloned().collect()
    }

    // == Stats ==
    /// Returns a diagnostic snapshot taken after a sweep.
    pub fn stats(&mut self) -> CacheStats {
        let keys = self.keys();

        CacheStats {
            size: keys.len(),
            max_entries: self.max_entries,
            ttl_ms: duration_ms(self.default_ttl),
            keys,
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.sweep(now)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn sweep(&mut self, now: u64) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.order.remove(key);
        }

        if !expired_keys.is_empty() {
            debug!(removed = expired_keys.len(), "cache sweep");
        }
        expired_keys.len()
    }

    /// Looks up a live entry, purging it if it has expired.
    fn live_entry(&mut self, key: &str) -> Option<&CacheEntry<T>> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            self.counters.record_miss();
            debug!(key, "cache entry expired");
            return None;
        }

        self.counters.record_hit();
        let entry = self.entries.get(key);
        if let Some(entry) = entry {
            debug!(key, ttl_remaining_ms = entry.ttl_remaining_ms(now), "cache entry live");
        }
        entry
    }
}

impl<T: Clone> Cache<T> {
    // == Get ==
    /// Returns a copy of the value stored under `key` if it is still live.
    ///
    /// An expired entry is removed as a side effect.
    pub fn get(&mut self, key: &str) -> Option<T> {
        self.live_entry(key).map(|entry| entry.value.clone())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn cache_with_clock(max_entries: usize, ttl_ms: u64) -> (Cache<String>, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        let cache = Cache::with_clock(
            max_entries,
            Duration::from_millis(ttl_ms),
            Arc::new(clock.clone()),
        );
        (cache, clock)
    }

    #[test]
    fn test_cache_new() {
        let mut cache: Cache<String> = Cache::new(100, Duration::from_secs(300));
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.max_entries(), 100);
        assert_eq!(cache.default_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache: Cache<String> = Cache::new(0, Duration::from_secs(1));
        assert_eq!(cache.max_entries(), 1);
    }

    #[test]
    fn test_set_and_get() {
        let (mut cache, _) = cache_with_clock(100, 300_000);

        cache.set("key1", "value1".to_string(), None);

        assert_eq!(cache.get("key1"), Some("value1".to_string()));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let (mut cache, _) = cache_with_clock(100, 300_000);
        assert_eq!(cache.get("nonexistent"), None);
        assert!(!cache.has("nonexistent"));
    }

    #[test]
    fn test_delete() {
        let (mut cache, _) = cache_with_clock(100, 300_000);

        cache.set("key1", "value1".to_string(), None);

        assert!(cache.delete("key1"));
        assert!(!cache.delete("key1"));
        assert_eq!(cache.get("key1"), None);
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let (mut cache, _) = cache_with_clock(100, 300_000);

        cache.set("key1", "value1".to_string(), None);
        cache.set("key1", "value2".to_string(), None);

        assert_eq!(cache.get("key1"), Some("value2".to_string()));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_default_ttl_expiration() {
        let (mut cache, clock) = cache_with_clock(100, 1_000);

        cache.set("key1", "value1".to_string(), None);

        clock.advance(Duration::from_millis(1_000));
        assert!(cache.has("key1"));

        clock.advance(Duration::from_millis(1));
        assert_eq!(cache.get("key1"), None);
    }

    #[test]
    fn test_custom_ttl_overrides_default() {
        let (mut cache, clock) = cache_with_clock(100, 300_000);

        cache.set("short", "v".to_string(), Some(Duration::from_secs(60)));
        cache.set("long", "v".to_string(), None);

        clock.advance(Duration::from_secs(61));

        assert!(!cache.has("short"));
        assert!(cache.has("long"));
    }

    #[test]
    fn test_expired_get_purges_entry() {
        let (mut cache, clock) = cache_with_clock(100, 10);

        cache.set("key1", "value1".to_string(), None);
        clock.advance(Duration::from_millis(11));

        assert_eq!(cache.get("key1"), None);
        // Purged on access, so a delete finds nothing
        assert!(!cache.delete("key1"));
    }

    #[test]
    fn test_insertion_order_eviction() {
        let (mut cache, _) = cache_with_clock(3, 300_000);

        cache.set("key1", "value1".to_string(), None);
        cache.set("key2", "value2".to_string(), None);
        cache.set("key3", "value3".to_string(), None);

        // Reads do not refresh position
        assert!(cache.get("key1").is_some());

        cache.set("key4", "value4".to_string(), None);

        assert_eq!(cache.size(), 3);
        assert_eq!(cache.get("key1"), None);
        assert!(cache.has("key2"));
        assert!(cache.has("key3"));
        assert!(cache.has("key4"));
    }

    #[test]
    fn test_overwrite_at_capacity_evicts_oldest() {
        let (mut cache, _) = cache_with_clock(2, 300_000);

        cache.set("key1", "value1".to_string(), None);
        cache.set("key2", "value2".to_string(), None);
        cache.set("key2", "value2b".to_string(), None);

        assert_eq!(cache.keys(), vec!["key2".to_string()]);
        assert_eq!(cache.get("key2"), Some("value2b".to_string()));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_overwrite_of_oldest_at_capacity() {
        let (mut cache, _) = cache_with_clock(2, 300_000);

        cache.set("key1", "value1".to_string(), None);
        cache.set("key2", "value2".to_string(), None);
        cache.set("key1", "value1b".to_string(), None);

        // key1 was the victim and is then stored again as the newest entry
        assert_eq!(cache.keys(), vec!["key2".to_string(), "key1".to_string()]);
        assert_eq!(cache.get("key1"), Some("value1b".to_string()));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let huge = Duration::from_secs(18_446_744_073_709_552);
        let (mut cache, clock) = cache_with_clock(10, 300_000);
        let mut long_lived: Cache<String> =
            Cache::with_clock(10, huge, Arc::new(clock.clone()));

        cache.set("key1", "value1".to_string(), Some(huge));
        long_lived.set("key2", "value2".to_string(), None);
        clock.advance(Duration::from_secs(1));

        assert!(cache.has("key1"));
        assert!(long_lived.has("key2"));
        assert_eq!(long_lived.stats().ttl_ms, u64::MAX);
    }

    #[test]
    fn test_sweep_before_eviction() {
        let (mut cache, clock) = cache_with_clock(2, 300_000);

        cache.set("old", "v".to_string(), Some(Duration::from_millis(5)));
        cache.set("keep", "v".to_string(), None);
        clock.advance(Duration::from_millis(10));

        // "old" expired, so the sweep frees room and "keep" survives
        cache.set("new", "v".to_string(), None);

        assert_eq!(cache.keys(), vec!["keep".to_string(), "new".to_string()]);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_clear() {
        let (mut cache, _) = cache_with_clock(10, 300_000);

        cache.set("a", "1".to_string(), None);
        cache.set("b", "2".to_string(), None);
        cache.clear();

        assert_eq!(cache.size(), 0);
        assert!(cache.keys().is_empty());
    }

    #[test]
    fn test_size_sweeps_expired() {
        let (mut cache, clock) = cache_with_clock(10, 300_000);

        cache.set("a", "1".to_string(), Some(Duration::from_secs(1)));
        cache.set("b", "2".to_string(), Some(Duration::from_secs(10)));
        clock.advance(Duration::from_secs(2));

        assert_eq!(cache.size(), 1);
        assert_eq!(cache.keys(), vec!["b".to_string()]);
    }

    #[test]
    fn test_cleanup_expired_count() {
        let (mut cache, clock) = cache_with_clock(10, 100);

        cache.set("a", "1".to_string(), None);
        cache.set("b", "2".to_string(), None);
        cache.set("c", "3".to_string(), Some(Duration::from_secs(60)));
        clock.advance(Duration::from_millis(200));

        assert_eq!(cache.cleanup_expired(), 2);
        assert_eq!(cache.cleanup_expired(), 0);
    }

    #[test]
    fn test_stats() {
        let (mut cache, _) = cache_with_clock(2, 300_000);

        cache.set("key1", "value1".to_string(), None);
        cache.set("key2", "value2".to_string(), None);
        cache.set("key3", "value3".to_string(), None);
        cache.get("key3"); // hit
        cache.get("key1"); // miss, evicted

        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.max_entries, 2);
        assert_eq!(stats.ttl_ms, 300_000);
        assert_eq!(stats.keys, vec!["key2".to_string(), "key3".to_string()]);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
    }
}
