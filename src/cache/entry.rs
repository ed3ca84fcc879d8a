//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use crate::cache::duration_ms;

// == Cache Entry ==
/// A stored value with its creation and expiration timestamps.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), always after `created_at`
    pub expires_at: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new cache entry stamped at `now_ms`.
    ///
    /// A zero TTL is clamped to one millisecond so the entry still has a
    /// non-empty lifetime.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `now_ms` - Current time in Unix milliseconds
    /// * `ttl` - How long the entry stays live
    pub fn new(value: T, now_ms: u64, ttl: Duration) -> Self {
        let ttl_ms = duration_ms(ttl).max(1);

        Self {
            value,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is live up to and including `expires_at`; it expires once the
    /// current time is strictly past it.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, zero once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms)
    }
}
