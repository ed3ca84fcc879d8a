//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and insertion-order eviction.

mod clock;
mod entry;
mod order;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub(crate) use clock::duration_ms;
pub(crate) use entry::CacheEntry;
pub(crate) use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::Cache;
