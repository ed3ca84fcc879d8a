//! Retry policy for remote reads.

use std::time::Duration;

// == Retry Policy ==
/// Attempt budget, backoff base and per-attempt timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (at least 1)
    pub max_attempts: u32,
    /// Backoff unit; attempt `n` waits `base_delay * n` before the next one
    pub base_delay: Duration,
    /// Per-attempt timeout enforced by the transport
    pub timeout: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, timeout: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            timeout,
        }
    }

    /// Delay after failed attempt `attempt` (1-based). Linear, no jitter.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Whether a failure on `attempt` still leaves room for another try.
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            timeout: Duration::from_millis(10_000),
        }
    }
}
