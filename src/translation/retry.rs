/*!
 * Bounded retry backoff.
 *
 * The delay computation is a pure function of the attempt number plus
 * jitter, so callers own the actual sleeping and tests never have to wait.
 */

use std::time::Duration;

use rand::Rng;

/// Backoff policy for retrying failed translation calls
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Maximum number of retry attempts after the initial call
    pub max_retries: u32,

    /// Base delay in milliseconds for the first retry
    pub base_delay_ms: u64,

    /// Upper bound on any single delay, in milliseconds
    pub max_delay_ms: u64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
        }
    }
}

impl BackoffPolicy {
    /// Create a policy with the given retry count and base delay
    pub fn new(max_retries: u32, base_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay_ms,
            ..Self::default()
        }
    }

    /// Delay before the given retry attempt (1-based).
    ///
    /// The delay doubles with each attempt, is capped at `max_delay_ms`,
    /// and is jittered into the upper half of the capped window so
    /// concurrent retries spread out.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let raw = self.base_delay_ms.saturating_mul(1u64 << exponent);
        let capped = raw.min(self.max_delay_ms);
        if capped == 0 {
            return Duration::ZERO;
        }

        let half = capped / 2;
        let jitter = rand::rng().random_range(0..=capped - half);
        Duration::from_millis(half + jitter)
    }
}
