//! Exponential backoff for transient GBIF failures.

use std::time::Duration;

use natura_core::{GBIF_MAX_RETRIES, GBIF_RETRY_BASE_DELAY_MS};

/// How often and how patiently a request is retried.
///
/// The first retry waits `base_delay`, every further one doubles it:
/// with the defaults that is 1s, 2s, 4s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: usize,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: GBIF_MAX_RETRIES,
            base_delay: Duration::from_millis(GBIF_RETRY_BASE_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_retries: usize, base_delay: Duration) -> Self {
        Self { max_retries, base_delay }
    }

    /// No retries at all.
    #[must_use]
    pub const fn none() -> Self {
        Self { max_retries: 0, base_delay: Duration::ZERO }
    }

    /// Delay before retry number `retry` (1-based).
    #[must_use]
    pub fn delay_for(&self, retry: usize) -> Duration {
        let exponent = u32::try_from(retry.saturating_sub(1)).unwrap_or(u32::MAX).min(16);
        self.base_delay.saturating_mul(1_u32 << exponent)
    }
}
