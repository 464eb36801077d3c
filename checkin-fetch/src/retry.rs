//! Retry policy for outbound requests.
//!
//! One policy governs every request in a run, site or notification alike.
//! Network faults and 5xx responses are retried with a linearly growing
//! delay; 4xx responses are final.

use std::time::Duration;

use crate::error::FetchError;

/// Default number of retries after the first attempt.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delay unit; retry `n` waits `n` units.
const DEFAULT_DELAY_STEP: Duration = Duration::from_millis(2000);

/// Policy for retrying failed requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries beyond the first attempt.
    pub max_retries: u32,
    /// Delay unit between attempts.
    pub delay_step: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given retry budget and the default delay step.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            delay_step: DEFAULT_DELAY_STEP,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            delay_step: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based): `retry * delay_step`.
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        self.delay_step * retry
    }

    /// Determines if a failed request should be retried.
    pub fn should_retry(&self, error: &FetchError) -> bool {
        match error {
            FetchError::Network { kind, .. } => kind.is_transient(),
            FetchError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}
