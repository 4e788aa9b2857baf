//! Retry policy for fetch subscriptions.

use std::time::Duration;

use dashboard_core::{FetchConfig, MAX_AUTO_RETRIES};

/// Automatic retry settings.
///
/// The retry budget is per attempt sequence: a refetch or dependency change
/// starts a new sequence with a fresh budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of automatic retries.
    pub max_auto_retries: u8,
    /// Fixed delay before each automatic retry.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(max_auto_retries: u8, delay: Duration) -> Self {
        Self {
            max_auto_retries,
            delay,
        }
    }

    /// Create a policy with no automatic retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Build from fetch configuration, capping retries at [`MAX_AUTO_RETRIES`].
    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(
            config.max_auto_retries.min(MAX_AUTO_RETRIES),
            config.retry_delay(),
        )
    }

    /// Delay before the next retry, or `None` when the failure is terminal.
    ///
    /// `retry_count` is the number of automatic retries already made.
    pub fn delay_for(&self, retry_count: u8) -> Option<Duration> {
        if retry_count >= self.max_auto_retries {
            return None;
        }
        Some(self.delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}
