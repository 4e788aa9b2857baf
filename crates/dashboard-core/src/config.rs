//! Fetch configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeout and retry settings shared by every fetch subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Upper bound for a single producer call, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Delay before the automatic retry, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Number of automatic retries after a failure (0 or 1).
    #[serde(default = "default_max_auto_retries")]
    pub max_auto_retries: u8,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_retry_delay_ms() -> u64 {
    3_000
}

fn default_max_auto_retries() -> u8 {
    1
}

impl FetchConfig {
    /// Create a configuration from explicit durations.
    pub fn new(timeout: Duration, retry_delay: Duration) -> Self {
        Self {
            timeout_ms: timeout.as_millis() as u64,
            retry_delay_ms: retry_delay.as_millis() as u64,
            max_auto_retries: default_max_auto_retries(),
        }
    }

    /// Disable the automatic retry.
    pub fn without_retry(mut self) -> Self {
        self.max_auto_retries = 0;
        self
    }

    /// Producer timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Delay before the automatic retry fires.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Check the configuration for values the fetch loop cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_auto_retries > MAX_AUTO_RETRIES {
            return Err(ConfigError::TooManyRetries(self.max_auto_retries));
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            max_auto_retries: default_max_auto_retries(),
        }
    }
}

/// Upper bound on automatic retries per attempt sequence.
pub const MAX_AUTO_RETRIES: u8 = 1;

/// Error for invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("fetch timeout must be greater than zero")]
    ZeroTimeout,

    #[error("at most one automatic retry is supported, got {0}")]
    TooManyRetries(u8),
}
