//! Fetch lifecycle tracking.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::context::SubscriptionId;

/// Category of a failed fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The producer did not settle before the timeout.
    Timeout,
    /// The producer reported a transport failure.
    Network,
    /// Any other producer error.
    Producer,
}

impl FailureKind {
    /// Short name used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Network => "network",
            Self::Producer => "producer",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle phases of a fetch subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPhase {
    /// An attempt started. `retry_count` is 1 for the automatic retry.
    AttemptStarted { retry_count: u8 },
    /// The producer settled successfully.
    Succeeded { elapsed: Duration },
    /// The attempt failed or timed out.
    Failed {
        kind: FailureKind,
        message: String,
        elapsed: Duration,
    },
    /// The automatic retry was armed.
    RetryScheduled { delay: Duration },
    /// Outstanding work was cancelled by a refetch or dependency change.
    Superseded,
    /// The subscription was torn down.
    TornDown,
}

/// Observer trait for fetch lifecycle events.
pub trait FetchObserver: Send + Sync {
    /// Called when a lifecycle phase occurs.
    fn on_phase(&self, subscription: &SubscriptionId, phase: &FetchPhase);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::Timeout).unwrap();
        assert_eq!(json, "\"timeout\"");
    }
}
