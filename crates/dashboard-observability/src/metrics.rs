//! Per-subscription fetch metrics.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use dashboard_core::{FailureKind, FetchObserver, FetchPhase, SubscriptionId};
use serde::{Deserialize, Serialize};

/// Counters for a single subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionMetrics {
    /// Subscription ID.
    pub subscription: String,
    /// Attempts started, including automatic retries.
    pub attempts: u32,
    /// Attempts that succeeded.
    pub successes: u32,
    /// Attempts that failed, including timeouts.
    pub failures: u32,
    /// Attempts that timed out.
    pub timeouts: u32,
    /// Automatic retries scheduled.
    pub auto_retries: u32,
    /// Attempt sequences cancelled by refetch or dependency change.
    pub superseded: u32,
    /// Whether the subscription has been torn down.
    pub torn_down: bool,
    /// Message of the most recent failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    /// Duration of the most recent settled attempt (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_duration_us: Option<u64>,
}

impl SubscriptionMetrics {
    fn new(subscription: &SubscriptionId) -> Self {
        Self {
            subscription: subscription.to_string(),
            ..Self::default()
        }
    }

    fn record(&mut self, phase: &FetchPhase) {
        match phase {
            FetchPhase::AttemptStarted { .. } => self.attempts += 1,
            FetchPhase::Succeeded { elapsed } => {
                self.successes += 1;
                self.last_duration_us = Some(elapsed.as_micros() as u64);
            }
            FetchPhase::Failed {
                kind,
                message,
                elapsed,
            } => {
                self.failures += 1;
                if *kind == FailureKind::Timeout {
                    self.timeouts += 1;
                }
                self.last_error = Some(message.clone());
                self.last_duration_us = Some(elapsed.as_micros() as u64);
            }
            FetchPhase::RetryScheduled { .. } => self.auto_retries += 1,
            FetchPhase::Superseded => self.superseded += 1,
            FetchPhase::TornDown => self.torn_down = true,
        }
    }
}

/// Collector for fetch metrics across subscriptions.
#[derive(Debug, Default)]
pub struct FetchMetrics {
    subscriptions: Mutex<HashMap<String, SubscriptionMetrics>>,
}

impl FetchMetrics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics for one subscription.
    pub fn get(&self, subscription: &SubscriptionId) -> Option<SubscriptionMetrics> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(subscription.as_str())
            .cloned()
    }

    /// All subscriptions, ordered by ID.
    pub fn all(&self) -> Vec<SubscriptionMetrics> {
        let mut all: Vec<_> = self
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| a.subscription.cmp(&b.subscription));
        all
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = Vec::new();

        for m in self.all() {
            lines.push(format!("Subscription: {}", m.subscription));
            lines.push(format!(
                "  Attempts: {} ({} ok, {} failed, {} timed out)",
                m.attempts, m.successes, m.failures, m.timeouts
            ));
            if m.auto_retries > 0 || m.superseded > 0 {
                lines.push(format!(
                    "  Retries: {} automatic, {} superseded",
                    m.auto_retries, m.superseded
                ));
            }
            if let Some(us) = m.last_duration_us {
                lines.push(format!("  Last attempt: {:.2}ms", us as f64 / 1000.0));
            }
            if let Some(ref error) = m.last_error {
                lines.push(format!("  Last error: {}", error));
            }
        }

        lines.join("\n")
    }
}

impl FetchObserver for FetchMetrics {
    fn on_phase(&self, subscription: &SubscriptionId, phase: &FetchPhase) {
        let mut subscriptions = self
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscriptions
            .entry(subscription.to_string())
            .or_insert_with(|| SubscriptionMetrics::new(subscription))
            .record(phase);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn failed(kind: FailureKind, message: &str) -> FetchPhase {
        FetchPhase::Failed {
            kind,
            message: message.to_string(),
            elapsed: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_records_retry_sequence() {
        let metrics = FetchMetrics::new();
        let id = SubscriptionId::from_string("products");

        metrics.on_phase(&id, &FetchPhase::AttemptStarted { retry_count: 0 });
        metrics.on_phase(&id, &failed(FailureKind::Timeout, "Request timeout after 10 seconds"));
        metrics.on_phase(
            &id,
            &FetchPhase::RetryScheduled {
                delay: Duration::from_secs(3),
            },
        );
        metrics.on_phase(&id, &FetchPhase::AttemptStarted { retry_count: 1 });
        metrics.on_phase(
            &id,
            &FetchPhase::Succeeded {
                elapsed: Duration::from_millis(42),
            },
        );

        let m = metrics.get(&id).unwrap();
        assert_eq!(m.attempts, 2);
        assert_eq!(m.failures, 1);
        assert_eq!(m.timeouts, 1);
        assert_eq!(m.auto_retries, 1);
        assert_eq!(m.successes, 1);
        assert_eq!(m.last_duration_us, Some(42_000));
        assert_eq!(
            m.last_error.as_deref(),
            Some("Request timeout after 10 seconds")
        );
    }

    #[test]
    fn test_subscriptions_are_separate() {
        let metrics = FetchMetrics::new();
        let orders = SubscriptionId::from_string("orders");
        let clients = SubscriptionId::from_string("clients");

        metrics.on_phase(&orders, &failed(FailureKind::Producer, "server error"));
        metrics.on_phase(&clients, &FetchPhase::TornDown);

        let all = metrics.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].subscription, "clients");
        assert!(all[0].torn_down);
        assert_eq!(all[1].failures, 1);
        assert_eq!(all[1].timeouts, 0);
    }

    #[test]
    fn test_summary_and_json() {
        let metrics = FetchMetrics::new();
        let id = SubscriptionId::from_string("notifications");
        metrics.on_phase(&id, &failed(FailureKind::Network, "network down"));

        let summary = metrics.to_summary();
        assert!(summary.contains("Subscription: notifications"));
        assert!(summary.contains("Last error: network down"));

        let json = serde_json::to_value(metrics.all()).unwrap();
        assert_eq!(json[0]["failures"], 1);
    }
}
