//! Subscription identity for log and metrics correlation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a fetch subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub String);

impl SubscriptionId {
    /// Generate a new subscription ID.
    pub fn generate() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);

        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("sub-{:x}-{}", millis, seq))
    }

    /// Create with a caller-chosen label (e.g., "products").
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
