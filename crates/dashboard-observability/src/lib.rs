//! Observability infrastructure for the merchant dashboard.
//!
//! This crate provides:
//! - `init_logging` - `tracing` subscriber setup from `LoggingConfig`
//! - `FetchMetrics` - A `FetchObserver` that aggregates per-subscription counters

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;

// Re-export for observers wired up by binaries
pub use dashboard_core::{FetchObserver, FetchPhase, SubscriptionId};
