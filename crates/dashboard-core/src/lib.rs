//! Core abstractions for the merchant dashboard data layer.
//!
//! This crate provides the fundamental types and traits:
//! - `FetchConfig` - Timeout and retry configuration
//! - `SubscriptionId` - Correlation identifier for a fetch subscription
//! - `FetchPhase` / `FetchObserver` - Fetch lifecycle tracking

mod config;
mod context;
mod lifecycle;

pub use config::*;
pub use context::*;
pub use lifecycle::*;
