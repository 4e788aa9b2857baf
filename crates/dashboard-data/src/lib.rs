//! Safe data fetching for dashboard views.
//!
//! This crate provides:
//! - `SafeFetch` - A fetch subscription with timeout, one automatic retry, and refetch
//! - `FetchState` - The observable `{data, loading, error, retry_count}` value
//! - `Producer` - The caller-supplied async data source
//! - `RetryPolicy` - Automatic retry settings
//! - `DependencyTracker` - Dependency key change detection

mod dependency;
mod error;
mod producer;
mod retry;
mod state;
mod subscription;
mod timeout;

pub use dependency::*;
pub use error::*;
pub use producer::*;
pub use retry::*;
pub use state::*;
pub use subscription::*;
pub use timeout::*;

pub use dashboard_core::{FailureKind, FetchConfig, FetchObserver, FetchPhase, SubscriptionId};
