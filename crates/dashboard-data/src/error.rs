//! Error type for fetch attempts.

use std::time::Duration;

use dashboard_core::FailureKind;

/// Reason a fetch attempt failed.
///
/// Never returned to the caller of a subscription; it is rendered into
/// `FetchState::error`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Request timeout after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Producer(String),
}

impl FetchError {
    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a producer error.
    pub fn producer(message: impl Into<String>) -> Self {
        Self::Producer(message.into())
    }

    /// Failure category for observers and metrics.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout(_) => FailureKind::Timeout,
            Self::Network(_) => FailureKind::Network,
            Self::Producer(_) => FailureKind::Producer,
        }
    }
}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        Self::Producer(message)
    }
}

impl From<&str> for FetchError {
    fn from(message: &str) -> Self {
        Self::Producer(message.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<anyhow::Error> for FetchError {
    fn from(e: anyhow::Error) -> Self {
        Self::Producer(format!("{:#}", e))
    }
}
