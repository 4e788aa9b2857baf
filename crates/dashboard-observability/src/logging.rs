//! Structured logging setup.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Log level for the default filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for log aggregation).
    Json,
    /// Human-readable format (for development).
    #[default]
    Human,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Minimum level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Set minimum log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Build the filter, preferring `RUST_LOG` when present.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_directive()))
    }
}

/// Install the global `tracing` subscriber writing to stderr.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.try_init(),
    };
    if result.is_err() {
        return false;
    }
    tracing::debug!(level = %config.level, format = ?config.format, "logging initialized");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error > LogLevel::Warn);
    }

    #[test]
    fn test_config_deserializes_lowercase() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"level": "debug", "format": "json"}"#).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Human);
        assert_eq!(config.level.as_directive(), "info");
    }

    #[test]
    fn test_second_init_is_tolerated() {
        let config = LoggingConfig::default().with_level(LogLevel::Warn);
        let _ = init_logging(&config);
        assert!(!init_logging(&config));
    }
}
