//! CLI configuration.

use anyhow::{Context, Result};
use dashboard_core::FetchConfig;
use dashboard_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upward.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["dashboard.toml", ".dashboard.toml", "dashboard.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Subscription timeout and retry settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Log filter and format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config content, choosing the format from the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Generate a default dashboard.toml config file.
pub fn generate_default_config() -> String {
    let fetch = FetchConfig::default();
    format!(
        r#"# Dashboard data configuration

[fetch]
# Per-attempt deadline
timeout_ms = {timeout_ms}
# Pause before the single automatic retry
retry_delay_ms = {retry_delay_ms}
# 0 disables the automatic retry
max_auto_retries = {max_auto_retries}

[logging]
# trace, debug, info, warn, error (RUST_LOG takes precedence)
level = "info"
# human or json
format = "human"
"#,
        timeout_ms = fetch.timeout_ms,
        retry_delay_ms = fetch.retry_delay_ms,
        max_auto_retries = fetch.max_auto_retries,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_observability::{LogFormat, LogLevel};

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config = CliConfig::parse("dashboard.toml", &generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = CliConfig::parse(
            "dashboard.toml",
            "[fetch]\ntimeout_ms = 500\n\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();
        assert_eq!(config.fetch.timeout_ms, 500);
        assert_eq!(config.fetch.retry_delay_ms, 3_000);
        assert_eq!(config.fetch.max_auto_retries, 1);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse(
            "dashboard.json",
            r#"{"fetch": {"max_auto_retries": 0}, "logging": {"level": "debug"}}"#,
        )
        .unwrap();
        assert_eq!(config.fetch.max_auto_retries, 0);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_toml_names_the_file() {
        let err = CliConfig::parse("broken.toml", "[fetch\n").unwrap_err();
        assert!(format!("{:#}", err).contains("broken.toml"));
    }
}
