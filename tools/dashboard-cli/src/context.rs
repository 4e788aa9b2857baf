//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }
}
