//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force, path } => init_config(force, path, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[fetch]");
    ctx.output.kv("timeout_ms", &ctx.config.fetch.timeout_ms.to_string());
    ctx.output.kv("retry_delay_ms", &ctx.config.fetch.retry_delay_ms.to_string());
    ctx.output.kv("max_auto_retries", &ctx.config.fetch.max_auto_retries.to_string());

    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_directive());
    ctx.output.kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

async fn init_config(force: bool, path: Option<String>, ctx: &Context) -> Result<()> {
    let config_path = match path {
        Some(path) => ctx.cwd.join(path),
        None => ctx.cwd.join(CONFIG_FILE_NAMES[0]),
    };

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if config_path.extension().is_some_and(|ext| ext == "json") {
        CliConfig::default().save(&config_path.to_string_lossy())?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect hard errors and advisory warnings for a configuration.
fn check(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = config.fetch.validate() {
        errors.push(format!("fetch: {}", e));
    }

    if config.fetch.max_auto_retries == 0 {
        warnings.push("fetch.max_auto_retries = 0 disables the automatic retry".to_string());
    }

    if config.fetch.timeout_ms > 0 && config.fetch.retry_delay_ms > config.fetch.timeout_ms {
        warnings.push(format!(
            "fetch.retry_delay_ms ({}) is longer than fetch.timeout_ms ({})",
            config.fetch.retry_delay_ms, config.fetch.timeout_ms
        ));
    }

    (errors, warnings)
}
