//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    match ctx.config.catalog.source {
        Some(ref source) => ctx.output.kv("source", source),
        None => ctx.output.kv("source", "(built-in)"),
    }
    ctx.output.kv("policy", ctx.config.catalog.policy.as_str());
    ctx.output.kv("currency", ctx.config.catalog.currency.code());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("format", &ctx.config.logging.format.to_string());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = ctx.config.get_value(key)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "key": key, "value": value }));
    } else {
        match value {
            Value::String(s) => println!("{}", s),
            other => println!("{}", other),
        }
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = ctx
        .config_path
        .clone()
        .unwrap_or_else(|| ctx.cwd.join(CONFIG_FILE_NAMES[0]));

    // Start from the file on disk, not the merged context, so --data is not persisted
    let mut config = if config_path.exists() {
        CliConfig::load(&config_path)?
    } else {
        CliConfig::default()
    };

    config.set_value(key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

/// Errors and warnings found in a configuration.
#[derive(Debug, Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn check_config(config: &CliConfig, source: Option<PathBuf>) -> Findings {
    let mut findings = Findings::default();

    if let Some(path) = source {
        if !path.is_file() {
            findings
                .errors
                .push(format!("catalog.source not found: {}", path.display()));
        } else if path.extension().map(|ext| ext != "json").unwrap_or(true) {
            findings
                .warnings
                .push("catalog.source should be a .json dataset".to_string());
        }
    }

    if let Err(e) = EnvFilter::try_new(&config.logging.level) {
        findings.errors.push(format!(
            "logging.level '{}' is not a valid filter: {}",
            config.logging.level, e
        ));
    }

    findings
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let source = ctx
        .config
        .catalog
        .source
        .as_deref()
        .map(|s| ctx.resolve_path(s));
    let findings = check_config(&ctx.config, source);

    if findings.errors.is_empty() && findings.warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &findings.errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &findings.warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !findings.errors.is_empty() {
        bail!("Configuration has {} error(s)", findings.errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
