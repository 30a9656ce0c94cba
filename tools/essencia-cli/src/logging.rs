//! Tracing subscriber setup.
//!
//! Logs always go to stderr so that `--json` output on stdout stays
//! machine-readable.

use anyhow::{anyhow, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Pick the filter directive: `RUST_LOG` wins, then `--verbose`, then config.
pub fn filter_directive(config: &LoggingConfig, verbose: bool, env: Option<&str>) -> String {
    match env {
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ if verbose => "debug".to_string(),
        _ => config.level.clone(),
    }
}

/// Filter used when the configured directive does not parse.
const FALLBACK_DIRECTIVE: &str = "warn";

/// Parse `directive`, falling back to [`FALLBACK_DIRECTIVE`].
///
/// An invalid directive never aborts startup. The second element is the
/// warning to log once the subscriber is installed.
pub fn build_filter(directive: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(e) => (
            EnvFilter::new(FALLBACK_DIRECTIVE),
            Some(format!(
                "Invalid log filter '{}' ({}), using '{}'",
                directive, e, FALLBACK_DIRECTIVE
            )),
        ),
    }
}

/// Install the global subscriber.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(config, verbose, env.as_deref());
    let (filter, fallback) = build_filter(&directive);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.format {
        LogFormat::Human => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| anyhow!(e))?;

    if let Some(message) = fallback {
        warn!("{}", message);
    }
    Ok(())
}
