//! CLI configuration.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use essencia_catalog::{CatalogLoader, Currency, LoadPolicy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// File names searched for, in order, when no `--config` is given.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["essencia.toml", ".essencia.toml", "essencia.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog source configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Build a catalog loader from the `[catalog]` section.
    pub fn loader(&self) -> CatalogLoader {
        CatalogLoader::new()
            .with_policy(self.catalog.policy)
            .with_currency(self.catalog.currency)
    }

    /// Read a value by dot-separated key.
    pub fn get_value(&self, key: &str) -> Result<Value> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["catalog", "source"] => Ok(self
                .catalog
                .source
                .as_ref()
                .map(|s| Value::String(s.clone()))
                .unwrap_or(Value::Null)),
            ["catalog", "policy"] => Ok(Value::String(self.catalog.policy.to_string())),
            ["catalog", "currency"] => Ok(Value::String(self.catalog.currency.to_string())),
            ["logging", "level"] => Ok(Value::String(self.logging.level.clone())),
            ["logging", "format"] => Ok(Value::String(self.logging.format.to_string())),
            _ => bail!("Unknown config key: {}", key),
        }
    }

    /// Set a value by dot-separated key.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["catalog", "source"] => {
                self.catalog.source = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            ["catalog", "policy"] => {
                self.catalog.policy = value.parse().map_err(anyhow::Error::msg)?;
            }
            ["catalog", "currency"] => {
                self.catalog.currency = Currency::from_code(value)
                    .with_context(|| format!("Unknown currency: {}", value))?;
            }
            ["logging", "level"] => self.logging.level = value.to_string(),
            ["logging", "format"] => {
                self.logging.format = value.parse().map_err(anyhow::Error::msg)?;
            }
            _ => bail!("Unknown config key: {}", key),
        }

        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}

/// Where the catalog comes from and how it is validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a JSON dataset. The bundled dataset is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// What to do with invalid records.
    #[serde(default)]
    pub policy: LoadPolicy,

    /// Currency that dataset prices are expressed in.
    #[serde(default)]
    pub currency: Currency,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (e.g. "warn", "essencia_catalog=debug").
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format (for development).
    #[default]
    Human,
    /// JSON format (for log aggregation).
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Human => write!(f, "human"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "pretty" => Ok(LogFormat::Human),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Generate a default essencia.toml config file.
pub fn generate_default_config() -> String {
    r#"# Essência catalog configuration

[catalog]
# Path to a JSON dataset; the bundled dataset is used when omitted.
# source = "data/catalog.json"

# "strict" fails on the first invalid record,
# "skip-invalid" drops invalid records and logs them.
policy = "strict"

# Currency of the prices in the dataset.
currency = "AOA"

[logging]
# Filter directive; RUST_LOG takes precedence.
level = "warn"

# "human" or "json"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [catalog]
            source = "fixtures/catalog.json"
            policy = "skip-invalid"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.source.as_deref(), Some("fixtures/catalog.json"));
        assert_eq!(config.catalog.policy, LoadPolicy::SkipInvalid);
        assert_eq!(config.catalog.currency, Currency::AOA);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Human);
        assert_eq!(config.loader().policy(), LoadPolicy::SkipInvalid);
    }

    #[test]
    fn test_get_and_set_values() {
        let mut config = CliConfig::default();
        assert_eq!(config.get_value("catalog.source").unwrap(), Value::Null);

        config.set_value("catalog.source", "data.json").unwrap();
        config.set_value("catalog.policy", "skip-invalid").unwrap();
        config.set_value("catalog.currency", "eur").unwrap();
        config.set_value("logging.format", "json").unwrap();

        assert_eq!(config.get_value("catalog.source").unwrap(), "data.json");
        assert_eq!(config.get_value("catalog.policy").unwrap(), "skip-invalid");
        assert_eq!(config.get_value("catalog.currency").unwrap(), "EUR");
        assert_eq!(config.get_value("logging.format").unwrap(), "json");

        assert!(config.set_value("catalog.currency", "XYZ").is_err());
        assert!(config.set_value("catalog.policy", "whatever").is_err());
        assert!(config.get_value("deploy.canary").is_err());
    }

    #[test]
    fn test_get_value_keeps_special_characters() {
        let mut config = CliConfig::default();
        let source = r#"C:\data\cat"x.json"#;
        config.set_value("catalog.source", source).unwrap();

        let value = config.get_value("catalog.source").unwrap();
        assert_eq!(value, source);

        let rendered = serde_json::to_string(&serde_json::json!({ "value": value })).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["value"], source);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.catalog.source = Some("catalog.json".to_string());

        for name in ["essencia.toml", "essencia.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(CliConfig::load(&path).unwrap(), config);
        }
    }
}
