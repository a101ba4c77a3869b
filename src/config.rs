//! Configuration management for the lineage tools

use crate::types::{OutputFormat, TieBreak};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_TIE_BREAK: &str = "LINEAGE_TIE_BREAK";
const ENV_LOG_LEVEL: &str = "LINEAGE_LOG_LEVEL";
const ENV_OUTPUT_FORMAT: &str = "LINEAGE_OUTPUT_FORMAT";

const KNOWN_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverSettings {
    #[serde(default)]
    pub tie_break: TieBreak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub with_target: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: false,
        }
    }
}

/// Values set through `LINEAGE_*` environment variables.
///
/// Only variables that are present are applied, so an override can also
/// restore a default that the configuration file changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub tie_break: Option<TieBreak>,
    pub log_level: Option<String>,
    pub output_format: Option<OutputFormat>,
}

impl EnvOverrides {
    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tie_break = lookup(ENV_TIE_BREAK)
            .map(|value| value.parse::<TieBreak>())
            .transpose()
            .with_context(|| format!("Invalid {}", ENV_TIE_BREAK))?;

        let output_format = lookup(ENV_OUTPUT_FORMAT)
            .map(|value| value.parse::<OutputFormat>())
            .transpose()
            .with_context(|| format!("Invalid {}", ENV_OUTPUT_FORMAT))?;

        Ok(Self {
            tie_break,
            log_level: lookup(ENV_LOG_LEVEL),
            output_format,
        })
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn load_from_env() -> Result<Self> {
        let mut config = Config::default();
        config.apply_env_overrides(EnvOverrides::from_env()?);
        Ok(config)
    }

    /// Apply every override that is set, whatever the current value
    pub fn apply_env_overrides(&mut self, overrides: EnvOverrides) {
        if let Some(tie_break) = overrides.tie_break {
            self.resolver.tie_break = tie_break;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.output_format {
            self.output.format = format;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let level = self.logging.level.to_lowercase();
        if !KNOWN_LOG_LEVELS.contains(&level.as_str()) {
            return Err(anyhow::anyhow!(
                "Unknown log level '{}', expected one of {:?}",
                self.logging.level,
                KNOWN_LOG_LEVELS
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_save_and_load() {
        let mut config = Config::default();
        config.resolver.tie_break = TieBreak::SmallestId;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();
        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();

        assert_eq!(config, loaded_config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "resolver:\n  tie_break: smallest_id\n").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();

        assert_eq!(config.resolver.tie_break, TieBreak::SmallestId);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Config::load_from_file("/nonexistent/lineage.yml").is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.logging.level = "DEBUG".to_string();
        assert!(config.validate().is_ok());

        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_restore_defaults_over_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let content = concat!(
            "resolver:\n  tie_break: smallest_id\n",
            "logging:\n  level: debug\n",
            "output:\n  format: json\n",
        );
        std::fs::write(temp_file.path(), content).unwrap();
        let mut config = Config::load_from_file(temp_file.path()).unwrap();

        let overrides = EnvOverrides::from_lookup(lookup_from(&[
            ("LINEAGE_TIE_BREAK", "last_discovered"),
            ("LINEAGE_LOG_LEVEL", "info"),
        ]))
        .unwrap();
        config.apply_env_overrides(overrides);

        assert_eq!(config.resolver.tie_break, TieBreak::LastDiscovered);
        assert_eq!(config.logging.level, "info");
        // not set in the environment, so the file value stays
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_empty_environment_changes_nothing() {
        let mut config = Config::default();
        config.resolver.tie_break = TieBreak::SmallestId;
        config.logging.with_target = true;
        let before = config.clone();

        let overrides = EnvOverrides::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(overrides, EnvOverrides::default());

        config.apply_env_overrides(overrides);
        assert_eq!(config, before);
    }

    #[test]
    fn test_invalid_env_value_is_an_error() {
        let result = EnvOverrides::from_lookup(lookup_from(&[("LINEAGE_OUTPUT_FORMAT", "xml")]));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("LINEAGE_OUTPUT_FORMAT"));
    }

    #[test]
    fn test_load_from_env_reads_process_environment() {
        std::env::set_var("LINEAGE_TIE_BREAK", "smallest-id");
        std::env::set_var("LINEAGE_OUTPUT_FORMAT", "json");
        let config = Config::load_from_env();
        std::env::remove_var("LINEAGE_TIE_BREAK");
        std::env::remove_var("LINEAGE_OUTPUT_FORMAT");

        let config = config.unwrap();
        assert_eq!(config.resolver.tie_break, TieBreak::SmallestId);
        assert_eq!(config.output.format, OutputFormat::Json);
    }
}
