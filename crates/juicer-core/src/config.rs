//! Configuration loading and typed config structures for the juicer.
//!
//! The canonical configuration lives in `juicer-config.yaml`. This
//! module defines strongly-typed structs mirroring the YAML structure;
//! every field has a default matching the machine's factory settings,
//! so a missing file or empty document yields a fully usable config.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level juicer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JuicerConfig {
    /// Machine capacity settings.
    #[serde(default)]
    pub machine: MachineCapacityConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl JuicerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does
    /// not exist. Parse errors in an existing file still fail.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unreadable or invalid existing
    /// files.
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Machine capacity configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MachineCapacityConfig {
    /// Juice tank capacity in milliliters.
    #[serde(default = "default_tank_capacity_ml")]
    pub tank_capacity_ml: Decimal,

    /// Waste bin capacity in grams.
    #[serde(default = "default_bin_capacity_grams")]
    pub bin_capacity_grams: Decimal,
}

impl Default for MachineCapacityConfig {
    fn default() -> Self {
        Self {
            tank_capacity_ml: default_tank_capacity_ml(),
            bin_capacity_grams: default_bin_capacity_grams(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_tank_capacity_ml() -> Decimal {
    Decimal::from(5000)
}

fn default_bin_capacity_grams() -> Decimal {
    Decimal::from(2000)
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    4567
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_factory_defaults() {
        let config = JuicerConfig::parse("{}").unwrap();
        assert_eq!(config, JuicerConfig::default());
        assert_eq!(config.machine.tank_capacity_ml, Decimal::from(5000));
        assert_eq!(config.machine.bin_capacity_grams, Decimal::from(2000));
        assert_eq!(config.server.port, 4567);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_documents_keep_unset_defaults() {
        let yaml = "machine:\n  tank_capacity_ml: 100\nserver:\n  port: 9000\n";
        let config = JuicerConfig::parse(yaml).unwrap();
        assert_eq!(config.machine.tank_capacity_ml, Decimal::from(100));
        assert_eq!(config.machine.bin_capacity_grams, Decimal::from(2000));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            JuicerConfig::from_file_or_default(Path::new("/nonexistent/juicer.yaml")).unwrap();
        assert_eq!(config, JuicerConfig::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(JuicerConfig::parse("machine: [not a map").is_err());
    }
}
