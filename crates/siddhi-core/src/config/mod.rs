//! Configuration management for Siddhi.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `siddhi.toml` file
//! 3. User config `~/.config/siddhi/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::form::{prepare_submission, upsert_in_place};
use crate::resource::{sample_catalog, Resource};

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where crash reports and logs are written.
    pub storage: StorageConfig,

    /// Barcode scanner configuration.
    pub scanner: ScannerConfig,

    /// Initial resource catalogue.
    pub catalog: CatalogConfig,

    /// Web form configuration.
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./siddhi.toml` (project local)
    /// 2. `~/.config/siddhi/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_file(DEFAULT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("siddhi").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse and check configuration text without environment overrides.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.scanner.id_digits == 0 || self.scanner.id_digits > 9 {
            return Err(ConfigError::Invalid(format!(
                "scanner.id_digits must be between 1 and 9, got {}",
                self.scanner.id_digits
            )));
        }
        self.catalog.initial_resources()?;
        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("SIDDHI_DATA_DIR") {
            self.storage.data_dir = dir;
        }

        if let Ok(prefix) = std::env::var("SIDDHI_SCAN_PREFIX") {
            self.scanner.id_prefix = prefix;
        }
        if let Ok(delay) = std::env::var("SIDDHI_SCAN_DELAY_MS") {
            if let Ok(n) = delay.parse() {
                self.scanner.delay_ms = n;
            }
        }

        if let Ok(port) = std::env::var("SIDDHI_SERVE_PORT") {
            if let Ok(n) = port.parse() {
                self.server.port = n;
            }
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory for siddhi data (default: ".siddhi").
    pub data_dir: String,

    /// Crash report file name.
    pub crash_file: String,

    /// Log file name.
    pub log_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            crash_file: DEFAULT_CRASH_FILE.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl StorageConfig {
    /// Get the full path to the crash report.
    pub fn crash_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.crash_file)
    }

    /// Get the full path to the log file.
    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.log_file)
    }
}

/// Barcode scanner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Prefix of synthetic ids.
    pub id_prefix: String,

    /// Digits after the prefix; ids are drawn from `[0, 10^id_digits)`.
    pub id_digits: u32,

    /// How long the simulated scanner takes, in milliseconds.
    pub delay_ms: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_SCAN_PREFIX.to_string(),
            id_digits: DEFAULT_SCAN_DIGITS,
            delay_ms: DEFAULT_SCAN_DELAY_MS,
        }
    }
}

/// Initial catalogue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Start with the built-in sample resources.
    pub seed_samples: bool,

    /// Extra resources added after the samples.
    pub resources: Vec<Resource>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_samples: true,
            resources: Vec::new(),
        }
    }
}

impl CatalogConfig {
    /// The resources a new store starts with.
    ///
    /// Configured resources are normalized and checked like a submission,
    /// in order, against the samples and the entries before them.
    pub fn initial_resources(&self) -> Result<Vec<Resource>, ConfigError> {
        let mut resources = if self.seed_samples {
            sample_catalog()
        } else {
            Vec::new()
        };

        for resource in &self.resources {
            let prepared = prepare_submission(resource, &resources).map_err(|e| {
                ConfigError::Invalid(format!(
                    "catalog resource '{}': {}",
                    resource.id.trim(),
                    e
                ))
            })?;
            upsert_in_place(&mut resources, prepared);
        }

        Ok(resources)
    }
}

/// Web form configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,

    /// Open the browser when the server starts.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERVE_PORT,
            open_browser: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.data_dir, DEFAULT_DATA_DIR);
        assert_eq!(config.scanner.id_prefix, DEFAULT_SCAN_PREFIX);
        assert_eq!(config.server.port, DEFAULT_SERVE_PORT);
        assert!(config.catalog.seed_samples);
    }

    #[test]
    fn test_config_to_toml() {
        let toml_str = Config::default_config_string();
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("[scanner]"));
        assert!(toml_str.contains("[server]"));
    }

    #[test]
    fn test_rejects_bad_digits() {
        let result = Config::from_toml("[scanner]\nid_digits = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_paths() {
        let storage = StorageConfig {
            data_dir: "/tmp/siddhi".to_string(),
            ..StorageConfig::default()
        };
        assert_eq!(storage.crash_path(), PathBuf::from("/tmp/siddhi/crash.log"));
        assert_eq!(storage.log_path(), PathBuf::from("/tmp/siddhi/siddhi.log"));
    }
}
