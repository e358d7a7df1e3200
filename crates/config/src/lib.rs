//! Configuration loading, validation, and management for ctxpack.
//!
//! Loads configuration from `~/.ctxpack/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.ctxpack/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// How project files are read from disk
    #[serde(default)]
    pub source: SourceConfig,

    /// How results are printed
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Files larger than this are rejected
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Skip unreadable files with a warning instead of failing
    #[serde(default)]
    pub skip_unreadable: bool,
}

fn default_max_file_bytes() -> u64 {
    1024 * 1024
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            skip_unreadable: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: OutputFormat,
}

/// Output format for `inspect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::ValidationError(format!(
                "unknown output format '{other}' (expected 'text' or 'json')"
            ))),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.ctxpack/config.toml).
    ///
    /// Environment variables take precedence over the file:
    /// - `CTXPACK_MAX_FILE_BYTES`
    /// - `CTXPACK_OUTPUT_FORMAT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in
    /// production, a map in tests).
    fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(raw) = lookup("CTXPACK_MAX_FILE_BYTES") {
            self.source.max_file_bytes = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "CTXPACK_MAX_FILE_BYTES must be a positive integer, got '{raw}'"
                ))
            })?;
        }

        if let Some(raw) = lookup("CTXPACK_OUTPUT_FORMAT") {
            self.output.default_format = raw.parse()?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".ctxpack")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.source.max_file_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "source.max_file_bytes must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for ctxpack_core::Error {
    fn from(err: ConfigError) -> Self {
        ctxpack_core::Error::Config {
            message: err.to_string(),
        }
    }
}
