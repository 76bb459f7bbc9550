//! Configuration handling for Stockroom
//!
//! Configuration is read from `~/.config/stockroom/config.toml` (global) and
//! then `stockroom.toml` in the working directory (local), with later files
//! overriding earlier ones key by key. Command-line flags win over both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the per-directory configuration file
pub const LOCAL_CONFIG_FILE: &str = "stockroom.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for the command history log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Path of the log file, truncated at startup
    pub path: PathBuf,

    /// Number of commands handed to each background append
    pub batch_size: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("log.txt"),
            batch_size: 2,
        }
    }
}

/// Effective configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt printed before each command
    pub prompt: String,

    /// Default output format
    pub format: OutputFormat,

    /// Command history log
    pub audit: AuditConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            format: OutputFormat::Text,
            audit: AuditConfig::default(),
        }
    }
}

/// A configuration file where every key is optional
#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    prompt: Option<String>,
    format: Option<OutputFormat>,
    #[serde(default)]
    audit: PartialAuditConfig,
}

#[derive(Debug, Default, Deserialize)]
struct PartialAuditConfig {
    path: Option<PathBuf>,
    batch_size: Option<usize>,
}

impl Config {
    /// Loads configuration from the global directory and the working directory.
    ///
    /// An explicit path replaces the working-directory file and must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(global) = Self::global_config_dir().map(|dir| dir.join("config.toml")) {
            if global.is_file() {
                config.merge_file(&global)?;
            }
        }

        match explicit {
            Some(path) => config.merge_file(path)?,
            None => {
                let local = PathBuf::from(LOCAL_CONFIG_FILE);
                if local.is_file() {
                    config.merge_file(&local)?;
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads a single configuration file on top of the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.merge_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "stockroom", "stockroom").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let partial: PartialConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        self.merge(partial);
        Ok(())
    }

    fn merge(&mut self, partial: PartialConfig) {
        if let Some(prompt) = partial.prompt {
            self.prompt = prompt;
        }
        if let Some(format) = partial.format {
            self.format = format;
        }
        if let Some(path) = partial.audit.path {
            self.audit.path = path;
        }
        if let Some(batch_size) = partial.audit.batch_size {
            self.audit.batch_size = batch_size;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.audit.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "audit.batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.prompt, "> ");
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.audit.path, PathBuf::from("log.txt"));
        assert_eq!(config.audit.batch_size, 2);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
format = "json"

[audit]
path = "history.txt"
"#,
        );

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.audit.path, PathBuf::from("history.txt"));
        assert_eq!(config.audit.batch_size, 2);
        assert_eq!(config.prompt, "> ");
    }

    #[test]
    fn zero_batch_size_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[audit]\nbatch_size = 0\n");

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "prompt = [");

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn explicit_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");

        assert!(Config::load(Some(&missing)).is_err());
    }
}
