//! Load — config loading from file and environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::ReportConfig;

pub const CONFIG_FILE_ENV: &str = "VISITLOG_CONFIG_FILE";
pub const DEFAULT_CONFIG_FILE: &str = "visitlog.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ReportConfig {
    /// Load configuration from file, then layer environment variables on top.
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// An explicitly given path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => match std::env::var(CONFIG_FILE_ENV) {
                Ok(p) => (PathBuf::from(p), true),
                Err(_) => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        let mut config = if required || path.exists() {
            tracing::info!("Loading configuration from: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply `VISITLOG_*` overrides read through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(crawlers) = lookup("VISITLOG_CRAWLERS") {
            self.crawlers = crawlers
                .split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect();
        }
        if let Some(path) = lookup("VISITLOG_PATH_FILTER") {
            self.path_filter = Some(path);
        }
        if let Some(year) = lookup("VISITLOG_MIN_YEAR").and_then(|s| s.parse().ok()) {
            self.min_year = year;
        }
        if let Some(level) = lookup("VISITLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crawlers.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::Invalid("crawlers must not contain empty tokens".to_string()));
        }
        if matches!(&self.path_filter, Some(p) if p.is_empty()) {
            return Err(ConfigError::Invalid("path_filter must not be empty when set".to_string()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level must not be empty".to_string()));
        }
        Ok(())
    }
}
