//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::scoring::{ParamsError, ScoringParams};

/// Environment variable overriding `scoring.min_score`
pub const MIN_SCORE_ENV: &str = "SNIFRA_MIN_SCORE";

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringParams,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid scoring parameters: {0}")]
    Scoring(#[from] ParamsError),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    let config = config.with_env_overrides()?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {:?}, got '{}'",
                LEVELS, self.logging.level
            )));
        }

        self.scoring.validate()?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Checks SNIFRA_MIN_SCORE, falls back to the file value
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        match std::env::var(MIN_SCORE_ENV) {
            Ok(raw) => self.with_min_score_override(&raw),
            Err(_) => Ok(self),
        }
    }

    fn with_min_score_override(mut self, raw: &str) -> Result<Self, ConfigError> {
        let min_score = raw.trim().parse::<u32>().map_err(|_| {
            ConfigError::ValidationError(format!(
                "{} must be a non-negative integer, got '{}'",
                MIN_SCORE_ENV, raw
            ))
        })?;
        self.scoring = self.scoring.with_min_score(min_score);
        Ok(self)
    }
}
