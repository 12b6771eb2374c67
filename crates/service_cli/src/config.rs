//! CLI configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::FixedOffset;
use continuity_core::schedules::FieldNames;
use continuity_core::types::TimeUnit;
use serde::Deserialize;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid time unit: {0}")]
    InvalidTimeUnit(String),

    #[error("Invalid frequency: {0}. Must be a finite number greater than zero")]
    InvalidFrequency(String),

    #[error("Invalid UTC offset: {0}. Expected Z, UTC or +HH:MM")]
    InvalidOffset(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Parses `Z`, `UTC` or a `+HH:MM` / `-HH:MM` offset.
pub fn parse_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::InvalidOffset(raw.to_string());
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = trimmed.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 && rest.is_char_boundary(2) => rest.split_at(2),
        None => (rest, "00"),
    };
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3_600 + minutes * 60)).ok_or_else(invalid)
}

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default time unit when `--unit` is not given
    pub time_unit: String,
    /// Default cycles per time unit when `--frequency` is not given
    pub frequency: f64,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Offset applied to input instants written without one
    pub utc_offset: String,
    /// Field names used in error messages
    pub field_names: FieldNames,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            time_unit: TimeUnit::Day.as_str().to_string(),
            frequency: 1.0,
            log_level: LogLevel::Info,
            utc_offset: "+00:00".to_string(),
            field_names: FieldNames::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(unit) = std::env::var("CONTINUITY_TIME_UNIT") {
            config.time_unit = unit;
        }

        if let Ok(freq) = std::env::var("CONTINUITY_FREQUENCY") {
            config.frequency = freq
                .parse()
                .map_err(|_| ConfigError::InvalidFrequency(freq.clone()))?;
        }

        if let Ok(log_level) = std::env::var("CONTINUITY_LOG_LEVEL") {
            config.log_level = LogLevel::from_str(&log_level)?;
        }

        if let Ok(offset) = std::env::var("CONTINUITY_UTC_OFFSET") {
            config.utc_offset = offset;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        TimeUnit::normalize(&self.time_unit)
            .map_err(|e| ConfigError::InvalidTimeUnit(e.to_string()))?;

        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(ConfigError::InvalidFrequency(self.frequency.to_string()));
        }

        parse_offset(&self.utc_offset)?;
        Ok(())
    }

    /// The offset for input instants without one
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        parse_offset(&self.utc_offset)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(unit) = &cli.time_unit {
            self.time_unit = unit.clone();
        }
        if let Some(freq) = cli.frequency {
            self.frequency = freq;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(offset) = &cli.utc_offset {
            self.utc_offset = offset.clone();
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Time unit override
    pub time_unit: Option<String>,
    /// Frequency override
    pub frequency: Option<f64>,
    /// Log level override
    pub log_level: Option<String>,
    /// UTC offset override
    pub utc_offset: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        CliConfig::from_file(config_path)?
    } else {
        CliConfig::default()
    };

    // Only variables that are actually set override the file
    let env_config = CliConfig::from_env()?;
    if std::env::var("CONTINUITY_TIME_UNIT").is_ok() {
        config.time_unit = env_config.time_unit;
    }
    if std::env::var("CONTINUITY_FREQUENCY").is_ok() {
        config.frequency = env_config.frequency;
    }
    if std::env::var("CONTINUITY_LOG_LEVEL").is_ok() {
        config.log_level = env_config.log_level;
    }
    if std::env::var("CONTINUITY_UTC_OFFSET").is_ok() {
        config.utc_offset = env_config.utc_offset;
    }

    config.merge_with_cli(cli)?;

    config.validate()?;

    Ok(config)
}
