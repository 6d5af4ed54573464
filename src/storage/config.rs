//! Configuration handling for the goal review
//!
//! Configuration is read from `--config` (or `$GOALS_CONFIG`) when given,
//! otherwise from `~/.config/goals/config.toml` if it exists. Every value
//! can be overridden on the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::GoalsFormat;

/// Default review window, one week
pub const DEFAULT_DAYS: u32 = 7;

/// Longest review window accepted, about a century
pub const MAX_DAYS: u32 = 36_500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for the report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Review configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Path to todo.txt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<PathBuf>,

    /// Path to done.txt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<PathBuf>,

    /// Path to the goals file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<PathBuf>,

    /// Days to review (default 7)
    pub days: u32,

    /// Optional `.ics` calendar export
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<PathBuf>,

    /// Goals file parsing policy
    pub goals_format: GoalsFormat,

    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            todo: None,
            done: None,
            goals: None,
            days: DEFAULT_DAYS,
            calendar: None,
            goals_format: GoalsFormat::Strict,
            default_format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Loads configuration from an explicit file or the default location
    ///
    /// An explicit file must exist; a missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Returns the global config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "goals", "goals").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Reads and validates a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parses and validates TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::Invalid(
                "days must be a positive number".to_string(),
            ));
        }
        if self.days > MAX_DAYS {
            return Err(ConfigError::Invalid(format!(
                "days must be at most {}",
                MAX_DAYS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.days, 7);
        assert_eq!(config.goals_format, GoalsFormat::Strict);
        assert_eq!(config.default_format, OutputFormat::Text);
        assert!(config.calendar.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r##"
todo = "/home/me/todo.txt"
done = "/home/me/done.txt"
goals = "/home/me/#goals.txt"
days = 14
calendar = "/home/me/cal.ics"
goals_format = "legacy"
default_format = "json"
"##;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.todo, Some(PathBuf::from("/home/me/todo.txt")));
        assert_eq!(config.goals, Some(PathBuf::from("/home/me/#goals.txt")));
        assert_eq!(config.days, 14);
        assert_eq!(config.calendar, Some(PathBuf::from("/home/me/cal.ics")));
        assert_eq!(config.goals_format, GoalsFormat::Legacy);
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config = Config::parse("todo = \"todo.txt\"\n").unwrap();
        assert_eq!(config.days, 7);
        assert!(config.done.is_none());
    }

    #[test]
    fn zero_days_is_invalid() {
        let err = Config::parse("days = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn oversized_days_is_invalid() {
        assert!(Config::parse("days = 36500\n").is_ok());

        let err = Config::parse("days = 4000000000\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("at most 36500"));
    }

    #[test]
    fn unknown_goals_format_is_a_parse_error() {
        let err = Config::parse("goals_format = \"fuzzy\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "days = 3\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.days, 3);
    }

    #[test]
    fn config_roundtrip() {
        let config = Config {
            todo: Some(PathBuf::from("todo.txt")),
            days: 10,
            ..Config::default()
        };

        let content = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::parse(&content).unwrap(), config);
    }
}
