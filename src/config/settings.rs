//! Configuration settings for studybuddy.
//!
//! Settings are loaded from `~/.studybuddy/config.yaml`. Every field is
//! optional; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::StudyBuddyError;
use crate::focus::FocusMinutes;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Timer settings.
    pub focus: FocusConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Output format used when `--output` is not given.
    pub default_output: OutputFormat,
}

/// Timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FocusConfig {
    /// Focus length the timer starts with. Must be 15, 25, 30, 45 or 60.
    pub focus_duration_minutes: FocusMinutes,
    /// Show a desktop notification when a session completes.
    #[serde(default = "default_true")]
    pub notifications: bool,
    /// Play a sound when a session completes.
    #[serde(default = "default_true")]
    pub notification_sound: bool,
    /// Keep completed sessions in the history database.
    #[serde(default = "default_true")]
    pub record_history: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            focus_duration_minutes: FocusMinutes::DEFAULT,
            notifications: default_true(),
            notification_sound: default_true(),
            record_history: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or
    /// names a focus length outside the allowed set.
    pub fn load_from_path(path: &Path) -> Result<Self, StudyBuddyError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            StudyBuddyError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            StudyBuddyError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), StudyBuddyError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| StudyBuddyError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            StudyBuddyError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.focus.focus_duration_minutes.get(), 25);
        assert!(config.focus.notifications);
        assert!(config.focus.notification_sound);
        assert!(config.focus.record_history);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.general.default_output = OutputFormat::Json;
        config.focus.focus_duration_minutes = FocusMinutes::try_from(45).unwrap();
        config.focus.notification_sound = false;

        config.save_to_path(&config_path).unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
focus:
  focus_duration_minutes: 30
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.focus.focus_duration_minutes.get(), 30);
        assert!(config.focus.notifications);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_focus_duration_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        std::fs::write(&config_path, "focus:\n  focus_duration_minutes: 20\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, StudyBuddyError::Config(_)));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        std::fs::write(&config_path, "focus: [unterminated").unwrap();
        assert!(Config::load_from_path(&config_path).is_err());
    }
}
