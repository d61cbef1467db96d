//! Configuration commands.

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::StudyBuddyError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized or saved.
pub fn config(
    cmd: ConfigCommands,
    current: &Config,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, StudyBuddyError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Json => to_json(current),
            OutputFormat::Pretty => serde_yaml::to_string(current)
                .map(|yaml| yaml.trim_end().to_string())
                .map_err(|e| StudyBuddyError::Config(format!("Failed to serialize config: {e}"))),
        },

        ConfigCommands::SetDuration { minutes } => {
            let mut updated = current.clone();
            updated.focus.focus_duration_minutes = minutes;

            paths.ensure_dirs()?;
            updated.save_to_path(&paths.config_file)?;
            tracing::info!(minutes = minutes.get(), "default focus length changed");

            match format {
                OutputFormat::Json => to_json(&updated.focus),
                OutputFormat::Pretty => Ok(format!("Focus length set to {minutes}.")),
            }
        }

        ConfigCommands::Path => Ok(paths.config_file.display().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::FocusMinutes;
    use tempfile::TempDir;

    #[test]
    fn test_show_pretty_is_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());

        let out = config(ConfigCommands::Show, &Config::default(), &paths, OutputFormat::Pretty)
            .unwrap();
        assert!(out.contains("focus_duration_minutes: 25"));
    }

    #[test]
    fn test_set_duration_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join(".studybuddy"));
        let minutes = FocusMinutes::try_from(45).unwrap();

        let out = config(
            ConfigCommands::SetDuration { minutes },
            &Config::default(),
            &paths,
            OutputFormat::Pretty,
        )
        .unwrap();
        assert_eq!(out, "Focus length set to 45m.");

        let loaded = Config::load_from_path(&paths.config_file).unwrap();
        assert_eq!(loaded.focus.focus_duration_minutes, minutes);
    }

    #[test]
    fn test_path() {
        let paths = Paths::with_root(std::path::PathBuf::from("/tmp/sb"));
        let out = config(ConfigCommands::Path, &Config::default(), &paths, OutputFormat::Json)
            .unwrap();
        assert_eq!(out, "/tmp/sb/config.yaml");
    }
}
