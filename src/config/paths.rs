//! Path resolution for studybuddy configuration and data files.
//!
//! All studybuddy data is stored in `~/.studybuddy/`:
//! - `config.yaml` - Main configuration file
//! - `studybuddy.db` - SQLite database of completed sessions
//! - `logs/` - Daily rolling log files

use std::path::PathBuf;

use crate::error::StudyBuddyError;

/// Name of the data directory under the home directory.
const ROOT_DIR: &str = ".studybuddy";

/// Paths to studybuddy configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.studybuddy/`
    pub root: PathBuf,
    /// Config file: `~/.studybuddy/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.studybuddy/studybuddy.db`
    pub database: PathBuf,
    /// Log directory: `~/.studybuddy/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StudyBuddyError> {
        let home = std::env::var("HOME").map_err(|_| {
            StudyBuddyError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(ROOT_DIR)))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("studybuddy.db"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StudyBuddyError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    StudyBuddyError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(ROOT_DIR)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-studybuddy");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("studybuddy.db"));
        assert_eq!(paths.logs, root.join("logs"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join(ROOT_DIR));

        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();

        assert!(paths.root.is_dir());
        assert!(paths.logs.is_dir());
        assert!(!paths.database.exists());
    }
}
