//! Path resolution for studynest configuration and data files.
//!
//! All studynest data is stored in `~/.studynest/` unless overridden:
//! - `config.yaml` - Application configuration
//! - `studynest.db` - `SQLite` key-value store (settings, tasks, stats)
//! - `logs/` - Rotated log files
//! - `backups/` - Default destination for exported backups

use std::path::PathBuf;

use crate::error::StudyNestError;

/// Paths to studynest configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.studynest/`
    pub root: PathBuf,
    /// Config file: `~/.studynest/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.studynest/studynest.db`
    pub database: PathBuf,
    /// Logs directory: `~/.studynest/logs/`
    pub logs: PathBuf,
    /// Backups directory: `~/.studynest/backups/`
    pub backups: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StudyNestError> {
        let home = std::env::var("HOME").map_err(|_| {
            StudyNestError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".studynest")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("studynest.db"),
            logs: root.join("logs"),
            backups: root.join("backups"),
            root,
        }
    }

    /// Resolve paths from an optional override, falling back to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the home directory
    /// cannot be determined.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self, StudyNestError> {
        data_dir.map_or_else(Self::new, |root| Ok(Self::with_root(root)))
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StudyNestError> {
        for dir in [&self.root, &self.logs, &self.backups] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    StudyNestError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}
