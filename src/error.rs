//! Error types for studynest.

use thiserror::Error;

/// Errors that can occur in studynest.
#[derive(Error, Debug)]
pub enum StudyNestError {
    /// Configuration file or data directory problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value store failure.
    #[error("Database error: {0}")]
    Database(String),

    /// JSON (de)serialization failure.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A backup file was rejected before anything was applied.
    #[error("Import failed: {0}")]
    InvalidBackup(String),

    /// Input from the user that fails validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Terminal setup or drawing failure.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StudyNestError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) | Self::InvalidBackup(_) => 2,
            Self::NotFound(_) => 3,
            _ => 1,
        }
    }
}

impl From<rusqlite::Error> for StudyNestError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}
