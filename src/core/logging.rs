//! Tracing setup.
//!
//! Events go to a daily-rotated file under `<data dir>/logs/` and, when
//! requested, to stderr as well.

use std::path::Path;

use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use crate::error::StudyNestError;

/// Prefix of the rotated log files.
pub const LOG_PREFIX: &str = "studynest";

/// Number of rotated log files to keep.
const MAX_LOG_FILES: usize = 5;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created, the filter is
/// invalid, or a subscriber is already installed.
pub fn enable_logging(
    log_dir: &Path,
    level: &str,
    show_stderr: bool,
) -> Result<(), StudyNestError> {
    let appender = Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_PREFIX)
        .build(log_dir)
        .map_err(|e| {
            StudyNestError::Config(format!(
                "Failed to open log directory {}: {e}",
                log_dir.display()
            ))
        })?;

    let stderr = std::io::stderr.with_filter(move |_| show_stderr);

    let directive = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| format!("{}={level}", env!("CARGO_PKG_NAME")));
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| StudyNestError::Config(format!("Invalid log filter '{directive}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(stderr.and(appender))
        .try_init()
        .map_err(|e| StudyNestError::Config(format!("Failed to install logger: {e}")))
}
