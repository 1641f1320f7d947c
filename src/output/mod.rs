//! Output formatting for studynest.
//!
//! Every command renders either pretty terminal text or JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::StudyNestError;
use crate::features::settings::Settings;
use crate::features::tasks::Task;

pub use json::*;
pub use pretty::*;

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `StudyNestError::Parse` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[Task],
    title: &str,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `StudyNestError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, StudyNestError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format settings based on output format
///
/// # Errors
///
/// Returns `StudyNestError::Parse` if JSON serialization fails.
pub fn format_settings(
    settings: &Settings,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(settings)),
        OutputFormat::Json => to_json(settings),
    }
}
