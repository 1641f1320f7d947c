//! JSON output formatting for studynest.

use serde::Serialize;
use serde_json::json;

use crate::error::StudyNestError;
use crate::features::tasks::Task;

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `StudyNestError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], list_name: &str) -> Result<String, StudyNestError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "completed": tasks.iter().filter(|task| task.completed).count(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format any serializable value as JSON
///
/// # Errors
///
/// Returns `StudyNestError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StudyNestError> {
    Ok(serde_json::to_string_pretty(value)?)
}
