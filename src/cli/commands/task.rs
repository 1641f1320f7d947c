//! Task command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, TaskCommands};
use crate::core::Clock;
use crate::error::StudyNestError;
use crate::features::tasks::{Task, TaskList};
use crate::output::{format_task, format_tasks, to_json};
use crate::storage::KeyValueStore;

/// Execute task subcommands.
///
/// # Errors
///
/// Returns an error for blank text or unknown ids, or if the list cannot be
/// persisted.
pub fn task(
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
    cmd: Option<TaskCommands>,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    let mut list = TaskList::load(store, clock);

    match cmd {
        None => format_tasks(list.tasks(), "Tasks", format),
        Some(TaskCommands::List { pending }) => {
            if pending {
                let open: Vec<Task> =
                    list.tasks().iter().filter(|t| !t.completed).cloned().collect();
                format_tasks(&open, "Open tasks", format)
            } else {
                format_tasks(list.tasks(), "Tasks", format)
            }
        }
        Some(TaskCommands::Add { text }) => {
            let task = list.add(&text.join(" "))?;
            with_label("Added", task, format)
        }
        Some(TaskCommands::Done { id }) => {
            let task = list.toggle(id)?;
            let label = if task.completed { "Completed" } else { "Reopened" };
            with_label(label, task, format)
        }
        Some(TaskCommands::Edit { id, text }) => {
            let task = list.update(id, &text.join(" "))?;
            with_label("Updated", task, format)
        }
        Some(TaskCommands::Rm { id }) => {
            let task = list.delete(id)?;
            with_label("Deleted", &task, format)
        }
        Some(TaskCommands::Clear) => {
            let removed = list.clear_completed()?;
            match format {
                OutputFormat::Json => to_json(&json!({"removed": removed})),
                OutputFormat::Pretty if removed == 0 => {
                    Ok("No completed tasks to clear".dimmed().to_string())
                }
                OutputFormat::Pretty => Ok(format!("Cleared {removed} completed task(s)")
                    .green()
                    .to_string()),
            }
        }
        Some(TaskCommands::Current) => match (list.current(), format) {
            (Some(task), _) => format_task(task, format),
            (None, OutputFormat::Json) => to_json(&serde_json::Value::Null),
            (None, OutputFormat::Pretty) => Ok("No open tasks".dimmed().to_string()),
        },
    }
}

fn with_label(label: &str, task: &Task, format: OutputFormat) -> Result<String, StudyNestError> {
    match format {
        OutputFormat::Json => to_json(task),
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            format!("{label}:").green(),
            format_task(task, format)?
        )),
    }
}
