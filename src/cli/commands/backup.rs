//! Backup export and import commands.

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::core::{local_date_key, Clock};
use crate::error::StudyNestError;
use crate::features::backup::{self, ImportSummary};
use crate::output::to_json;
use crate::storage::KeyValueStore;

/// Write a backup file.
///
/// With no `out`, the file goes into `backups_dir` under the dated default
/// name. An `out` of `-` returns the backup itself instead of writing it.
///
/// # Errors
///
/// Returns an error if the backup cannot be serialized or written.
pub fn export(
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
    backups_dir: &Path,
    out: Option<PathBuf>,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    let backup = backup::export(store, clock);
    let contents = backup.to_json()?;

    if out.as_deref() == Some(Path::new("-")) {
        return Ok(contents);
    }

    let path = out.unwrap_or_else(|| {
        backups_dir.join(backup::default_file_name(local_date_key(backup.export_date)))
    });
    std::fs::write(&path, contents).map_err(|e| {
        StudyNestError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to write {}: {e}", path.display()),
        ))
    })?;

    match format {
        OutputFormat::Json => to_json(&json!({
            "path": path,
            "tasks": backup.tasks.len(),
            "totalSessions": backup.stats.total_sessions,
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} {}\n  {} tasks, {} sessions",
            "Exported to".green(),
            path.display(),
            backup.tasks.len(),
            backup.stats.total_sessions
        )),
    }
}

/// Read and apply a backup file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, fails validation, or cannot
/// be applied.
pub fn import(
    store: &dyn KeyValueStore,
    path: &Path,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        StudyNestError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {e}", path.display()),
        ))
    })?;
    let summary = backup::import(store, &contents)?;

    match format {
        OutputFormat::Json => to_json(&summary),
        OutputFormat::Pretty => Ok(describe(&summary)),
    }
}

fn describe(summary: &ImportSummary) -> String {
    let mut lines = vec![
        "Data imported successfully!".green().to_string(),
        format!("  {} tasks", summary.tasks),
    ];
    if summary.settings_merged {
        lines.push("  settings merged".to_string());
    }
    if summary.stats_replaced {
        lines.push("  stats replaced".to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::features::tasks::TaskList;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_export_to_default_location() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        let clock = clock();
        TaskList::load(&store, &clock).add("Read").unwrap();

        let output = export(&store, &clock, dir.path(), None, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        let path = PathBuf::from(parsed["path"].as_str().unwrap());
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("studynest-backup-"));
        assert_eq!(parsed["tasks"], 1);
    }

    #[test]
    fn test_export_to_stdout() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        let output = export(
            &store,
            &clock(),
            dir.path(),
            Some(PathBuf::from("-")),
            OutputFormat::Pretty,
        )
        .unwrap();

        assert!(output.contains("\"version\": \"1.0\""));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_then_import_file() {
        let dir = TempDir::new().unwrap();
        let source = MemoryStore::new();
        let clock = clock();
        TaskList::load(&source, &clock).add("Carry over").unwrap();
        let file = dir.path().join("backup.json");
        export(&source, &clock, dir.path(), Some(file.clone()), OutputFormat::Pretty).unwrap();

        let target = MemoryStore::new();
        let output = import(&target, &file, OutputFormat::Pretty).unwrap();

        assert!(output.contains("imported successfully"));
        assert_eq!(TaskList::load(&target, &clock).tasks()[0].text, "Carry over");
    }

    #[test]
    fn test_import_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        let result = import(&store, &dir.path().join("nope.json"), OutputFormat::Pretty);
        assert!(matches!(result, Err(StudyNestError::Io(_))));
    }
}
