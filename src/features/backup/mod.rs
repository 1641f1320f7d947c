//! Backup export and import.
//!
//! A backup is one JSON document holding the task list, settings and stats.
//! Imports are validated in full before a single write is issued.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::core::Clock;
use crate::error::StudyNestError;
use crate::features::settings::Settings;
use crate::features::stats::StatsRecord;
use crate::features::tasks::Task;
use crate::storage::{load_json, KeyValueStore, SETTINGS_KEY, STATS_KEY, TASKS_KEY};

/// Format version written into every backup.
pub const BACKUP_VERSION: &str = "1.0";

/// Everything a backup file carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub tasks: Vec<Task>,
    pub settings: Settings,
    pub stats: StatsRecord,
}

impl Backup {
    /// Pretty-printed JSON for writing to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, StudyNestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// What an import changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub tasks: usize,
    pub settings_merged: bool,
    pub stats_replaced: bool,
}

/// File name for a backup taken on `date`.
#[must_use]
pub fn default_file_name(date: NaiveDate) -> String {
    format!("studynest-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Snapshot the stored documents.
pub fn export<S: KeyValueStore + ?Sized>(store: &S, clock: &dyn Clock) -> Backup {
    let backup = Backup {
        version: BACKUP_VERSION.to_string(),
        export_date: clock.now(),
        tasks: load_json(store, TASKS_KEY, Vec::new()),
        settings: Settings::load(store),
        stats: load_json(store, STATS_KEY, StatsRecord::default()),
    };
    info!(tasks = backup.tasks.len(), "backup exported");
    backup
}

/// Apply a backup document.
///
/// `tasks` replaces the task list. `settings`, when present, is merged over
/// the current settings. `stats`, when present, replaces the stored record.
///
/// # Errors
///
/// Returns [`StudyNestError::InvalidBackup`] if the document is malformed,
/// in which case nothing is written. Storage failures propagate as is.
pub fn import<S: KeyValueStore + ?Sized>(
    store: &S,
    json: &str,
) -> Result<ImportSummary, StudyNestError> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| StudyNestError::InvalidBackup(format!("not valid JSON: {e}")))?;
    let Value::Object(fields) = document else {
        return Err(StudyNestError::InvalidBackup(
            "backup must be a JSON object".to_string(),
        ));
    };

    match fields.get("version") {
        Some(Value::String(version)) if !version.trim().is_empty() => {}
        _ => {
            return Err(StudyNestError::InvalidBackup(
                "invalid backup format: missing version".to_string(),
            ))
        }
    }

    let tasks: Vec<Task> = match fields.get("tasks") {
        None | Some(Value::Null) => {
            return Err(StudyNestError::InvalidBackup(
                "invalid backup format: missing tasks".to_string(),
            ))
        }
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| StudyNestError::InvalidBackup(format!("invalid tasks: {e}")))?,
    };

    let settings = match fields.get("settings") {
        None | Some(Value::Null) => None,
        Some(patch) => Some(
            Settings::load(store)
                .merged_with(patch)
                .map_err(|e| StudyNestError::InvalidBackup(e.to_string()))?,
        ),
    };

    let stats: Option<StatsRecord> = match fields.get("stats") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value(value.clone())
                .map_err(|e| StudyNestError::InvalidBackup(format!("invalid stats: {e}")))?,
        ),
    };

    let mut entries = vec![(TASKS_KEY.to_string(), serde_json::to_string(&tasks)?)];
    if let Some(settings) = &settings {
        entries.push((SETTINGS_KEY.to_string(), serde_json::to_string(settings)?));
    }
    if let Some(stats) = &stats {
        entries.push((STATS_KEY.to_string(), serde_json::to_string(stats)?));
    }
    store.set_many(&entries)?;

    let summary = ImportSummary {
        tasks: tasks.len(),
        settings_merged: settings.is_some(),
        stats_replaced: stats.is_some(),
    };
    info!(
        tasks = summary.tasks,
        settings = summary.settings_merged,
        stats = summary.stats_replaced,
        "backup imported"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::features::settings::Theme;
    use crate::features::stats::StatsAggregator;
    use crate::features::tasks::TaskList;
    use crate::storage::{MemoryStore, MockKeyValueStore};
    use chrono::TimeZone;
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    fn seeded_store(clock: &FixedClock) -> MemoryStore {
        let store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.theme = Theme::Dark;
        settings.save(&store).unwrap();

        TaskList::load(&store, clock).add("Read chapter 3").unwrap();
        StatsAggregator::load(&store, clock).add_session(25).unwrap();
        store
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(default_file_name(date), "studynest-backup-2024-03-09.json");
    }

    #[test]
    fn test_export_snapshot() {
        let clock = clock();
        let store = seeded_store(&clock);

        let backup = export(&store, &clock);
        assert_eq!(backup.version, BACKUP_VERSION);
        assert_eq!(backup.export_date, clock.now());
        assert_eq!(backup.tasks.len(), 1);
        assert_eq!(backup.settings.theme, Theme::Dark);
        assert_eq!(backup.stats.total_sessions, 1);

        let json: Value = serde_json::from_str(&backup.to_json().unwrap()).unwrap();
        assert_eq!(json["version"], "1.0");
        assert!(json.get("exportDate").is_some());
    }

    #[test]
    fn test_export_then_import_into_empty_store() {
        let clock = clock();
        let source = seeded_store(&clock);
        let json = export(&source, &clock).to_json().unwrap();

        let target = MemoryStore::new();
        let summary = import(&target, &json).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                tasks: 1,
                settings_merged: true,
                stats_replaced: true
            }
        );
        assert_eq!(export(&target, &clock), export(&source, &clock));
    }

    #[test]
    fn test_import_tasks_only_leaves_settings_and_stats() {
        let clock = clock();
        let store = seeded_store(&clock);
        let settings_before = store.get(SETTINGS_KEY).unwrap();
        let stats_before = store.get(STATS_KEY).unwrap();

        let payload = json!({
            "version": "1.0",
            "tasks": [
                {
                    "id": 1,
                    "text": "Imported",
                    "completed": true,
                    "createdAt": "2024-05-01T08:00:00Z"
                }
            ]
        });
        let summary = import(&store, &payload.to_string()).unwrap();

        assert_eq!(summary.tasks, 1);
        assert!(!summary.settings_merged);
        assert!(!summary.stats_replaced);
        assert_eq!(store.get(SETTINGS_KEY).unwrap(), settings_before);
        assert_eq!(store.get(STATS_KEY).unwrap(), stats_before);

        let tasks = TaskList::load(&store, &clock);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks.tasks()[0].text, "Imported");
    }

    #[test]
    fn test_import_merges_settings() {
        let clock = clock();
        let store = seeded_store(&clock);

        let payload = json!({"version": "1.0", "tasks": [], "settings": {"workDuration": 50}});
        import(&store, &payload.to_string()).unwrap();

        let settings = Settings::load(&store);
        assert_eq!(settings.work_duration, 50);
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn test_import_missing_version_changes_nothing() {
        let clock = clock();
        let store = seeded_store(&clock);
        let before = export(&store, &clock);

        let payload = json!({"tasks": [], "settings": {"workDuration": 50}});
        let err = import(&store, &payload.to_string()).unwrap_err();

        assert!(matches!(err, StudyNestError::InvalidBackup(_)));
        assert!(err.to_string().contains("missing version"));
        assert_eq!(export(&store, &clock), before);
    }

    #[test]
    fn test_import_rejects_malformed_documents() {
        let store = MemoryStore::new();
        for payload in [
            "not json",
            "[1, 2, 3]",
            r#"{"version": "", "tasks": []}"#,
            r#"{"version": 1, "tasks": []}"#,
            r#"{"version": "1.0"}"#,
            r#"{"version": "1.0", "tasks": null}"#,
            r#"{"version": "1.0", "tasks": "none"}"#,
            r#"{"version": "1.0", "tasks": [], "settings": {"breakDuration": 99}}"#,
            r#"{"version": "1.0", "tasks": [], "stats": {"totalSessions": "many"}}"#,
        ] {
            let err = import(&store, payload).unwrap_err();
            assert!(
                matches!(err, StudyNestError::InvalidBackup(_)),
                "expected rejection for {payload}"
            );
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_writes_once() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store.expect_set().never();
        store
            .expect_set_many()
            .times(1)
            .withf(|entries| entries.len() == 3)
            .returning(|_| Ok(()));

        let payload = json!({"version": "1.0", "tasks": [], "settings": {}, "stats": {}});
        import(&store, &payload.to_string()).unwrap();
    }
}
