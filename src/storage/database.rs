//! `SQLite` database connection and the key-value table on top of it.
//!
//! The database is stored at `~/.studynest/studynest.db` and holds a single
//! `local_storage` table of JSON documents keyed by name.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StudyNestError;

use super::kv::KeyValueStore;
use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StudyNestError> {
        let conn = Connection::open(path).map_err(|e| {
            StudyNestError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, StudyNestError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StudyNestError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Run database migrations.
    fn migrate(&self) -> Result<(), StudyNestError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, StudyNestError> {
        migrations::get_version(&self.conn)
    }

    /// List stored keys in name order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn keys(&self) -> Result<Vec<String>, StudyNestError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM local_storage ORDER BY key")
            .map_err(|e| StudyNestError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| StudyNestError::Database(format!("Failed to query keys: {e}")))?;

        rows.collect::<Result<Vec<String>, _>>()
            .map_err(|e| StudyNestError::Database(e.to_string()))
    }
}

fn upsert(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<usize> {
    conn.execute(
        r"INSERT INTO local_storage (key, value, updated_at)
          VALUES (?1, ?2, ?3)
          ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at",
        params![key, value, Utc::now().to_rfc3339()],
    )
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StudyNestError> {
        self.conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StudyNestError::Database(format!("Failed to read '{key}': {e}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StudyNestError> {
        upsert(&self.conn, key, value)
            .map_err(|e| StudyNestError::Database(format!("Failed to write '{key}': {e}")))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StudyNestError> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1", [key])
            .map_err(|e| StudyNestError::Database(format!("Failed to delete '{key}': {e}")))?;
        Ok(())
    }

    fn set_many(&self, entries: &[(String, String)]) -> Result<(), StudyNestError> {
        // `unchecked_transaction` because the connection is only borrowed
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| StudyNestError::Database(format!("Failed to begin transaction: {e}")))?;

        for (key, value) in entries {
            upsert(&tx, key, value)
                .map_err(|e| StudyNestError::Database(format!("Failed to write '{key}': {e}")))?;
        }

        tx.commit()
            .map_err(|e| StudyNestError::Database(format!("Failed to commit: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_open_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open_at(&db_path).unwrap();
        assert!(db.schema_version().unwrap() > 0);
        assert!(db_path.exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.set("studynest_tasks", "[]").unwrap();
        }

        {
            let db = Database::open_at(&db_path).unwrap();
            assert_eq!(db.get("studynest_tasks").unwrap(), Some("[]".to_string()));
        }
    }

    #[test]
    fn test_set_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.set("k", "1").unwrap();
        db.set("k", "2").unwrap();

        assert_eq!(db.get("k").unwrap(), Some("2".to_string()));
        assert_eq!(db.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_remove() {
        let db = Database::open_in_memory().unwrap();
        db.set("k", "1").unwrap();
        db.remove("k").unwrap();

        assert_eq!(db.get("k").unwrap(), None);
        assert!(db.keys().unwrap().is_empty());
    }

    #[test]
    fn test_set_many() {
        let db = Database::open_in_memory().unwrap();
        db.set_many(&[
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ])
        .unwrap();

        assert_eq!(db.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
