//! Key-value reads and writes.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_VALUE_SQL: &str = "SELECT value FROM kv WHERE key = ?1";
const UPSERT_VALUE_SQL: &str = "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_VALUE_SQL: &str = "DELETE FROM kv WHERE key = ?1";

impl super::Database {
    /// Reads the value stored under `key`.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_VALUE_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read value")
    }

    /// Inserts or replaces the value stored under `key`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPSERT_VALUE_SQL,
            params![key, value, Timestamp::now().to_string()],
        )
        .db_context("Failed to write value")?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Deletes `key`, returning whether a row was removed.
    pub fn remove_value(&mut self, key: &str) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_VALUE_SQL, params![key])
            .db_context("Failed to delete value")?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Database;

    #[test]
    fn test_set_get_remove() {
        let mut db = Database::in_memory().unwrap();
        assert_eq!(db.get_value("projects").unwrap(), None);

        db.set_value("projects", "[]").unwrap();
        assert_eq!(db.get_value("projects").unwrap().as_deref(), Some("[]"));

        db.set_value("projects", "[1]").unwrap();
        assert_eq!(db.get_value("projects").unwrap().as_deref(), Some("[1]"));

        assert!(db.remove_value("projects").unwrap());
        assert!(!db.remove_value("projects").unwrap());
        assert_eq!(db.get_value("projects").unwrap(), None);
    }

    #[test]
    fn test_schema_initialization_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("kv.db");
        {
            let mut db = Database::new(&path).unwrap();
            db.set_value("k", "v").unwrap();
        }
        let db = Database::new(&path).unwrap();
        assert_eq!(db.get_value("k").unwrap().as_deref(), Some("v"));
    }
}
