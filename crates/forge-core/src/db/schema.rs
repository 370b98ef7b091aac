//! Database schema initialization.

use crate::error::{DatabaseResultExt, Result};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT
);
";

impl super::Database {
    /// Creates the `kv` table if it does not exist yet.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute_batch(SCHEMA_SQL)
            .db_context("Failed to initialize database schema")
    }
}

#[cfg(test)]
mod tests {
    use super::super::Database;

    #[test]
    fn test_schema_records_write_time() {
        let mut db = Database::in_memory().unwrap();
        db.set_value("projects", "[]").unwrap();

        let updated_at: Option<String> = db
            .connection
            .query_row(
                "SELECT updated_at FROM kv WHERE key = 'projects'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        let updated_at = updated_at.expect("updated_at not recorded");
        assert!(updated_at.parse::<jiff::Timestamp>().is_ok());
    }
}
