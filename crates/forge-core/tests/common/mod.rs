use forge_core::{ManagerBuilder, ProjectManager, Timings};
use tempfile::TempDir;

/// Helper function to create a manager over a temporary database
pub async fn create_test_manager() -> (TempDir, ProjectManager) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let manager = open_manager(&temp_dir).await;
    (temp_dir, manager)
}

/// Opens another manager over the database in `temp_dir`
pub async fn open_manager(temp_dir: &TempDir) -> ProjectManager {
    let db_path = temp_dir.path().join("test.db");
    ManagerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_timings(Timings::instant())
        .build()
        .await
        .expect("Failed to create manager")
}
