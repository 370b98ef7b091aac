//! Builder for creating and configuring ProjectManager instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;
use tokio::task;

use super::ProjectManager;
use crate::{
    config::Timings,
    error::{ForgeError, Result},
    hub::ModelSource,
    store::{KeyValueStore, MemoryStore, ProjectStore, SqliteStore},
};

/// Builder for creating and configuring ProjectManager instances.
#[derive(Default)]
pub struct ManagerBuilder {
    database_path: Option<PathBuf>,
    store: Option<Arc<dyn KeyValueStore>>,
    timings: Timings,
    models: ModelSource,
}

impl ManagerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/forge/forge.db` or `~/.local/share/forge/forge.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses an explicit key-value backend instead of a database file.
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Keeps everything in memory.
    pub fn with_memory_store(self) -> Self {
        self.with_store(Arc::new(MemoryStore::new()))
    }

    /// Overrides the simulated latencies.
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Selects where model searches are answered from.
    pub fn with_model_source(mut self, models: ModelSource) -> Self {
        self.models = models;
        self
    }

    /// Builds the manager and loads the persisted projects.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::FileSystem` if the database directory cannot be
    /// created, `ForgeError::Database` if database initialization fails, and
    /// `ForgeError::Serialization` if the stored collection cannot be parsed.
    pub async fn build(self) -> Result<ProjectManager> {
        let backend = match self.store {
            Some(store) => store,
            None => {
                let db_path = match self.database_path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                Arc::new(Self::open_sqlite(db_path).await?)
            }
        };

        let mut store = ProjectStore::new(backend);
        let loaded = store.load().await?.len();
        info!("Loaded {loaded} projects");

        Ok(ProjectManager::new(store, self.timings, self.models))
    }

    async fn open_sqlite(db_path: PathBuf) -> Result<SqliteStore> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ForgeError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        task::spawn_blocking(move || SqliteStore::open(&db_path))
            .await
            .map_err(|e| ForgeError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("forge")
            .place_data_file("forge.db")
            .map_err(|e| ForgeError::XdgDirectory(e.to_string()))
    }
}
