//! Project collection persistence.
//!
//! [`KeyValueStore`] is the string key-value collaborator the workbench
//! persists through. [`ProjectStore`] keeps the in-memory copy of the project
//! collection and mirrors it to the backend as one JSON document under
//! [`PROJECTS_KEY`].

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use log::debug;
use tokio::task;

use crate::{
    db::Database,
    error::{ForgeError, Result},
    models::Project,
    tree,
};

/// Key under which the serialized project collection is stored.
pub const PROJECTS_KEY: &str = "projects";

/// String key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// SQLite-backed store; opens a fresh connection per call.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        Database::new(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Database::new(&self.path)?.get_value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Database::new(&self.path)?.set_value(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        Database::new(&self.path)?.remove_value(key).map(|_| ())
    }
}

/// Process-local store used for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// Serializes a project collection to the persisted JSON layout.
pub fn encode_projects(projects: &[Project]) -> Result<String> {
    Ok(serde_json::to_string(projects)?)
}

/// Parses a persisted collection and checks every tree's path invariant.
pub fn decode_projects(json: &str) -> Result<Vec<Project>> {
    let projects: Vec<Project> = serde_json::from_str(json)?;
    for project in &projects {
        tree::validate_paths(&project.root_directory)?;
    }
    Ok(projects)
}

/// In-memory project collection mirrored to a [`KeyValueStore`].
pub struct ProjectStore {
    backend: Arc<dyn KeyValueStore>,
    projects: Vec<Project>,
}

impl ProjectStore {
    /// Creates an empty store; call [`ProjectStore::load`] to read the
    /// persisted collection.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            projects: Vec::new(),
        }
    }

    /// Replaces the cache with the persisted collection.
    pub async fn load(&mut self) -> Result<&[Project]> {
        let backend = Arc::clone(&self.backend);
        let stored = task::spawn_blocking(move || backend.get(PROJECTS_KEY))
            .await
            .map_err(|e| ForgeError::Configuration {
                message: format!("Task join error: {e}"),
            })??;

        self.projects = match stored {
            Some(json) => decode_projects(&json)?,
            None => Vec::new(),
        };
        debug!("Loaded {} projects", self.projects.len());
        Ok(&self.projects)
    }

    async fn persist(&self, projects: &[Project]) -> Result<()> {
        let json = encode_projects(projects)?;
        let backend = Arc::clone(&self.backend);
        task::spawn_blocking(move || backend.set(PROJECTS_KEY, &json))
            .await
            .map_err(|e| ForgeError::Configuration {
                message: format!("Task join error: {e}"),
            })??;
        debug!("Saved {} projects", projects.len());
        Ok(())
    }

    /// Persists `candidate` and, only once the write succeeded, makes it the
    /// cached collection.
    async fn commit(&mut self, candidate: Vec<Project>) -> Result<()> {
        self.persist(&candidate).await?;
        self.projects = candidate;
        Ok(())
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub(crate) async fn insert(&mut self, project: Project) -> Result<()> {
        let mut candidate = self.projects.clone();
        candidate.push(project);
        self.commit(candidate).await
    }

    /// Replaces the project with the same id; returns false if absent.
    pub(crate) async fn replace(&mut self, project: Project) -> Result<bool> {
        let mut candidate = self.projects.clone();
        match candidate.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => *slot = project,
            None => return Ok(false),
        }
        self.commit(candidate).await?;
        Ok(true)
    }

    /// Removes the project with `id`; returns false if absent.
    pub(crate) async fn remove(&mut self, id: &str) -> Result<bool> {
        if !self.contains(id) {
            return Ok(false);
        }
        let candidate = self
            .projects
            .iter()
            .filter(|project| project.id != id)
            .cloned()
            .collect();
        self.commit(candidate).await?;
        Ok(true)
    }
}
