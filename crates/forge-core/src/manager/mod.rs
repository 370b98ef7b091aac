//! High-level project manager.
//!
//! [`ProjectManager`] is the single source of truth for the project
//! collection. Every mutation computes a new [`Project`] value from a
//! snapshot, replaces the stored project by id and persists the collection,
//! all while holding the state lock so concurrent mutations serialize.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  ProjectManager │    │ workflow / tree │    │  ProjectStore   │
//! │  (entry points, │───▶│ (pure snapshot  │───▶│ (cache + kv     │
//! │   scheduling)   │    │  transitions)   │    │  persistence)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`ProjectManager`] instances
//! - [`project_ops`]: Create, update, delete, list and select projects
//! - [`plan_ops`]: Plan generation and step execution
//! - [`file_ops`]: File tree mutations
//! - [`integration_ops`]: GitHub, AI models and the terminal
//!
//! ## Deferred work
//!
//! Step execution is scheduled on a [`Scheduler`] keyed by project id.
//! Deleting a project cancels its pending work, and each deferred step
//! re-reads the project before applying, so nothing lands on a deleted
//! project. At most one execution chain runs per project, and at most one
//! model download runs per manager.
//!
//! # Usage
//!
//! ```rust
//! use forge_core::{params::CreateProject, ManagerBuilder, Timings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ManagerBuilder::new()
//!     .with_memory_store()
//!     .with_timings(Timings::instant())
//!     .build()
//!     .await?;
//!
//! let project = manager
//!     .create_project(&CreateProject {
//!         name: "Demo".to_string(),
//!         description: "A demo project".to_string(),
//!     })
//!     .await?;
//! assert_eq!(project.root_directory.path, "/Demo");
//! # Ok(())
//! # }
//! ```

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
};

use tokio::sync::Mutex as AsyncMutex;

use crate::{
    config::Timings,
    error::{ForgeError, Result},
    hub::ModelSource,
    models::{AiModel, Project},
    scheduler::Scheduler,
    store::ProjectStore,
};

pub mod builder;
pub mod file_ops;
pub mod integration_ops;
pub mod plan_ops;
pub mod project_ops;


pub use builder::ManagerBuilder;

/// Outcome of [`ProjectManager::continue_execution`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContinueOutcome {
    /// Every step already ran; nothing was scheduled.
    AlreadyComplete,
    /// Auto-chaining was enabled and execution resumes at `index`.
    Resumed { project: Project, index: usize },
}

/// Outcome of [`ProjectManager::download_model`].
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    /// Another download was in flight; nothing changed.
    Declined,
    /// The model was downloaded and, if a target project was known,
    /// attached to it.
    Downloaded {
        model: AiModel,
        project_id: Option<String>,
    },
}

/// Outcome of [`ProjectManager::delete_model`].
#[derive(Debug, Clone, PartialEq)]
pub enum ModelRemoval {
    Removed(AiModel),
    /// The project had no model attached.
    NoModel,
}

/// Main manager interface for projects and their simulated backend.
#[derive(Clone)]
pub struct ProjectManager {
    inner: Arc<Inner>,
}

struct Inner {
    state: AsyncMutex<State>,
    scheduler: Scheduler,
    timings: Timings,
    models: ModelSource,
    executing: Mutex<HashSet<String>>,
    downloading: AtomicBool,
}

struct State {
    store: ProjectStore,
    current: Option<String>,
}

impl ProjectManager {
    pub(crate) fn new(store: ProjectStore, timings: Timings, models: ModelSource) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: AsyncMutex::new(State {
                    store,
                    current: None,
                }),
                scheduler: Scheduler::new(),
                timings,
                models,
                executing: Mutex::new(HashSet::new()),
                downloading: AtomicBool::new(false),
            }),
        }
    }

    /// Configured latencies.
    pub fn timings(&self) -> &Timings {
        &self.inner.timings
    }

    /// Waits until all scheduled work has finished.
    pub async fn wait_idle(&self) {
        self.inner.scheduler.wait_idle().await;
    }

    /// Number of scheduled tasks still running.
    pub fn pending_tasks(&self) -> usize {
        self.inner.scheduler.pending()
    }

    /// Runs `change` against the stored project and commits the returned
    /// replacement, if any, under one lock. A failed save leaves the stored
    /// project untouched.
    pub(crate) async fn transact<T, F>(&self, project_id: &str, change: F) -> Result<T>
    where
        F: FnOnce(&Project) -> Result<(Option<Project>, T)>,
    {
        let mut state = self.inner.state.lock().await;
        let project = state
            .store
            .get(project_id)
            .ok_or_else(|| ForgeError::not_found("Project", project_id))?;

        let (replacement, value) = change(project)?;
        if let Some(replacement) = replacement {
            state.store.replace(replacement).await?;
        }
        Ok(value)
    }

    /// Claims the per-project execution slot.
    pub(crate) fn claim_execution(&self, project_id: &str) -> Result<ExecutionGuard> {
        let mut executing = self
            .inner
            .executing
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !executing.insert(project_id.to_string()) {
            return Err(ForgeError::invalid_state(format!(
                "Execution already in progress for project '{project_id}'"
            )));
        }
        Ok(ExecutionGuard {
            inner: Arc::clone(&self.inner),
            project_id: project_id.to_string(),
        })
    }

    /// Whether a step execution chain is scheduled or running.
    pub fn is_executing(&self, project_id: &str) -> bool {
        self.inner
            .executing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(project_id)
    }

    /// Whether a model download is in flight.
    pub fn is_model_downloading(&self) -> bool {
        self.inner.downloading.load(Ordering::SeqCst)
    }

    pub(crate) fn claim_download(&self) -> Option<DownloadGuard<'_>> {
        self.inner
            .downloading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| DownloadGuard {
                flag: &self.inner.downloading,
            })
    }
}

/// Holds a project's execution slot; released on drop, including when the
/// owning task is cancelled.
pub(crate) struct ExecutionGuard {
    inner: Arc<Inner>,
    project_id: String,
}

impl Drop for ExecutionGuard {
    fn drop(&mut self) {
        self.inner
            .executing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.project_id);
    }
}

/// Holds the single model download slot.
pub(crate) struct DownloadGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for DownloadGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
