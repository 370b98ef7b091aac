//! Core library for the Forge project workbench.
//!
//! Forge manages software projects, each with an in-memory file tree, a
//! generated five-step build plan executed by a simulated backend, an
//! optional attached AI model and a GitHub connection record. Projects are
//! persisted as one JSON document in a key-value store.
//!
//! # Architecture
//!
//! - [`tree`] and [`workflow`] hold the pure snapshot transitions: every call
//!   takes a value and returns a new one.
//! - [`manager`] is the single source of truth. It applies transitions under
//!   a lock, persists through [`store`] and schedules simulated execution on
//!   the [`scheduler`].
//! - [`display`] renders models and outcomes as markdown for the CLI's
//!   terminal renderer.
//!
//! # Quick Start
//!
//! ```rust
//! use forge_core::{
//!     params::{CreateProject, GeneratePlan, Id},
//!     ManagerBuilder, Timings,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ManagerBuilder::new()
//!     .with_database_path(Some("forge.db"))
//!     .with_timings(Timings::instant())
//!     .build()
//!     .await?;
//!
//! let project = manager
//!     .create_project(&CreateProject {
//!         name: "Demo".to_string(),
//!         description: "A todo app".to_string(),
//!     })
//!     .await?;
//!
//! manager
//!     .generate_plan(&GeneratePlan {
//!         project_id: project.id.clone(),
//!         description: project.description.clone(),
//!     })
//!     .await?;
//! manager.approve_plan(&Id::new(project.id.clone())).await?;
//! manager.wait_idle().await;
//!
//! println!("{}", manager.get_project(&Id::new(project.id)).await?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod hub;
pub mod manager;
pub mod models;
pub mod params;
pub mod scheduler;
pub mod store;
pub mod terminal;
pub mod tree;
pub mod workflow;

// Re-export commonly used types
pub use config::Timings;
pub use display::{
    CreateResult, DeleteResult, FileTree, LocalDateTime, ModelList, OperationStatus,
    ProjectSummaries,
};
pub use error::{ForgeError, Result};
pub use hub::{HubClient, ModelSource, DEFAULT_HUB_URL};
pub use manager::{ContinueOutcome, DownloadOutcome, ManagerBuilder, ModelRemoval, ProjectManager};
pub use models::{
    AiModel, FileNode, GithubConfig, NodeKind, Project, ProjectStatus, ProjectStep, StepStatus,
};
pub use store::{KeyValueStore, MemoryStore, ProjectStore, SqliteStore};
