//! Display formatting and result wrapper types.
//!
//! Domain models implement `Display` directly in [`models`]; the wrappers
//! here cover collections and operation outcomes. Everything renders as
//! markdown, which the CLI hands to its terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers and    │    │   Markdown      │
//! │ (Project, Step, │───▶│ result types    │───▶│    output       │
//! │  FileNode)      │    │                 │    │  (terminal)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers (ProjectSummaries, ModelList, FileTree)
//! - [`results`]: Operation result types (CreateResult, DeleteResult) and
//!   manager outcomes
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage
//!
//! ```rust
//! use forge_core::{
//!     display::{CreateResult, FileTree, OperationStatus},
//!     models::Project,
//! };
//!
//! let project = Project::new("Demo", "A demo project");
//! let created = format!("{}", CreateResult::new(project.clone()));
//! assert!(created.contains("Created project 'Demo'"));
//!
//! let tree = format!("{}", FileTree(&project.root_directory));
//! assert!(tree.contains("index.js"));
//!
//! println!("{}", OperationStatus::success("Pushed".to_string()));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{FileTree, ModelList, ProjectSummaries};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult};
pub use status::OperationStatus;
