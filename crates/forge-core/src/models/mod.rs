//! Data models for projects, plans, file trees and AI models.
//!
//! Display implementations for these models live in
//! [`crate::display::models`]. Every record serializes with camelCase field
//! names and RFC 3339 timestamps, which is the layout the [`crate::store`]
//! persists.
//!
//! # Examples
//!
//! ```rust
//! use forge_core::models::{Project, ProjectStatus};
//!
//! let project = Project::new("Demo", "A demo project");
//! assert_eq!(project.root_directory.path, "/Demo");
//! assert_eq!(project.status, ProjectStatus::Planning);
//! ```

use jiff::{SignedDuration, Timestamp};

pub mod ai_model;
pub mod file_node;
pub mod project;
pub mod status;
pub mod step;


pub use ai_model::AiModel;
pub use file_node::FileNode;
pub use project::{GithubConfig, Project};
pub use status::{NodeKind, ProjectStatus, StepStatus};
pub use step::ProjectStep;

/// Generates a fresh opaque identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Returns a timestamp strictly after `previous`, preferring the current time.
pub(crate) fn touch(previous: Timestamp) -> Timestamp {
    let now = Timestamp::now();
    if now > previous {
        now
    } else {
        previous
            .checked_add(SignedDuration::from_nanos(1))
            .unwrap_or(previous)
    }
}
