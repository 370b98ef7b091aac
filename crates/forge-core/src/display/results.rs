//! Result wrapper types and displays for manager outcomes.

use std::fmt;

use crate::{
    manager::{ContinueOutcome, DownloadOutcome, ModelRemoval},
    models::{FileNode, Project},
};

/// Result of a create operation: a confirmation line and the new resource.
///
/// # Examples
///
/// ```rust
/// use forge_core::{display::CreateResult, models::Project};
///
/// let result = CreateResult::new(Project::new("Demo", ""));
/// assert!(result.to_string().starts_with("Created project 'Demo'"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Project> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created project '{}' with ID: {}",
            self.resource.name, self.resource.id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<FileNode> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} {}", self.resource.kind, self.resource.path)
    }
}

/// Result of a delete operation.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Project> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted project '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for ContinueOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContinueOutcome::AlreadyComplete => writeln!(f, "All steps are already completed."),
            ContinueOutcome::Resumed { project, index } => {
                let title = project
                    .steps()
                    .get(*index)
                    .map_or("unknown step", |step| step.title.as_str());
                writeln!(
                    f,
                    "Resuming '{}' at step {} ({title}).",
                    project.name,
                    index + 1
                )
            }
        }
    }
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadOutcome::Declined => {
                writeln!(f, "Another model download is in progress; request ignored.")
            }
            DownloadOutcome::Downloaded {
                model,
                project_id: Some(project_id),
            } => writeln!(f, "Downloaded {} and attached it to project {project_id}.", model.name),
            DownloadOutcome::Downloaded {
                model,
                project_id: None,
            } => writeln!(f, "Downloaded {}; no project selected to attach it to.", model.name),
        }
    }
}

impl fmt::Display for ModelRemoval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelRemoval::Removed(model) => writeln!(f, "Removed model {}.", model.name),
            ModelRemoval::NoModel => writeln!(f, "Project has no model attached."),
        }
    }
}
