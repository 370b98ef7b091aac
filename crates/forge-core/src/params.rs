//! Parameter structures for workbench operations
//!
//! These are interface-agnostic inputs shared by the library API and the CLI.
//! Interface layers define their own argument types (with clap derives, for
//! example) and convert into these with `From` impls, keeping framework
//! concerns out of the core crate.

use serde::{Deserialize, Serialize};

use crate::models::NodeKind;

/// Generic parameters for operations requiring just a project id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The id of the project to operate on
    pub id: String,
}

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Parameters for creating a new project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProject {
    /// Name of the project; also the root folder name
    pub name: String,
    /// Description used when generating the plan
    pub description: String,
}

/// Parameters for generating a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePlan {
    pub project_id: String,
    /// Free-form description of what to build
    pub description: String,
}

/// Identifies one step of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepRef {
    pub project_id: String,
    pub step_id: String,
}

/// Parameters for reporting a step failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailStep {
    pub project_id: String,
    pub step_id: String,
    pub message: String,
}

/// Parameters for creating a file or folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    pub project_id: String,
    /// Full path of the folder to create in
    pub parent_path: String,
    pub name: String,
    pub kind: NodeKind,
}

/// Parameters for replacing a file's content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFile {
    pub project_id: String,
    pub path: String,
    pub content: String,
}

/// Identifies one node in a project's tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilePath {
    pub project_id: String,
    pub path: String,
}

/// Parameters for connecting a project to GitHub.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectGithub {
    pub project_id: String,
    pub repo_url: String,
    pub username: String,
}

/// Parameters for downloading a model.
///
/// Without `project_id` the model attaches to the current selection, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadModel {
    pub project_id: Option<String>,
    pub model_id: String,
    pub name: String,
    pub description: String,
}

/// Parameters for running a terminal command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunCommand {
    pub project_id: String,
    pub command: String,
}
