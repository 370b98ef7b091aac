//! Project model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{new_id, touch, AiModel, FileNode, ProjectStatus, ProjectStep, StepStatus};

/// GitHub connection record attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GithubConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    pub connected: bool,
}

/// The top-level aggregate: metadata, file tree, plan and steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier for the project
    pub id: String,

    /// Name of the project, also the root folder name
    pub name: String,

    /// User-supplied description
    pub description: String,

    /// Root of the project's file tree (path `/<name>`)
    pub root_directory: FileNode,

    /// Timestamp when the project was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the project was last modified (UTC)
    pub updated_at: Timestamp,

    /// Lifecycle status
    #[serde(default)]
    pub status: ProjectStatus,

    /// Generated plan text (markdown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,

    /// Whether steps auto-advance without per-step approval
    #[serde(default)]
    pub plan_approved: bool,

    /// Attached model, at most one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_ai_model: Option<AiModel>,

    /// Plan steps, present once a plan has been generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<ProjectStep>>,

    /// Index of the next step to execute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step_index: Option<usize>,

    /// GitHub connection, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_config: Option<GithubConfig>,
}

impl Project {
    /// Creates a project in `planning` state with the starter file tree.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        let now = Timestamp::now();
        Self {
            id: new_id(),
            root_directory: initial_tree(&name),
            name,
            description: description.into(),
            created_at: now,
            updated_at: now,
            status: ProjectStatus::Planning,
            plan: None,
            plan_approved: false,
            active_ai_model: None,
            steps: None,
            current_step_index: None,
            github_config: None,
        }
    }

    /// Refreshes `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = touch(self.updated_at);
    }

    /// Steps slice; empty before plan generation.
    pub fn steps(&self) -> &[ProjectStep] {
        self.steps.as_deref().unwrap_or(&[])
    }

    /// Number of completed steps.
    pub fn completed_steps(&self) -> usize {
        self.steps()
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count()
    }

    pub fn is_github_connected(&self) -> bool {
        self.github_config.as_ref().is_some_and(|config| config.connected)
    }
}

/// Starter tree: `/<name>/src/index.js` and `/<name>/README.md`.
fn initial_tree(name: &str) -> FileNode {
    let root = format!("/{name}");
    let src = FileNode::folder("src", format!("{root}/src")).with_child(FileNode::file(
        "index.js",
        format!("{root}/src/index.js"),
        "// Your main entry point",
    ));
    let readme = FileNode::file(
        "README.md",
        format!("{root}/README.md"),
        format!("# {name}\n\nThis is a new project created with Forge."),
    );

    FileNode::folder(name, root).with_child(src).with_child(readme)
}
