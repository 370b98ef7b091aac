//! Step model definition and related functionality.

use serde::{Deserialize, Serialize};

use super::{new_id, StepStatus};

/// One unit of simulated execution within a project plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStep {
    /// Unique identifier for the step
    pub id: String,

    /// Brief title of the step
    pub title: String,

    /// What the step does
    pub description: String,

    /// Current status of the step
    pub status: StepStatus,

    /// 1-based position, descriptive only; advancement follows array position
    pub order: u32,

    /// Identifier of a step this one depends on. Never consulted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency: Option<String>,

    /// Whether a human authorized this step to run
    #[serde(default)]
    pub approved: bool,

    /// Output produced on completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl ProjectStep {
    /// Creates a pending, unapproved step.
    pub fn pending(title: impl Into<String>, description: impl Into<String>, order: u32) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            description: description.into(),
            status: StepStatus::Pending,
            order,
            dependency: None,
            approved: false,
            output: None,
        }
    }
}
