//! AI model record.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Descriptive record of a model that can be attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiModel {
    pub id: String,

    pub name: String,

    pub description: String,

    /// Source identifier on the model hub (e.g. `microsoft/phi-2`)
    pub hugging_face_id: String,

    /// Set once the model has been downloaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloaded_at: Option<Timestamp>,

    /// Human-readable size, or a download count for hub results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl AiModel {
    /// Case-insensitive substring match over name and description.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
