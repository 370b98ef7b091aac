//! File tree node model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{new_id, touch, NodeKind};

/// A file or folder in a project's in-memory tree.
///
/// `path` always equals the parent's `path` + `/` + `name`. Folders carry
/// `children`, files carry `content`; the other field stays `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    /// Opaque identifier, stable across edits
    pub id: String,

    /// Final path segment
    pub name: String,

    /// File or folder
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Text content (files only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Owned children (folders only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,

    /// Timestamp when the node was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the node was last modified (UTC)
    pub updated_at: Timestamp,

    /// Full slash-delimited path from the project root
    pub path: String,
}

impl FileNode {
    /// Creates an empty folder at `path`.
    pub fn folder(name: impl Into<String>, path: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: new_id(),
            name: name.into(),
            kind: NodeKind::Folder,
            content: None,
            children: Some(Vec::new()),
            created_at: now,
            updated_at: now,
            path: path.into(),
        }
    }

    /// Creates a file at `path` with the given content.
    pub fn file(name: impl Into<String>, path: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: new_id(),
            name: name.into(),
            kind: NodeKind::File,
            content: Some(content.into()),
            children: None,
            created_at: now,
            updated_at: now,
            path: path.into(),
        }
    }

    /// Builder-style helper appending a child to a folder.
    pub fn with_child(mut self, child: FileNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Children slice; empty for files.
    pub fn children(&self) -> &[FileNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Replaces file content and refreshes `updated_at`.
    pub(crate) fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
        self.updated_at = touch(self.updated_at);
    }
}
