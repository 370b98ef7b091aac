//! File tree operations for the ProjectManager.

use log::{debug, info};

use super::ProjectManager;
use crate::{
    config::pause,
    error::{ForgeError, Result},
    models::{FileNode, Project},
    params::{CreateFile, FilePath, Id, UpdateFile},
    tree,
};

impl ProjectManager {
    /// Creates a file or folder and returns the new node.
    pub async fn create_file(&self, params: &CreateFile) -> Result<FileNode> {
        let name = params.name.trim();
        if name.is_empty() || name.contains('/') {
            return Err(ForgeError::invalid_state(
                "File name must be non-empty and must not contain '/'",
            ));
        }

        let path = format!("{}/{name}", params.parent_path);
        let node = self
            .transact(&params.project_id, |project| {
                let root =
                    tree::create_node(&project.root_directory, &params.parent_path, name, params.kind)?;
                // Same-named siblings are allowed, so take the newest match.
                let node = find_last(&root, &params.parent_path, name)
                    .cloned()
                    .ok_or_else(|| ForgeError::not_found("File", path.clone()))?;

                let mut updated = project.clone();
                updated.root_directory = root;
                updated.touch();
                Ok((Some(updated), node))
            })
            .await?;

        debug!("Created {} {}", node.kind.as_str(), node.path);
        Ok(node)
    }

    /// Replaces a file's content and returns the updated node.
    pub async fn update_file(&self, params: &UpdateFile) -> Result<FileNode> {
        self.transact(&params.project_id, |project| {
            let root = tree::update_file(&project.root_directory, &params.path, &params.content)?;
            let node = tree::find_by_path(&root, &params.path)
                .cloned()
                .ok_or_else(|| ForgeError::not_found("File", params.path.clone()))?;

            let mut updated = project.clone();
            updated.root_directory = root;
            updated.touch();
            Ok((Some(updated), node))
        })
        .await
    }

    /// Removes the node at `path` together with any same-named siblings.
    pub async fn delete_file(&self, params: &FilePath) -> Result<Project> {
        self.transact(&params.project_id, |project| {
            if tree::find_by_path(&project.root_directory, &params.path).is_none() {
                return Err(ForgeError::not_found("File", params.path.clone()));
            }
            let root = tree::delete_node(&project.root_directory, &params.path)?;

            let mut updated = project.clone();
            updated.root_directory = root;
            updated.touch();
            Ok((Some(updated.clone()), updated))
        })
        .await
    }

    /// Returns the file at `path` for saving outside the workbench.
    pub async fn download_file(&self, params: &FilePath) -> Result<FileNode> {
        let project = self.get_project(&Id::new(params.project_id.clone())).await?;
        tree::find_by_path(&project.root_directory, &params.path)
            .filter(|node| node.is_file())
            .cloned()
            .ok_or_else(|| ForgeError::not_found("File", params.path.clone()))
    }

    /// Prepares a project export after the simulated packaging latency.
    pub async fn download_project(&self, params: &Id) -> Result<Project> {
        let project = self.get_project(params).await?;
        info!("Exporting project {}", project.name);
        pause(self.inner.timings.project_export).await;
        self.get_project(params).await
    }
}

fn find_last<'a>(root: &'a FileNode, parent_path: &str, name: &str) -> Option<&'a FileNode> {
    tree::find_by_path(root, parent_path)?
        .children()
        .iter()
        .rev()
        .find(|child| child.name == name)
}
