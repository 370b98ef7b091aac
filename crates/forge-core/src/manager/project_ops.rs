//! Project lifecycle operations for the ProjectManager.

use log::info;

use super::ProjectManager;
use crate::{
    error::{ForgeError, Result},
    models::Project,
    params::{CreateProject, Id},
    tree,
};

impl ProjectManager {
    /// Creates a project with the starter file tree and appends it to the
    /// collection.
    pub async fn create_project(&self, params: &CreateProject) -> Result<Project> {
        let name = params.name.trim();
        if name.is_empty() || name.contains('/') {
            return Err(ForgeError::invalid_state(
                "Project name must be non-empty and must not contain '/'",
            ));
        }

        let project = Project::new(name, params.description.clone());

        let mut state = self.inner.state.lock().await;
        state.store.insert(project.clone()).await?;
        info!("Created project {} ({})", project.name, project.id);
        Ok(project)
    }

    /// Replaces the stored project with the same id.
    ///
    /// This is the mutation funnel every other operation goes through; the
    /// current selection always resolves to the latest stored value.
    pub async fn update_project(&self, mut project: Project) -> Result<Project> {
        tree::validate_paths(&project.root_directory)?;

        let mut state = self.inner.state.lock().await;
        let previous = state
            .store
            .get(&project.id)
            .ok_or_else(|| ForgeError::not_found("Project", project.id.clone()))?;
        if project.updated_at <= previous.updated_at {
            project.updated_at = previous.updated_at;
            project.touch();
        }

        state.store.replace(project.clone()).await?;
        Ok(project)
    }

    /// Removes a project, cancels its pending work and clears the selection
    /// if it pointed at it.
    pub async fn delete_project(&self, params: &Id) -> Result<Project> {
        let mut state = self.inner.state.lock().await;
        let project = state
            .store
            .get(&params.id)
            .cloned()
            .ok_or_else(|| ForgeError::not_found("Project", params.id.clone()))?;

        state.store.remove(&params.id).await?;
        self.inner.scheduler.cancel(&params.id);
        if state.current.as_deref() == Some(params.id.as_str()) {
            state.current = None;
        }
        info!("Deleted project {} ({})", project.name, project.id);
        Ok(project)
    }

    /// Returns a snapshot of one project.
    pub async fn get_project(&self, params: &Id) -> Result<Project> {
        let state = self.inner.state.lock().await;
        state
            .store
            .get(&params.id)
            .cloned()
            .ok_or_else(|| ForgeError::not_found("Project", params.id.clone()))
    }

    /// Returns a snapshot of every project in creation order.
    pub async fn list_projects(&self) -> Vec<Project> {
        self.inner.state.lock().await.store.projects().to_vec()
    }

    /// Selects the project later operations default to; `None` clears it.
    pub async fn set_current_project(&self, project_id: Option<&str>) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        if let Some(id) = project_id {
            if !state.store.contains(id) {
                return Err(ForgeError::not_found("Project", id));
            }
        }
        state.current = project_id.map(String::from);
        Ok(())
    }

    /// The latest value of the selected project.
    pub async fn current_project(&self) -> Option<Project> {
        let state = self.inner.state.lock().await;
        let id = state.current.as_deref()?;
        state.store.get(id).cloned()
    }
}
