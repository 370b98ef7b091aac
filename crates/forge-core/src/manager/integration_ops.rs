//! GitHub, AI model and terminal operations for the ProjectManager.

use jiff::Timestamp;
use log::{info, warn};

use super::{DownloadOutcome, ModelRemoval, ProjectManager};
use crate::{
    config::pause,
    error::{ForgeError, Result},
    models::{AiModel, GithubConfig, Project},
    params::{ConnectGithub, DownloadModel, Id, RunCommand},
    terminal,
};

/// Size reported for every downloaded model.
const DOWNLOADED_MODEL_SIZE: &str = "1.2 GB";

impl ProjectManager {
    /// Records a GitHub repository and user against the project.
    pub async fn connect_github(&self, params: &ConnectGithub) -> Result<Project> {
        let repo_url = params.repo_url.trim();
        let username = params.username.trim();
        if repo_url.is_empty() || username.is_empty() {
            return Err(ForgeError::invalid_state(
                "Repository URL and username are required",
            ));
        }

        self.transact(&params.project_id, |project| {
            let mut updated = project.clone();
            updated.github_config = Some(GithubConfig {
                repo_url: Some(repo_url.to_string()),
                username: Some(username.to_string()),
                connected: true,
            });
            updated.touch();
            Ok((Some(updated.clone()), updated))
        })
        .await
    }

    /// Simulates pushing the project to its connected repository and returns
    /// the repository URL.
    pub async fn push_to_github(&self, params: &Id) -> Result<String> {
        let project = self.get_project(params).await?;
        let repo_url = project
            .github_config
            .as_ref()
            .filter(|config| config.connected)
            .and_then(|config| config.repo_url.clone())
            .ok_or_else(|| {
                ForgeError::invalid_state(format!(
                    "Project '{}' is not connected to GitHub",
                    project.name
                ))
            })?;

        info!("Pushing {} to {repo_url}", project.name);
        pause(self.inner.timings.github_push).await;
        self.get_project(params).await?;
        Ok(repo_url)
    }

    /// Downloads a model and attaches it to the target project.
    ///
    /// Only one download runs at a time; a request made while another is in
    /// flight is declined without touching any project.
    pub async fn download_model(&self, params: &DownloadModel) -> Result<DownloadOutcome> {
        let Some(_download) = self.claim_download() else {
            info!("Declined download of {}: another download is running", params.model_id);
            return Ok(DownloadOutcome::Declined);
        };

        info!("Downloading model {}", params.model_id);
        pause(self.inner.timings.model_download).await;

        let model = AiModel {
            id: params.model_id.clone(),
            name: params.name.clone(),
            description: params.description.clone(),
            hugging_face_id: format!("huggingface/{}", params.model_id),
            downloaded_at: Some(Timestamp::now()),
            size: Some(DOWNLOADED_MODEL_SIZE.to_string()),
        };

        let target = match &params.project_id {
            Some(id) => Some(id.clone()),
            None => self.inner.state.lock().await.current.clone(),
        };
        let Some(project_id) = target else {
            warn!("Model {} downloaded with no project to attach to", model.id);
            return Ok(DownloadOutcome::Downloaded {
                model,
                project_id: None,
            });
        };

        self.transact(&project_id, |project| {
            let mut updated = project.clone();
            updated.active_ai_model = Some(model.clone());
            updated.touch();
            Ok((Some(updated), ()))
        })
        .await?;

        info!("Attached model {} to project {project_id}", model.id);
        Ok(DownloadOutcome::Downloaded {
            model,
            project_id: Some(project_id),
        })
    }

    /// Detaches the project's model.
    pub async fn delete_model(&self, params: &Id) -> Result<ModelRemoval> {
        self.transact(&params.id, |project| match &project.active_ai_model {
            Some(model) => {
                let removed = model.clone();
                let mut updated = project.clone();
                updated.active_ai_model = None;
                updated.touch();
                Ok((Some(updated), ModelRemoval::Removed(removed)))
            }
            None => Ok((None, ModelRemoval::NoModel)),
        })
        .await
    }

    /// Searches the configured model source.
    pub async fn search_models(&self, query: &str) -> Result<Vec<AiModel>> {
        self.inner.models.search(query).await
    }

    /// Runs `command` in the simulated terminal of a project.
    pub async fn execute_command(&self, params: &RunCommand) -> Result<String> {
        self.get_project(&Id::new(params.project_id.clone())).await?;
        pause(self.inner.timings.command).await;
        Ok(terminal::run(&params.command))
    }
}
