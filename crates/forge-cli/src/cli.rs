//! Subcommand definitions and their handlers.
//!
//! Argument structs carry clap derives and convert into the core's
//! interface-agnostic parameter types with `From`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → ProjectManager
//! ```
//!
//! Projects are referenced by id or by name, steps by id or by their
//! 1-based position. References are resolved against the store before the
//! converted parameters reach the manager.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use forge_core::{
    display::{CreateResult, DeleteResult, FileTree, ModelList, OperationStatus, ProjectSummaries},
    hub,
    params::*,
    NodeKind, Project, ProjectManager,
};
use log::debug;

use crate::renderer::TerminalRenderer;

// ============================================================================
// Project commands
// ============================================================================

/// Create a new project with the starter file tree
#[derive(Args)]
pub struct CreateProjectArgs {
    /// Name of the project; also its root folder
    pub name: String,
    /// What the project is about
    #[arg(short, long, default_value = "")]
    pub description: String,
}

impl From<CreateProjectArgs> for CreateProject {
    fn from(val: CreateProjectArgs) -> Self {
        CreateProject {
            name: val.name,
            description: val.description,
        }
    }
}

/// Reference to a single project
#[derive(Args)]
pub struct ProjectArg {
    /// Project id or name
    pub project: String,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    #[command(alias = "c")]
    Create(CreateProjectArgs),
    /// List all projects
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a project with its plan and steps
    #[command(alias = "s")]
    Show(ProjectArg),
    /// Delete a project and cancel its pending work
    #[command(aliases = ["d", "rm"])]
    Delete(ProjectArg),
    /// Package a project for download
    Export(ProjectArg),
}

// ============================================================================
// Plan and step commands
// ============================================================================

/// Generate the five-step build plan
#[derive(Args)]
pub struct GeneratePlanArgs {
    /// Project id or name
    pub project: String,
    /// What to build; defaults to the project description
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<GeneratePlanArgs> for GeneratePlan {
    fn from(val: GeneratePlanArgs) -> Self {
        GeneratePlan {
            project_id: val.project,
            description: val.description.unwrap_or_default(),
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Generate a plan for a project
    #[command(alias = "g")]
    Generate(GeneratePlanArgs),
    /// Approve the plan and run every step in order
    #[command(alias = "a")]
    Approve(ProjectArg),
    /// Resume execution from the current step
    #[command(alias = "c")]
    Continue(ProjectArg),
}

/// Reference to one step of a project
#[derive(Args)]
pub struct StepArgs {
    /// Project id or name
    pub project: String,
    /// Step id or 1-based position
    pub step: String,
}

impl From<StepArgs> for StepRef {
    fn from(val: StepArgs) -> Self {
        StepRef {
            project_id: val.project,
            step_id: val.step,
        }
    }
}

/// Report a failure on the running step
#[derive(Args)]
pub struct FailStepArgs {
    /// Project id or name
    pub project: String,
    /// Step id or 1-based position
    pub step: String,
    /// Failure message stored as the step output
    #[arg(short, long, default_value = "Step failed")]
    pub message: String,
}

impl From<FailStepArgs> for FailStep {
    fn from(val: FailStepArgs) -> Self {
        FailStep {
            project_id: val.project,
            step_id: val.step,
            message: val.message,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Approve and run a single step
    #[command(alias = "a")]
    Approve(StepArgs),
    /// Mark the running step as failed
    #[command(alias = "f")]
    Fail(FailStepArgs),
}

// ============================================================================
// File commands
// ============================================================================

/// Create a file or folder at a full path
#[derive(Args)]
pub struct CreateFileArgs {
    /// Project id or name
    pub project: String,
    /// Full path of the new node, e.g. /Demo/src/app.js
    pub path: String,
    /// Create a folder instead of a file
    #[arg(long)]
    pub folder: bool,
}

impl From<CreateFileArgs> for CreateFile {
    fn from(val: CreateFileArgs) -> Self {
        let (parent_path, name) = val
            .path
            .rsplit_once('/')
            .map_or((String::new(), val.path.clone()), |(parent, name)| {
                (parent.to_string(), name.to_string())
            });
        CreateFile {
            project_id: val.project,
            parent_path,
            name,
            kind: if val.folder {
                NodeKind::Folder
            } else {
                NodeKind::File
            },
        }
    }
}

/// Replace a file's content
#[derive(Args)]
pub struct WriteFileArgs {
    /// Project id or name
    pub project: String,
    /// Full path of the file
    pub path: String,
    /// New content
    pub content: String,
}

impl From<WriteFileArgs> for UpdateFile {
    fn from(val: WriteFileArgs) -> Self {
        UpdateFile {
            project_id: val.project,
            path: val.path,
            content: val.content,
        }
    }
}

/// Reference to one node of a project's tree
#[derive(Args)]
pub struct FilePathArgs {
    /// Project id or name
    pub project: String,
    /// Full path of the node
    pub path: String,
}

impl From<FilePathArgs> for FilePath {
    fn from(val: FilePathArgs) -> Self {
        FilePath {
            project_id: val.project,
            path: val.path,
        }
    }
}

#[derive(Subcommand)]
pub enum FileCommands {
    /// Show the project's file tree
    #[command(alias = "t")]
    Tree(ProjectArg),
    /// Create a file or folder
    #[command(alias = "c")]
    Create(CreateFileArgs),
    /// Replace a file's content
    #[command(alias = "w")]
    Write(WriteFileArgs),
    /// Delete a file or folder
    #[command(alias = "delete")]
    Rm(FilePathArgs),
    /// Print a file
    Cat(FilePathArgs),
}

// ============================================================================
// GitHub, model and terminal commands
// ============================================================================

/// Record a GitHub repository for a project
#[derive(Args)]
pub struct ConnectGithubArgs {
    /// Project id or name
    pub project: String,
    /// Repository URL
    pub repo_url: String,
    /// GitHub user name
    pub username: String,
}

impl From<ConnectGithubArgs> for ConnectGithub {
    fn from(val: ConnectGithubArgs) -> Self {
        ConnectGithub {
            project_id: val.project,
            repo_url: val.repo_url,
            username: val.username,
        }
    }
}

#[derive(Subcommand)]
pub enum GithubCommands {
    /// Connect a project to a repository
    Connect(ConnectGithubArgs),
    /// Push a connected project
    Push(ProjectArg),
}

/// Search for models
#[derive(Args)]
pub struct SearchModelsArgs {
    /// Search text; lists everything when omitted
    #[arg(default_value = "")]
    pub query: String,
}

/// Download a model and attach it to a project
#[derive(Args)]
pub struct DownloadModelArgs {
    /// Model id, as shown by `model search`
    pub model: String,
    /// Project id or name to attach the model to
    #[arg(short, long)]
    pub project: Option<String>,
}

impl From<DownloadModelArgs> for DownloadModel {
    fn from(val: DownloadModelArgs) -> Self {
        DownloadModel {
            project_id: val.project,
            name: val.model.clone(),
            model_id: val.model,
            description: String::new(),
        }
    }
}

#[derive(Subcommand)]
pub enum ModelCommands {
    /// Search the model catalog or hub
    #[command(alias = "s")]
    Search(SearchModelsArgs),
    /// Download a model into a project
    #[command(alias = "d")]
    Download(DownloadModelArgs),
    /// Detach a project's model
    #[command(alias = "rm")]
    Remove(ProjectArg),
}

/// Run a command in a project's simulated terminal
#[derive(Args)]
pub struct ExecArgs {
    /// Project id or name
    pub project: String,
    /// Command line to run
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub command: Vec<String>,
}

impl From<ExecArgs> for RunCommand {
    fn from(val: ExecArgs) -> Self {
        RunCommand {
            project_id: val.project,
            command: val.command.join(" "),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs parsed commands against a manager and renders the results.
pub struct Cli {
    manager: ProjectManager,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(manager: ProjectManager, renderer: TerminalRenderer) -> Self {
        Self { manager, renderer }
    }

    /// Finds a project by id, then by name.
    async fn resolve_project(&self, reference: &str) -> Result<Project> {
        let projects = self.manager.list_projects().await;
        if let Some(project) = projects.iter().find(|p| p.id == reference) {
            return Ok(project.clone());
        }

        let mut named = projects.into_iter().filter(|p| p.name == reference);
        match (named.next(), named.next()) {
            (Some(project), None) => Ok(project),
            (Some(_), Some(_)) => bail!("Several projects are named '{reference}'; use the id"),
            (None, _) => bail!("Project '{reference}' not found"),
        }
    }

    async fn resolve_project_id(&self, reference: &str) -> Result<String> {
        Ok(self.resolve_project(reference).await?.id)
    }

    /// Resolves a step id or 1-based position to a step id.
    fn resolve_step(project: &Project, reference: &str) -> Result<String> {
        if let Some(step) = project.steps().iter().find(|s| s.id == reference) {
            return Ok(step.id.clone());
        }
        reference
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|index| project.steps().get(index))
            .map(|step| step.id.clone())
            .ok_or_else(|| anyhow!("Step '{reference}' not found in '{}'", project.name))
    }

    /// Waits for scheduled steps and reports where the project ended up.
    async fn render_progress(&self, project_id: &str) -> Result<()> {
        self.manager.wait_idle().await;
        let project = self.manager.get_project(&Id::new(project_id)).await?;

        let mut output = format!(
            "\n## {} is {} ({}/{} steps completed)\n\n",
            project.name,
            project.status,
            project.completed_steps(),
            project.steps().len()
        );
        for step in project.steps() {
            output.push_str(&format!(
                "- {}. {} ({})\n",
                step.order,
                step.title,
                step.status.with_icon()
            ));
        }
        self.renderer.render(&output)
    }

    pub async fn list_projects(&self) -> Result<()> {
        let summaries = ProjectSummaries(self.manager.list_projects().await);
        self.renderer.render(&format!("# Projects\n\n{summaries}"))
    }

    pub async fn handle_project_command(&self, command: ProjectCommands) -> Result<()> {
        match command {
            ProjectCommands::Create(args) => {
                let project = self
                    .manager
                    .create_project(&args.into())
                    .await
                    .context("Failed to create project")?;
                self.renderer.render(&CreateResult::new(project).to_string())
            }
            ProjectCommands::List => self.list_projects().await,
            ProjectCommands::Show(args) => {
                let project = self.resolve_project(&args.project).await?;
                self.renderer.render(&project.to_string())
            }
            ProjectCommands::Delete(args) => {
                let id = self.resolve_project_id(&args.project).await?;
                let project = self
                    .manager
                    .delete_project(&Id::new(id))
                    .await
                    .context("Failed to delete project")?;
                self.renderer.render(&DeleteResult::new(project).to_string())
            }
            ProjectCommands::Export(args) => {
                let id = self.resolve_project_id(&args.project).await?;
                let project = self
                    .manager
                    .download_project(&Id::new(id))
                    .await
                    .context("Failed to export project")?;
                self.renderer.render(&format!(
                    "# Exported {}\n\n{}",
                    project.name,
                    FileTree(&project.root_directory)
                ))
            }
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Generate(args) => {
                let project = self.resolve_project(&args.project).await?;
                let mut params: GeneratePlan = args.into();
                params.project_id = project.id;
                if params.description.trim().is_empty() {
                    params.description = project.description;
                }
                let plan = self
                    .manager
                    .generate_plan(&params)
                    .await
                    .context("Failed to generate plan")?;
                self.renderer.render(&plan)
            }
            PlanCommands::Approve(args) => {
                let id = self.resolve_project_id(&args.project).await?;
                let project = self
                    .manager
                    .approve_plan(&Id::new(id.clone()))
                    .await
                    .context("Failed to approve plan")?;
                debug!("Approved plan for {}", project.id);
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Approved plan for '{}'. Running steps...",
                        project.name
                    ))
                    .to_string(),
                )?;
                self.render_progress(&id).await
            }
            PlanCommands::Continue(args) => {
                let id = self.resolve_project_id(&args.project).await?;
                let outcome = self
                    .manager
                    .continue_execution(&Id::new(id.clone()))
                    .await
                    .context("Failed to continue execution")?;
                self.renderer.render(&outcome.to_string())?;
                self.render_progress(&id).await
            }
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Approve(args) => {
                let project = self.resolve_project(&args.project).await?;
                let mut params: StepRef = args.into();
                params.step_id = Self::resolve_step(&project, &params.step_id)?;
                params.project_id = project.id.clone();
                self.manager
                    .approve_step(&params)
                    .await
                    .context("Failed to approve step")?;
                self.render_progress(&project.id).await
            }
            StepCommands::Fail(args) => {
                let project = self.resolve_project(&args.project).await?;
                let mut params: FailStep = args.into();
                params.step_id = Self::resolve_step(&project, &params.step_id)?;
                params.project_id = project.id.clone();
                self.manager
                    .fail_step(&params)
                    .await
                    .context("Failed to mark step as failed")?;
                self.render_progress(&project.id).await
            }
        }
    }

    pub async fn handle_file_command(&self, command: FileCommands) -> Result<()> {
        match command {
            FileCommands::Tree(args) => {
                let project = self.resolve_project(&args.project).await?;
                self.renderer
                    .render(&FileTree(&project.root_directory).to_string())
            }
            FileCommands::Create(args) => {
                let mut params: CreateFile = args.into();
                params.project_id = self.resolve_project_id(&params.project_id).await?;
                let node = self
                    .manager
                    .create_file(&params)
                    .await
                    .context("Failed to create file")?;
                self.renderer.render(&CreateResult::new(node).to_string())
            }
            FileCommands::Write(args) => {
                let mut params: UpdateFile = args.into();
                params.project_id = self.resolve_project_id(&params.project_id).await?;
                let node = self
                    .manager
                    .update_file(&params)
                    .await
                    .context("Failed to write file")?;
                self.renderer.render(
                    &OperationStatus::success(format!("Wrote {}", node.path)).to_string(),
                )
            }
            FileCommands::Rm(args) => {
                let mut params: FilePath = args.into();
                params.project_id = self.resolve_project_id(&params.project_id).await?;
                self.manager
                    .delete_file(&params)
                    .await
                    .context("Failed to delete file")?;
                self.renderer.render(
                    &OperationStatus::success(format!("Deleted {}", params.path)).to_string(),
                )
            }
            FileCommands::Cat(args) => {
                let mut params: FilePath = args.into();
                params.project_id = self.resolve_project_id(&params.project_id).await?;
                let node = self
                    .manager
                    .download_file(&params)
                    .await
                    .context("Failed to read file")?;
                self.renderer.render(&node.to_string())
            }
        }
    }

    pub async fn handle_github_command(&self, command: GithubCommands) -> Result<()> {
        match command {
            GithubCommands::Connect(args) => {
                let mut params: ConnectGithub = args.into();
                params.project_id = self.resolve_project_id(&params.project_id).await?;
                let project = self
                    .manager
                    .connect_github(&params)
                    .await
                    .context("Failed to connect GitHub")?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Connected '{}' to {}",
                        project.name, params.repo_url
                    ))
                    .to_string(),
                )
            }
            GithubCommands::Push(args) => {
                let id = self.resolve_project_id(&args.project).await?;
                let repo_url = self
                    .manager
                    .push_to_github(&Id::new(id))
                    .await
                    .context("Failed to push to GitHub")?;
                self.renderer.render(
                    &OperationStatus::success(format!("Pushed to {repo_url}")).to_string(),
                )
            }
        }
    }

    pub async fn handle_model_command(&self, command: ModelCommands) -> Result<()> {
        match command {
            ModelCommands::Search(args) => match self.manager.search_models(&args.query).await {
                Ok(models) => {
                    let title = if args.query.trim().is_empty() {
                        "Models".to_string()
                    } else {
                        format!("Models matching '{}'", args.query.trim())
                    };
                    self.renderer
                        .render(&format!("# {title}\n\n{}", ModelList(models)))
                }
                Err(e) => self
                    .renderer
                    .render(&OperationStatus::failure(format!("Model search failed: {e}")).to_string()),
            },
            ModelCommands::Download(args) => {
                let mut params: DownloadModel = args.into();
                if let Some(reference) = params.project_id.take() {
                    params.project_id = Some(self.resolve_project_id(&reference).await?);
                }
                // Fill in catalog metadata when the model is known.
                if let Some(model) = hub::catalog().into_iter().find(|m| m.id == params.model_id) {
                    params.name = model.name;
                    params.description = model.description;
                }
                let outcome = self
                    .manager
                    .download_model(&params)
                    .await
                    .context("Failed to download model")?;
                self.renderer.render(&outcome.to_string())
            }
            ModelCommands::Remove(args) => {
                let id = self.resolve_project_id(&args.project).await?;
                let removal = self
                    .manager
                    .delete_model(&Id::new(id))
                    .await
                    .context("Failed to remove model")?;
                self.renderer.render(&removal.to_string())
            }
        }
    }

    pub async fn handle_exec(&self, args: ExecArgs) -> Result<()> {
        let mut params: RunCommand = args.into();
        params.project_id = self.resolve_project_id(&params.project_id).await?;
        let output = self
            .manager
            .execute_command(&params)
            .await
            .context("Failed to run command")?;
        self.renderer
            .render(&format!("$ {}\n{output}\n", params.command))
    }
}
