//! Plan generation and step execution for the ProjectManager.

use std::time::Duration;

use log::{debug, info, warn};

use super::{ContinueOutcome, ExecutionGuard, ProjectManager};
use crate::{
    config::pause,
    error::{ForgeError, Result},
    models::Project,
    params::{FailStep, GeneratePlan, Id, StepRef},
    workflow::{self, Continuation},
};

impl ProjectManager {
    /// Generates the five-step plan after the simulated generation latency
    /// and returns the plan text.
    ///
    /// Holds the project's execution slot until the new plan is stored, so
    /// no chain can start on the plan being replaced.
    pub async fn generate_plan(&self, params: &GeneratePlan) -> Result<String> {
        let _guard = self.claim_execution(&params.project_id).map_err(|_| {
            ForgeError::invalid_state("Cannot regenerate a plan while steps are executing")
        })?;
        self.get_project(&Id::new(params.project_id.clone())).await?;

        info!("Generating plan for project {}", params.project_id);
        pause(self.inner.timings.generate_plan).await;

        self.transact(&params.project_id, |project| {
            let (updated, plan) = workflow::generate_plan(project, &params.description);
            Ok((Some(updated), plan))
        })
        .await
    }

    /// Approves the plan, starts step 0 and schedules its execution. Later
    /// steps chain automatically.
    pub async fn approve_plan(&self, params: &Id) -> Result<Project> {
        let guard = self.claim_execution(&params.id)?;
        let project = self
            .transact(&params.id, |project| {
                let updated = workflow::approve_plan(project)?;
                Ok((Some(updated.clone()), updated))
            })
            .await?;

        info!("Plan approved for project {}", project.name);
        self.spawn_chain(guard, 0, self.inner.timings.plan_start);
        Ok(project)
    }

    /// Approves a single step and schedules its execution.
    pub async fn approve_step(&self, params: &StepRef) -> Result<Project> {
        let guard = self.claim_execution(&params.project_id)?;
        let (project, index) = self
            .transact(&params.project_id, |project| {
                let (updated, index) = workflow::approve_step(project, &params.step_id)?;
                Ok((Some(updated.clone()), (updated, index)))
            })
            .await?;

        info!("Step {} approved for project {}", index + 1, project.name);
        self.spawn_chain(guard, index, self.inner.timings.single_step);
        Ok(project)
    }

    /// Enables auto-chaining and resumes from the current step.
    pub async fn continue_execution(&self, params: &Id) -> Result<ContinueOutcome> {
        let guard = self.claim_execution(&params.id)?;
        let continuation = self
            .transact(&params.id, |project| match workflow::continue_execution(project)? {
                Continuation::AlreadyComplete => Ok((None, Continuation::AlreadyComplete)),
                Continuation::Resume { project, index } => Ok((
                    Some(project.clone()),
                    Continuation::Resume { project, index },
                )),
            })
            .await?;

        match continuation {
            Continuation::AlreadyComplete => {
                info!("Project {} has no remaining steps", params.id);
                Ok(ContinueOutcome::AlreadyComplete)
            }
            Continuation::Resume { project, index } => {
                self.spawn_chain(guard, index, self.inner.timings.resume);
                Ok(ContinueOutcome::Resumed { project, index })
            }
        }
    }

    /// Runs the step at `index` now. When the plan is approved the
    /// remaining steps are scheduled to chain after it.
    pub async fn execute_step(&self, params: &Id, index: usize) -> Result<Project> {
        let guard = self.claim_execution(&params.id)?;
        let (project, next) = self.advance(&params.id, index).await?;
        if let Some(next) = next {
            self.spawn_chain(guard, next, self.inner.timings.step_chain);
        }
        Ok(project)
    }

    /// Records an externally reported failure on an in-progress step.
    pub async fn fail_step(&self, params: &FailStep) -> Result<Project> {
        self.inner.scheduler.cancel(&params.project_id);
        self.transact(&params.project_id, |project| {
            let updated = workflow::fail_step(project, &params.step_id, &params.message)?;
            Ok((Some(updated.clone()), updated))
        })
        .await
    }

    /// Applies one step advancement to the stored project.
    async fn advance(&self, project_id: &str, index: usize) -> Result<(Project, Option<usize>)> {
        self.transact(project_id, |project| {
            let advance = workflow::execute_step(project, index);
            debug!(
                "Advanced project {project_id} past step {index}, next {:?}",
                advance.next
            );
            Ok((
                Some(advance.project.clone()),
                (advance.project, advance.next),
            ))
        })
        .await
    }

    /// Schedules step execution from `index`, continuing while the project
    /// asks for the next step. The guard is held until the chain ends.
    fn spawn_chain(&self, guard: ExecutionGuard, index: usize, delay: Duration) {
        let manager = self.clone();
        let key = guard.project_id.clone();
        let project_id = key.clone();
        self.inner.scheduler.spawn(&key, async move {
            let _guard = guard;
            let mut index = index;
            let mut delay = delay;
            loop {
                pause(delay).await;
                match manager.advance(&project_id, index).await {
                    Ok((_, Some(next))) => {
                        index = next;
                        delay = manager.inner.timings.step_chain;
                    }
                    Ok((project, None)) => {
                        info!(
                            "Execution stopped for project {} ({}/{} steps completed)",
                            project.name,
                            project.completed_steps(),
                            project.steps().len()
                        );
                        break;
                    }
                    Err(e) => {
                        warn!("Dropping deferred step for project {project_id}: {e}");
                        break;
                    }
                }
            }
        });
    }
}
