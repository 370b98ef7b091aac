//! Plan generation and step advancement.
//!
//! Every function here takes a project snapshot and returns a new one; the
//! manager decides when to call them and schedules the delayed follow-ups.
//! Steps advance strictly by array position.

use crate::{
    error::{ForgeError, Result},
    models::{Project, ProjectStatus, ProjectStep, StepStatus},
};

/// Titles and descriptions of the five generated steps.
pub const PLAN_STEPS: [(&str, &str); 5] = [
    ("Project setup", "Initialize project structure and dependencies"),
    ("Core functionality", "Implement main features and business logic"),
    ("User interface", "Build responsive UI components"),
    ("Testing", "Write unit and integration tests"),
    ("Documentation", "Create comprehensive documentation"),
];

/// Result of advancing one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    pub project: Project,
    /// Index to run next when the chain continues.
    pub next: Option<usize>,
}

/// Outcome of asking a project to continue execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Continuation {
    /// Every step has already run; nothing was changed.
    AlreadyComplete,
    /// Auto-chaining is enabled and `index` should run next.
    Resume { project: Project, index: usize },
}

/// Builds the plan text and five pending steps for `project`.
///
/// `request` is the free-form description the user asked for; it is quoted
/// in the plan overview when non-blank.
pub fn generate_plan(project: &Project, request: &str) -> (Project, String) {
    let steps = PLAN_STEPS
        .iter()
        .zip(1..)
        .map(|((title, description), order)| ProjectStep::pending(*title, *description, order))
        .collect();

    let plan = plan_text(&project.name, request);
    let mut updated = project.clone();
    updated.plan = Some(plan.clone());
    // A fresh plan needs its own approval.
    updated.plan_approved = false;
    updated.status = ProjectStatus::Planning;
    updated.steps = Some(steps);
    updated.current_step_index = Some(0);
    updated.touch();
    (updated, plan)
}

fn plan_text(name: &str, request: &str) -> String {
    let mut text = format!("# Project Plan: {name}\n\n## Overview\n");
    let request = request.trim();
    if !request.is_empty() {
        text.push_str(&format!("> {request}\n\n"));
    }
    text.push_str(
        "Based on your description, we'll create a complete project with the following \
         main components:\n\n## Implementation Steps\n",
    );
    for (index, (title, description)) in PLAN_STEPS.iter().enumerate() {
        text.push_str(&format!("{}. **{title}**: {description}\n", index + 1));
    }
    text.push_str(
        "\n## Timeline\nEstimated completion time: 1-2 hours\n\n## Requirements\n\
         - No additional dependencies required\n\
         - All code will be written in JavaScript/TypeScript\n",
    );
    text
}

/// Enables auto-chaining and starts the first step.
pub fn approve_plan(project: &Project) -> Result<Project> {
    let steps = project
        .steps
        .as_ref()
        .filter(|steps| !steps.is_empty())
        .ok_or_else(|| ForgeError::invalid_state("Project has no plan to approve"))?;

    let mut steps = steps.clone();
    steps[0].status = StepStatus::InProgress;
    steps[0].approved = true;

    let mut updated = project.clone();
    updated.plan_approved = true;
    updated.status = ProjectStatus::InProgress;
    updated.steps = Some(steps);
    updated.touch();
    Ok(updated)
}

/// Completes the step at `index` and activates the following one.
///
/// Out-of-range indices and projects without steps are left unchanged.
pub fn execute_step(project: &Project, index: usize) -> Advance {
    let Some(steps) = project.steps.as_ref().filter(|steps| index < steps.len()) else {
        return Advance {
            project: project.clone(),
            next: None,
        };
    };

    let mut steps = steps.clone();
    steps[index].status = StepStatus::Completed;
    steps[index].output = Some(format!("Successfully completed: {}", steps[index].title));

    let next = index + 1;
    let has_next = next < steps.len();
    if has_next {
        steps[next].status = StepStatus::InProgress;
    }

    let mut updated = project.clone();
    updated.steps = Some(steps);
    updated.current_step_index = Some(if has_next { next } else { index });
    updated.status = if has_next {
        ProjectStatus::InProgress
    } else {
        ProjectStatus::Completed
    };
    updated.touch();

    let chain = has_next && project.plan_approved;
    Advance {
        project: updated,
        next: chain.then_some(next),
    }
}

/// Marks a single step approved and returns its index.
pub fn approve_step(project: &Project, step_id: &str) -> Result<(Project, usize)> {
    let steps = project
        .steps
        .as_ref()
        .ok_or_else(|| ForgeError::not_found("Step", step_id))?;
    let index = steps
        .iter()
        .position(|step| step.id == step_id)
        .ok_or_else(|| ForgeError::not_found("Step", step_id))?;

    let mut steps = steps.clone();
    steps[index].approved = true;

    let mut updated = project.clone();
    updated.steps = Some(steps);
    updated.touch();
    Ok((updated, index))
}

/// Switches the project into auto-chain mode from its current step.
pub fn continue_execution(project: &Project) -> Result<Continuation> {
    let (Some(steps), Some(index)) = (project.steps.as_ref(), project.current_step_index) else {
        return Err(ForgeError::invalid_state(
            "Project has no steps or current step index",
        ));
    };

    if index >= steps.len() || project.status == ProjectStatus::Completed {
        return Ok(Continuation::AlreadyComplete);
    }

    let mut updated = project.clone();
    updated.plan_approved = true;
    updated.touch();
    Ok(Continuation::Resume {
        project: updated,
        index,
    })
}

/// Records an externally reported failure on an in-progress step.
pub fn fail_step(project: &Project, step_id: &str, message: &str) -> Result<Project> {
    let steps = project
        .steps
        .as_ref()
        .ok_or_else(|| ForgeError::not_found("Step", step_id))?;
    let index = steps
        .iter()
        .position(|step| step.id == step_id)
        .ok_or_else(|| ForgeError::not_found("Step", step_id))?;

    if steps[index].status != StepStatus::InProgress {
        return Err(ForgeError::invalid_state(format!(
            "Step '{}' is {}, only in-progress steps can fail",
            steps[index].title,
            steps[index].status.as_str()
        )));
    }

    let mut steps = steps.clone();
    steps[index].status = StepStatus::Error;
    steps[index].output = Some(message.to_string());

    let mut updated = project.clone();
    updated.steps = Some(steps);
    updated.touch();
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned() -> Project {
        generate_plan(&Project::new("Demo", "A demo project"), "A todo app").0
    }

    fn statuses(project: &Project) -> Vec<StepStatus> {
        project.steps().iter().map(|step| step.status).collect()
    }

    #[test]
    fn test_generate_plan_has_five_pending_steps() {
        let (project, text) = generate_plan(&Project::new("Demo", ""), "A todo app");
        assert_eq!(project.steps().len(), 5);
        assert!(project
            .steps()
            .iter()
            .all(|s| s.status == StepStatus::Pending && !s.approved));
        assert_eq!(
            project.steps().iter().map(|s| s.order).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(project.current_step_index, Some(0));
        assert_eq!(project.status, ProjectStatus::Planning);
        assert!(text.starts_with("# Project Plan: Demo"));
        assert!(text.contains("> A todo app"));
        assert!(text.contains("5. **Documentation**"));
        assert_eq!(project.plan.as_deref(), Some(text.as_str()));
    }

    #[test]
    fn test_regenerate_plan_clears_approval() {
        let approved = approve_plan(&planned()).unwrap();
        let (project, _) = generate_plan(&approved, "");
        assert!(!project.plan_approved);
        assert_eq!(project.status, ProjectStatus::Planning);
        assert!(statuses(&project)
            .iter()
            .all(|status| *status == StepStatus::Pending));
    }

    #[test]
    fn test_approve_plan_starts_first_step() {
        let project = approve_plan(&planned()).unwrap();
        assert!(project.plan_approved);
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.steps()[0].status, StepStatus::InProgress);
        assert!(project.steps()[0].approved);
        assert_eq!(project.steps()[1].status, StepStatus::Pending);
    }

    #[test]
    fn test_approve_plan_without_steps_fails() {
        let err = approve_plan(&Project::new("Demo", "")).unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_execute_step_advances() {
        let project = approve_plan(&planned()).unwrap();
        let advance = execute_step(&project, 0);

        let steps = advance.project.steps();
        assert_eq!(steps[0].status, StepStatus::Completed);
        assert_eq!(
            steps[0].output.as_deref(),
            Some("Successfully completed: Project setup")
        );
        assert_eq!(steps[1].status, StepStatus::InProgress);
        assert_eq!(advance.project.current_step_index, Some(1));
        assert_eq!(advance.project.status, ProjectStatus::InProgress);
        assert_eq!(advance.next, Some(1));
    }

    #[test]
    fn test_execute_step_without_approval_does_not_chain() {
        let advance = execute_step(&planned(), 0);
        assert_eq!(advance.next, None);
        assert_eq!(advance.project.steps()[1].status, StepStatus::InProgress);
    }

    #[test]
    fn test_chain_completes_in_order() {
        let mut project = approve_plan(&planned()).unwrap();
        let mut index = Some(0);
        let mut visited = Vec::new();
        while let Some(current) = index {
            visited.push(current);
            let advance = execute_step(&project, current);
            project = advance.project;
            index = advance.next;
        }

        assert_eq!(visited, vec![0, 1, 2, 3, 4]);
        assert_eq!(project.status, ProjectStatus::Completed);
        assert_eq!(project.current_step_index, Some(4));
        assert!(statuses(&project)
            .iter()
            .all(|status| *status == StepStatus::Completed));
    }

    #[test]
    fn test_execute_step_out_of_range_is_noop() {
        let project = planned();
        let advance = execute_step(&project, 9);
        assert_eq!(advance.project, project);
        assert_eq!(advance.next, None);
    }

    #[test]
    fn test_approve_step() {
        let project = planned();
        let step_id = project.steps()[2].id.clone();
        let (updated, index) = approve_step(&project, &step_id).unwrap();
        assert_eq!(index, 2);
        assert!(updated.steps()[2].approved);
        assert!(!updated.steps()[1].approved);

        assert!(approve_step(&project, "missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_continue_execution() {
        let project = planned();
        match continue_execution(&project).unwrap() {
            Continuation::Resume { project, index } => {
                assert!(project.plan_approved);
                assert_eq!(index, 0);
            }
            Continuation::AlreadyComplete => panic!("expected resume"),
        }

        let err = continue_execution(&Project::new("Demo", "")).unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_continue_after_completion() {
        let mut project = approve_plan(&planned()).unwrap();
        for index in 0..5 {
            project = execute_step(&project, index).project;
        }
        assert_eq!(
            continue_execution(&project).unwrap(),
            Continuation::AlreadyComplete
        );
    }

    #[test]
    fn test_fail_step_only_from_in_progress() {
        let project = approve_plan(&planned()).unwrap();
        let first = project.steps()[0].id.clone();
        let second = project.steps()[1].id.clone();

        let failed = fail_step(&project, &first, "build broke").unwrap();
        assert_eq!(failed.steps()[0].status, StepStatus::Error);
        assert_eq!(failed.steps()[0].output.as_deref(), Some("build broke"));

        assert!(fail_step(&project, &second, "x").unwrap_err().is_invalid_state());
    }
}
