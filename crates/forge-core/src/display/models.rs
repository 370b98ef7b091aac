//! Display implementations for domain models.
//!
//! All output is markdown. Steps carry status icons; the project view
//! nests its plan and steps under second-level headings.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{AiModel, FileNode, NodeKind, Project, ProjectStatus, ProjectStep, StepStatus};

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Status: {}", self.status)?;
        if !self.steps().is_empty() {
            writeln!(
                f,
                "- Progress: {}/{} steps",
                self.completed_steps(),
                self.steps().len()
            )?;
        }
        if let Some(model) = &self.active_ai_model {
            writeln!(f, "- Model: {} ({})", model.name, model.hugging_face_id)?;
        }
        if let Some(config) = self.github_config.as_ref().filter(|c| c.connected) {
            let repo = config.repo_url.as_deref().unwrap_or("unknown repository");
            match &config.username {
                Some(user) => writeln!(f, "- GitHub: {repo} ({user})")?,
                None => writeln!(f, "- GitHub: {repo}")?,
            }
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        if let Some(plan) = &self.plan {
            let approval = if self.plan_approved {
                "approved"
            } else {
                "awaiting approval"
            };
            writeln!(f, "\n## Plan ({approval})")?;
            writeln!(f)?;
            // Demote the plan's own headings below this one.
            for line in plan.lines() {
                if line.starts_with('#') {
                    writeln!(f, "##{line}")?;
                } else {
                    writeln!(f, "{line}")?;
                }
            }
        }

        if self.steps().is_empty() {
            writeln!(f, "\nNo plan generated yet.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in self.steps() {
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for ProjectStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.order,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        if self.approved && !self.status.is_terminal() {
            writeln!(f, "_Approved_")?;
            writeln!(f)?;
        }

        if let Some(output) = &self.output {
            writeln!(f, "#### Output")?;
            writeln!(f)?;
            writeln!(f, "{output}")?;
            writeln!(f)?;
        }

        writeln!(f, "Step ID: `{}`", self.id)?;
        writeln!(f)
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- **ID**: {}", self.id)?;
        writeln!(f, "- **Source**: {}", self.hugging_face_id)?;
        if let Some(size) = &self.size {
            writeln!(f, "- **Size**: {size}")?;
        }
        if let Some(at) = &self.downloaded_at {
            writeln!(f, "- **Downloaded**: {}", LocalDateTime(at))?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)
    }
}

impl fmt::Display for FileNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::File => {
                writeln!(f, "# {}", self.path)?;
                writeln!(f)?;
                writeln!(f, "```")?;
                let content = self.content.as_deref().unwrap_or("");
                if content.is_empty() {
                    writeln!(f, "```")
                } else {
                    writeln!(f, "{}", content.trim_end_matches('\n'))?;
                    writeln!(f, "```")
                }
            }
            NodeKind::Folder => {
                writeln!(f, "# {}/", self.path)?;
                writeln!(f)?;
                match self.children().len() {
                    0 => writeln!(f, "Empty folder."),
                    1 => writeln!(f, "1 entry"),
                    n => writeln!(f, "{n} entries"),
                }
            }
        }
    }
}
