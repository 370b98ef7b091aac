//! Collection wrapper types.

use std::fmt;

use crate::models::{AiModel, FileNode, Project};

/// Project listing with one summary block per project.
///
/// # Examples
///
/// ```rust
/// use forge_core::{display::ProjectSummaries, models::Project};
///
/// let summaries = ProjectSummaries(vec![Project::new("Demo", "A demo project")]);
/// assert!(summaries.to_string().contains("## Demo"));
/// assert_eq!(ProjectSummaries(vec![]).to_string(), "No projects found.\n");
/// ```
pub struct ProjectSummaries(pub Vec<Project>);

impl ProjectSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ProjectSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No projects found.");
        }
        for project in &self.0 {
            let progress = if project.steps().is_empty() {
                String::new()
            } else {
                format!(
                    " ({}/{})",
                    project.completed_steps(),
                    project.steps().len()
                )
            };
            writeln!(f, "## {}{progress}", project.name)?;
            writeln!(f)?;
            writeln!(f, "- **ID**: {}", project.id)?;
            writeln!(f, "- **Status**: {}", project.status)?;
            if !project.description.is_empty() {
                writeln!(f, "- **Description**: {}", project.description)?;
            }
            if let Some(model) = &project.active_ai_model {
                writeln!(f, "- **Model**: {}", model.name)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Search results or any other list of models.
pub struct ModelList(pub Vec<AiModel>);

impl fmt::Display for ModelList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No models found.");
        }
        for model in &self.0 {
            write!(f, "{model}")?;
        }
        Ok(())
    }
}

/// Indented rendering of a file tree, folders first as stored.
pub struct FileTree<'a>(pub &'a FileNode);

impl FileTree<'_> {
    fn fmt_node(node: &FileNode, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "  ".repeat(depth);
        if node.is_folder() {
            writeln!(f, "{indent}- **{}/**", node.name)?;
            for child in node.children() {
                Self::fmt_node(child, depth + 1, f)?;
            }
            Ok(())
        } else {
            writeln!(f, "{indent}- {}", node.name)
        }
    }
}

impl fmt::Display for FileTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_node(self.0, 0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub;

    #[test]
    fn test_file_tree_indents_children() {
        let project = Project::new("Demo", "");
        let output = FileTree(&project.root_directory).to_string();
        assert_eq!(
            output,
            "- **Demo/**\n  - **src/**\n    - index.js\n  - README.md\n"
        );
    }

    #[test]
    fn test_model_list() {
        let output = ModelList(hub::catalog()).to_string();
        assert!(output.contains("## Phi-2"));
        assert!(output.contains("meta-llama/Llama-3-8B"));
        assert_eq!(ModelList(vec![]).to_string(), "No models found.\n");
    }

    #[test]
    fn test_project_summaries_show_progress() {
        let project = crate::workflow::generate_plan(&Project::new("Demo", "Todo"), "").0;
        let output = ProjectSummaries(vec![project]).to_string();
        assert!(output.contains("## Demo (0/5)"));
        assert!(output.contains("- **Status**: planning"));
        assert!(output.contains("- **Description**: Todo"));
    }
}
