//! File-tree engine.
//!
//! Lookups walk the tree depth-first and compare the stored `path` field
//! exactly. Mutations never touch the input: they clone the root, edit the
//! clone and hand it back as the new snapshot.
//!
//! ```rust
//! use forge_core::{models::{NodeKind, Project}, tree};
//!
//! let project = Project::new("Demo", "");
//! let root = tree::create_node(&project.root_directory, "/Demo/src", "lib.js", NodeKind::File)?;
//! assert!(tree::find_by_path(&root, "/Demo/src/lib.js").is_some());
//! # Ok::<(), forge_core::ForgeError>(())
//! ```

use crate::{
    error::{ForgeError, Result},
    models::{FileNode, NodeKind},
};

/// Finds the first node whose `path` equals `path`.
pub fn find_by_path<'a>(root: &'a FileNode, path: &str) -> Option<&'a FileNode> {
    if root.path == path {
        return Some(root);
    }
    root.children()
        .iter()
        .find_map(|child| find_by_path(child, path))
}

fn find_by_path_mut<'a>(root: &'a mut FileNode, path: &str) -> Option<&'a mut FileNode> {
    if root.path == path {
        return Some(root);
    }
    root.children
        .as_mut()?
        .iter_mut()
        .find_map(|child| find_by_path_mut(child, path))
}

/// Splits `path` at its last `/` into (parent path, final segment).
///
/// Returns `None` for paths without a separator, or whose parent would be
/// empty (the project root).
pub fn split_parent(path: &str) -> Option<(&str, &str)> {
    let index = path.rfind('/')?;
    if index == 0 {
        return None;
    }
    Some((&path[..index], &path[index + 1..]))
}

/// Finds the folder that should contain `path`.
pub fn find_parent<'a>(root: &'a FileNode, path: &str) -> Option<&'a FileNode> {
    let (parent_path, _) = split_parent(path)?;
    find_by_path(root, parent_path)
}

/// Appends a new file or folder named `name` under `parent_path`.
///
/// Same-named siblings are not rejected.
pub fn create_node(root: &FileNode, parent_path: &str, name: &str, kind: NodeKind) -> Result<FileNode> {
    let mut root = root.clone();
    let parent = find_by_path_mut(&mut root, parent_path)
        .filter(|node| node.is_folder())
        .ok_or_else(|| ForgeError::not_found("Folder", parent_path))?;

    let path = format!("{parent_path}/{name}");
    let node = match kind {
        NodeKind::Folder => FileNode::folder(name, path),
        NodeKind::File => FileNode::file(name, path, ""),
    };
    parent.children.get_or_insert_with(Vec::new).push(node);

    Ok(root)
}

/// Replaces the content of the file at `path`.
pub fn update_file(root: &FileNode, path: &str, content: &str) -> Result<FileNode> {
    let mut root = root.clone();
    let node = find_by_path_mut(&mut root, path)
        .filter(|node| node.is_file())
        .ok_or_else(|| ForgeError::not_found("File", path))?;
    node.set_content(content);
    Ok(root)
}

/// Removes every child of `path`'s parent whose name is `path`'s final
/// segment.
pub fn delete_node(root: &FileNode, path: &str) -> Result<FileNode> {
    let (parent_path, name) =
        split_parent(path).ok_or_else(|| ForgeError::not_found("Parent folder", path))?;

    let mut root = root.clone();
    let parent = find_by_path_mut(&mut root, parent_path)
        .filter(|node| node.is_folder())
        .ok_or_else(|| ForgeError::not_found("Parent folder", parent_path))?;

    if let Some(children) = parent.children.as_mut() {
        children.retain(|child| child.name != name);
    }
    Ok(root)
}

/// Depth-first, pre-order iterator over every node in the tree.
pub fn walk(root: &FileNode) -> Walk<'_> {
    Walk { stack: vec![root] }
}

pub struct Walk<'a> {
    stack: Vec<&'a FileNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a FileNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Checks that every child's path is its parent's path plus `/name`, and that
/// files carry no children.
pub fn validate_paths(root: &FileNode) -> Result<()> {
    for node in walk(root) {
        if node.is_file() && node.children.is_some() {
            return Err(ForgeError::invalid_state(format!(
                "File '{}' has children",
                node.path
            )));
        }
        for child in node.children() {
            let expected = format!("{}/{}", node.path, child.name);
            if child.path != expected {
                return Err(ForgeError::invalid_state(format!(
                    "Node path '{}' does not match expected '{expected}'",
                    child.path
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;

    fn demo_root() -> FileNode {
        Project::new("Demo", "A demo project").root_directory
    }

    #[test]
    fn test_find_by_path_matches_exactly() {
        let root = demo_root();
        assert_eq!(find_by_path(&root, "/Demo").map(|n| n.name.as_str()), Some("Demo"));
        assert_eq!(
            find_by_path(&root, "/Demo/src/index.js").map(|n| n.name.as_str()),
            Some("index.js")
        );
        assert!(find_by_path(&root, "/Demo/src/").is_none());
        assert!(find_by_path(&root, "/Demo/missing").is_none());
    }

    #[test]
    fn test_find_parent() {
        let root = demo_root();
        let parent = find_parent(&root, "/Demo/src/index.js").expect("parent exists");
        assert_eq!(parent.path, "/Demo/src");
        assert!(find_parent(&root, "/Demo").is_none());
        assert!(find_parent(&root, "Demo").is_none());
    }

    #[test]
    fn test_create_file_and_folder() {
        let root = demo_root();
        let root = create_node(&root, "/Demo/src", "lib", NodeKind::Folder).unwrap();
        let root = create_node(&root, "/Demo/src/lib", "util.js", NodeKind::File).unwrap();

        let folder = find_by_path(&root, "/Demo/src/lib").unwrap();
        assert!(folder.is_folder());
        assert_eq!(folder.children.as_ref().map(Vec::len), Some(1));
        assert!(folder.content.is_none());

        let file = find_by_path(&root, "/Demo/src/lib/util.js").unwrap();
        assert!(file.is_file());
        assert_eq!(file.content.as_deref(), Some(""));
        assert!(file.children.is_none());
        assert_eq!(file.created_at, file.updated_at);

        validate_paths(&root).unwrap();
    }

    #[test]
    fn test_create_leaves_input_untouched() {
        let root = demo_root();
        let updated = create_node(&root, "/Demo", "notes.txt", NodeKind::File).unwrap();
        assert!(find_by_path(&root, "/Demo/notes.txt").is_none());
        assert!(find_by_path(&updated, "/Demo/notes.txt").is_some());
    }

    #[test]
    fn test_create_under_file_or_missing_parent_fails() {
        let root = demo_root();
        let err = create_node(&root, "/Demo/README.md", "x", NodeKind::File).unwrap_err();
        assert!(err.is_not_found());
        let err = create_node(&root, "/Demo/nope", "x", NodeKind::File).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_allows_duplicate_names() {
        let root = demo_root();
        let root = create_node(&root, "/Demo", "a.txt", NodeKind::File).unwrap();
        let root = create_node(&root, "/Demo", "a.txt", NodeKind::File).unwrap();
        let count = root.children().iter().filter(|c| c.name == "a.txt").count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_update_file_bumps_timestamp() {
        let root = demo_root();
        let before = find_by_path(&root, "/Demo/README.md").unwrap().clone();
        let root = update_file(&root, "/Demo/README.md", "# Updated").unwrap();
        let after = find_by_path(&root, "/Demo/README.md").unwrap();

        assert_eq!(after.content.as_deref(), Some("# Updated"));
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.id, before.id);
    }

    #[test]
    fn test_update_folder_fails() {
        let root = demo_root();
        let err = update_file(&root, "/Demo/src", "text").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_removes_all_same_named_children() {
        let root = demo_root();
        let root = create_node(&root, "/Demo", "dup", NodeKind::File).unwrap();
        let root = create_node(&root, "/Demo", "dup", NodeKind::Folder).unwrap();
        let before = root.children().len();

        let root = delete_node(&root, "/Demo/dup").unwrap();
        assert_eq!(root.children().len(), before - 2);
        assert!(find_by_path(&root, "/Demo/dup").is_none());
        assert!(find_by_path(&root, "/Demo/README.md").is_some());
    }

    #[test]
    fn test_delete_folder_removes_subtree() {
        let root = delete_node(&demo_root(), "/Demo/src").unwrap();
        assert!(find_by_path(&root, "/Demo/src/index.js").is_none());
    }

    #[test]
    fn test_delete_root_or_orphan_fails() {
        let root = demo_root();
        assert!(delete_node(&root, "/Demo").unwrap_err().is_not_found());
        assert!(delete_node(&root, "/Demo/nope/file").unwrap_err().is_not_found());
        assert!(delete_node(&root, "/Demo/README.md/x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_walk_is_preorder() {
        let root = demo_root();
        let paths: Vec<_> = walk(&root).map(|n| n.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/Demo", "/Demo/src", "/Demo/src/index.js", "/Demo/README.md"]
        );
    }

    #[test]
    fn test_validate_paths_detects_mismatch() {
        let mut root = demo_root();
        if let Some(children) = root.children.as_mut() {
            children[1].path = "/Other/README.md".to_string();
        }
        assert!(validate_paths(&root).unwrap_err().is_invalid_state());
    }
}
