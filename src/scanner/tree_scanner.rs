//! Recursive directory walk that builds the ordered node tree

use super::node::{Node, NodeKind};
use super::rules::{IgnoreRules, PathNamingRules};
use crate::error::{ScanError, VizError};
use crate::paths;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix appended to a folder's display value when its children cannot be listed
pub const PERMISSION_DENIED_MARKER: &str = " (Permission Denied)";

/// Live listing callback: `(kind, relative path or root name, depth)`
pub type ScanObserver<'a> = dyn FnMut(NodeKind, &str, usize) + 'a;

/// A surviving directory entry, ready to become a node
pub(super) struct ChildEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

pub struct TreeScanner {
    pub(crate) root: PathBuf,
    pub(crate) rules: IgnoreRules,
    node_counter: usize,
}

impl TreeScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            rules: IgnoreRules::default(),
            node_counter: 0,
        }
    }

    /// Append ignore patterns to the default set
    pub fn with_ignore_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.extend(patterns);
        self
    }

    pub fn with_naming_rules(mut self, naming: PathNamingRules) -> Self {
        self.rules.set_naming(naming);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ignore_patterns(&self) -> &[String] {
        self.rules.patterns()
    }

    /// Build the tree without a live listing
    pub fn generate_tree(&mut self) -> Result<(Node, usize), VizError> {
        self.generate_tree_with(&mut |_, _, _| {})
    }

    /// Build the tree, announcing every node to `observer` as it is discovered.
    ///
    /// Returns the root node and the number of nodes constructed.
    pub fn generate_tree_with(
        &mut self,
        observer: &mut ScanObserver<'_>,
    ) -> Result<(Node, usize), VizError> {
        if !self.root.exists() {
            return Err(ScanError::RootNotFound(self.root.display().to_string()).into());
        }
        if !self.root.is_dir() {
            return Err(ScanError::NotADirectory(self.root.display().to_string()).into());
        }

        let resolved = paths::resolve(&self.root)?;
        let root_name = paths::display_name(&resolved);

        self.node_counter = 0;
        let root = self.root.clone();
        let tree = self.build_folder(&root, root_name, String::new(), 0, observer)?;

        tracing::info!("Scanned {:?}: {} nodes", resolved, self.node_counter);
        Ok((tree, self.node_counter))
    }

    fn next_id(&mut self) -> String {
        let id = self.node_counter.to_string();
        self.node_counter += 1;
        id
    }

    fn build_folder(
        &mut self,
        dir: &Path,
        value: String,
        relative: String,
        depth: usize,
        observer: &mut ScanObserver<'_>,
    ) -> Result<Node, VizError> {
        let id = self.next_id();
        let label = if relative.is_empty() { value.as_str() } else { relative.as_str() };
        observer(NodeKind::Folder, label, depth);

        let node = Node::folder(id, value, relative);
        let listing = self.list_children(dir);
        self.fill_folder(node, dir, listing, depth, observer)
    }

    /// Attach the children of `dir` to `node`, recursing into subfolders.
    ///
    /// A `PermissionDenied` listing marks the folder and leaves it empty;
    /// any other listing error aborts the scan.
    pub(super) fn fill_folder(
        &mut self,
        mut node: Node,
        dir: &Path,
        listing: io::Result<Vec<ChildEntry>>,
        depth: usize,
        observer: &mut ScanObserver<'_>,
    ) -> Result<Node, VizError> {
        let children = match listing {
            Ok(children) => children,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                tracing::warn!("Permission denied listing {:?}", dir);
                node.value.push_str(PERMISSION_DENIED_MARKER);
                return Ok(node);
            }
            Err(e) => {
                return Err(ScanError::ListFailed {
                    path: dir.display().to_string(),
                    reason: e.to_string(),
                }
                .into());
            }
        };

        let mut data = Vec::with_capacity(children.len());
        for child in children {
            let child_relative = paths::join_posix(&node.path, &child.name);
            let child_node = if child.is_dir {
                self.build_folder(&child.path, child.name, child_relative, depth + 1, observer)?
            } else {
                self.build_file(child.name, child_relative, depth + 1, observer)
            };
            data.push(child_node);
        }
        node.data = Some(data);

        Ok(node)
    }

    fn build_file(
        &mut self,
        name: String,
        relative: String,
        depth: usize,
        observer: &mut ScanObserver<'_>,
    ) -> Node {
        let id = self.next_id();
        observer(NodeKind::File, relative.as_str(), depth);
        Node::file(id, name, relative)
    }

    /// List a directory's eligible children: folders first, then case-insensitive by name
    fn list_children(&self, dir: &Path) -> io::Result<Vec<ChildEntry>> {
        let mut children = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if self.rules.is_ignored(&name) {
                tracing::debug!("Ignoring {:?}", entry.path());
                continue;
            }

            let file_type = entry.file_type()?;
            if file_type.is_symlink() {
                tracing::debug!("Skipping symlink {:?}", entry.path());
                continue;
            }

            children.push(ChildEntry {
                name,
                path: entry.path(),
                is_dir: file_type.is_dir(),
            });
        }

        // Exact name breaks ties between names differing only in case
        children.sort_by_cached_key(|c| (!c.is_dir, c.name.to_lowercase(), c.name.clone()));
        Ok(children)
    }
}
