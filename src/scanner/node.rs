//! Tree node types produced by a scan

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of filesystem entry a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::File => "file",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry (file or folder) in a scanned tree
///
/// Serializes to `{id, value, type, path, open?, data?}`; `open` and `data`
/// are only present on folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Pre-order id, unique within one scan
    pub id: String,
    /// Display name
    pub value: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// POSIX path relative to the scan root, empty for the root itself
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Node>>,
}

impl Node {
    /// Create a folder node with no children yet
    pub fn folder(id: impl Into<String>, value: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            kind: NodeKind::Folder,
            path: path.into(),
            open: Some(true),
            data: Some(Vec::new()),
        }
    }

    pub fn file(id: impl Into<String>, value: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            kind: NodeKind::File,
            path: path.into(),
            open: None,
            data: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Children of a folder; always empty for files
    pub fn children(&self) -> &[Node] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Visit this node and all descendants in pre-order
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}
