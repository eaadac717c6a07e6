//! Project tree scanning
//!
//! Walks a root directory depth-first and builds an ordered tree of folder and
//! file nodes, skipping ignored entries and symbolic links.

mod node;
mod rules;
mod tree_scanner;

pub use node::{Node, NodeKind};
pub use rules::{DEFAULT_IGNORE_PATTERNS, IgnoreRules, PathNamingRules};
pub use tree_scanner::{PERMISSION_DENIED_MARKER, ScanObserver, TreeScanner};
