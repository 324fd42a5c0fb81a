//! Tree vertex types

use crate::types::Record;
use thiserror::Error;

/// Position of a node inside its [`super::Tree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    /// Slot of the root sentinel in every arena
    pub const ROOT: NodeIndex = NodeIndex(0);

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

/// The vertex has no parent; only ever true of the root sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("node has no parent")]
pub struct NoParent;

/// Arena vertex.
///
/// Owns at most one record (none only for the root sentinel). Parent and
/// children are arena indices, so the back-reference never owns anything.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) record: Option<Record>,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: Vec<NodeIndex>, // attach order
}

impl Node {
    pub(crate) fn sentinel() -> Self {
        Self {
            record: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn with_record(record: Record, parent: NodeIndex) -> Self {
        Self {
            record: Some(record),
            parent: Some(parent),
            children: Vec::new(),
        }
    }

    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    pub fn parent(&self) -> Result<NodeIndex, NoParent> {
        self.parent.ok_or(NoParent)
    }
}
