//! Arena-backed record tree
//!
//! All nodes live in one `Vec`; slot 0 is the root sentinel. Dropping the
//! [`Tree`] drops every node and record at once.

use super::node::{NoParent, Node, NodeIndex};
use crate::types::Record;

/// Rooted tree of records
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree holding only the root sentinel
    pub fn new() -> Self {
        Tree {
            nodes: vec![Node::sentinel()],
        }
    }

    pub fn with_capacity(records: usize) -> Self {
        let mut nodes = Vec::with_capacity(records + 1);
        nodes.push(Node::sentinel());
        Tree { nodes }
    }

    pub fn root(&self) -> NodeIndex {
        NodeIndex::ROOT
    }

    /// Number of record-owning nodes (the sentinel is not counted)
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.0]
    }

    /// Attach `record` as the last child of `parent` and return the new node.
    pub fn add_child(&mut self, parent: NodeIndex, record: Record) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(Node::with_record(record, parent));
        self.nodes[parent.0].children.push(idx);
        idx
    }

    pub fn children(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.node(idx).children()
    }

    /// Records of the direct children, in attach order
    pub fn child_records(&self, idx: NodeIndex) -> Vec<&Record> {
        self.children(idx)
            .iter()
            .filter_map(|&child| self.node(child).record())
            .collect()
    }

    pub fn parent(&self, idx: NodeIndex) -> Result<NodeIndex, NoParent> {
        self.node(idx).parent()
    }

    /// Records from `idx` up to the last node below the sentinel.
    ///
    /// Includes the record at `idx` itself (nearest first). Empty when `idx`
    /// is the sentinel.
    pub fn ancestors(&self, idx: NodeIndex) -> Vec<&Record> {
        let mut chain = Vec::new();
        let mut current = idx;
        loop {
            let node = self.node(current);
            if let Some(record) = node.record() {
                chain.push(record);
            }
            match node.parent() {
                Ok(parent) if !parent.is_root() => current = parent,
                _ => break,
            }
        }
        chain
    }

    /// Number of edges between `idx` and the nearest top-level node.
    pub fn depth(&self, idx: NodeIndex) -> usize {
        let mut hops = 0;
        let mut current = idx;
        while let Ok(parent) = self.parent(current) {
            if parent.is_root() {
                break;
            }
            hops += 1;
            current = parent;
        }
        hops
    }

    /// Deepest `depth` over the whole tree, 0 when empty. One breadth-first pass.
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut level: Vec<NodeIndex> = self.children(self.root()).to_vec();
        let mut depth = 0;
        while !level.is_empty() {
            deepest = depth;
            level = level
                .iter()
                .flat_map(|&idx| self.children(idx).iter().copied())
                .collect();
            depth += 1;
        }
        deepest
    }

    /// Every record in the subtree at `idx`, itself included, sorted by id.
    pub fn flatten_all(&self, idx: NodeIndex) -> Vec<&Record> {
        let mut records = Vec::new();
        if let Some(record) = self.node(idx).record() {
            records.push(record);
        }
        self.collect_descendants(idx, &mut records);
        sort_by_id(&mut records);
        records
    }

    /// Every record strictly below `idx`, sorted by id.
    pub fn flatten_inner(&self, idx: NodeIndex) -> Vec<&Record> {
        let mut records = Vec::new();
        self.collect_descendants(idx, &mut records);
        sort_by_id(&mut records);
        records
    }

    // Explicit stack: deep chains must not grow the call stack.
    fn collect_descendants<'a>(&'a self, idx: NodeIndex, out: &mut Vec<&'a Record>) {
        let mut stack: Vec<NodeIndex> = self.children(idx).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            let node = self.node(current);
            if let Some(record) = node.record() {
                out.push(record);
            }
            stack.extend(node.children().iter().rev().copied());
        }
    }
}

fn sort_by_id(records: &mut [&Record]) {
    records.sort_by(|a, b| a.id().cmp(b.id()));
}
