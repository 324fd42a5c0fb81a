//! Order-independent tree construction.
//!
//! Records are indexed by id first, then grouped by parent, then attached
//! breadth-first from the root sentinel. A record is only attached after its
//! parent node exists, whatever order the input arrived in.

use crate::error::StoreError;
use crate::tree::{NodeIndex, Tree};
use crate::types::{Identifier, ParentRef, Record};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info, warn};

/// Build the tree and the id index, or fail without exposing either.
pub(crate) fn build_tree(
    records: Vec<Record>,
) -> Result<(Tree, HashMap<Identifier, NodeIndex>), StoreError> {
    let total = records.len();
    debug!(records = total, "Building tree store");

    let result = attach_all(records);
    match &result {
        Ok((tree, _)) => info!(
            records = tree.len(),
            roots = tree.children(tree.root()).len(),
            "Tree store built"
        ),
        Err(e) => warn!(records = total, error = %e, "Tree store build failed"),
    }
    result
}

fn attach_all(
    records: Vec<Record>,
) -> Result<(Tree, HashMap<Identifier, NodeIndex>), StoreError> {
    // Pass 1: every id is known before any parent is resolved.
    let mut positions: HashMap<Identifier, usize> = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        if positions.insert(record.id().clone(), pos).is_some() {
            return Err(StoreError::DuplicateId {
                id: record.id().clone(),
            });
        }
    }

    // Pass 2: bucket by parent, keeping input order inside each bucket.
    let mut top_level: Vec<usize> = Vec::new();
    let mut by_parent: HashMap<usize, Vec<usize>> = HashMap::new();
    for (pos, record) in records.iter().enumerate() {
        match record.parent() {
            ParentRef::Root => top_level.push(pos),
            ParentRef::Id(parent) => match positions.get(parent) {
                Some(&parent_pos) => by_parent.entry(parent_pos).or_default().push(pos),
                None => {
                    return Err(StoreError::ParentNotFound {
                        parent: parent.clone(),
                        id: record.id().clone(),
                    })
                }
            },
        }
    }
    debug!(
        top_level = top_level.len(),
        parents = by_parent.len(),
        "Grouped records by parent"
    );

    // Pass 3: breadth-first attach.
    let mut slots: Vec<Option<Record>> = records.into_iter().map(Some).collect();
    let mut tree = Tree::with_capacity(slots.len());
    let mut by_id: HashMap<Identifier, NodeIndex> = HashMap::with_capacity(slots.len());
    let mut queue: VecDeque<(usize, NodeIndex)> = VecDeque::new();

    let root = tree.root();
    for pos in top_level {
        attach(&mut tree, &mut by_id, &mut slots, &mut queue, root, pos);
    }
    while let Some((pos, idx)) = queue.pop_front() {
        if let Some(children) = by_parent.remove(&pos) {
            for child in children {
                attach(&mut tree, &mut by_id, &mut slots, &mut queue, idx, child);
            }
        }
    }

    // Leftovers sit on a parent cycle that never reaches the root.
    if let Some(orphan) = slots.iter().flatten().next() {
        let parent = match orphan.parent() {
            ParentRef::Id(parent) => parent.clone(),
            ParentRef::Root => orphan.id().clone(),
        };
        return Err(StoreError::ParentNotFound {
            parent,
            id: orphan.id().clone(),
        });
    }

    debug!(nodes = tree.len(), "Attached all records");
    Ok((tree, by_id))
}

fn attach(
    tree: &mut Tree,
    by_id: &mut HashMap<Identifier, NodeIndex>,
    slots: &mut [Option<Record>],
    queue: &mut VecDeque<(usize, NodeIndex)>,
    parent: NodeIndex,
    pos: usize,
) {
    if let Some(record) = slots[pos].take() {
        let id = record.id().clone();
        let idx = tree.add_child(parent, record);
        by_id.insert(id, idx);
        queue.push_back((pos, idx));
    }
}
