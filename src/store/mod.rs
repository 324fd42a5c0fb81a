//! TreeStore
//!
//! Builds the record tree from a flat, arbitrarily ordered list and answers
//! id-keyed queries by walking the tree. The flat list is never re-scanned
//! after construction.

pub mod build;

use crate::error::StoreError;
use crate::tree::{NodeIndex, Tree};
use crate::types::{Identifier, Record, RecordSchema};
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;

/// Outcome of resolving an id and stepping to its parent
enum Lookup {
    Found(NodeIndex),
    NotFound,
    NoParent,
}

/// Hierarchical index over parent-linked records.
///
/// Immutable once built; share it across threads freely.
#[derive(Debug, Clone)]
pub struct TreeStore {
    tree: Tree,
    by_id: HashMap<Identifier, NodeIndex>,
}

impl TreeStore {
    /// Build the store from records in any order.
    ///
    /// Fails with [`StoreError::ParentNotFound`] if some record's parent can
    /// never be attached, or [`StoreError::DuplicateId`] on a repeated id.
    pub fn new(records: Vec<Record>) -> Result<Self, StoreError> {
        let (tree, by_id) = build::build_tree(records)?;
        Ok(Self { tree, by_id })
    }

    /// Parse a JSON array of records with the default schema and build.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value, &RecordSchema::default())
    }

    /// Build from a JSON array value, interpreting each element with `schema`.
    pub fn from_json_value(value: Value, schema: &RecordSchema) -> Result<Self, StoreError> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(StoreError::InvalidRecord(format!(
                    "expected a JSON array of records, got {}",
                    type_name(&other)
                )))
            }
        };
        let records = items
            .into_iter()
            .map(|item| Record::from_value(item, schema))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    /// Read a JSON array of records from `reader` and build.
    pub fn from_reader<R: Read>(reader: R, schema: &RecordSchema) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_json_value(value, schema)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.by_id.contains_key(id)
    }

    /// Every record, sorted by id
    pub fn get_all(&self) -> Vec<&Record> {
        self.tree.flatten_all(self.tree.root())
    }

    /// Top-level records in attach order
    pub fn root_children(&self) -> Vec<&Record> {
        self.tree.child_records(self.tree.root())
    }

    pub fn get_item(&self, id: &Identifier) -> Result<&Record, StoreError> {
        let idx = self.resolve(id)?;
        self.record_at(idx, id)
    }

    /// Direct children of `id` in attach order. Empty for a leaf.
    pub fn get_children(&self, id: &Identifier) -> Result<Vec<&Record>, StoreError> {
        let idx = self.resolve(id)?;
        Ok(self.tree.child_records(idx))
    }

    /// All descendants of `id`, excluding `id` itself, sorted by id.
    pub fn get_all_children(&self, id: &Identifier) -> Result<Vec<&Record>, StoreError> {
        let idx = self.resolve(id)?;
        Ok(self.tree.flatten_inner(idx))
    }

    /// Ancestors of `id`, nearest first. Empty for a top-level item.
    pub fn get_all_parents(&self, id: &Identifier) -> Result<Vec<&Record>, StoreError> {
        match self.parent_of(id) {
            Lookup::Found(parent) => Ok(self.tree.ancestors(parent)),
            Lookup::NoParent => Ok(Vec::new()),
            Lookup::NotFound => Err(not_found(id)),
        }
    }

    /// Direct parent record of `id`, `None` for a top-level item.
    pub fn get_parent(&self, id: &Identifier) -> Result<Option<&Record>, StoreError> {
        match self.parent_of(id) {
            Lookup::Found(parent) => self.record_at(parent, id).map(Some),
            Lookup::NoParent => Ok(None),
            Lookup::NotFound => Err(not_found(id)),
        }
    }

    /// Distance from the top level: 0 for top-level items.
    pub fn depth(&self, id: &Identifier) -> Result<usize, StoreError> {
        let idx = self.resolve(id)?;
        Ok(self.tree.depth(idx))
    }

    /// Deepest level in the store: 0 when only top-level items (or none) exist.
    pub fn max_depth(&self) -> usize {
        self.tree.max_depth()
    }

    fn resolve(&self, id: &Identifier) -> Result<NodeIndex, StoreError> {
        self.by_id.get(id).copied().ok_or_else(|| not_found(id))
    }

    fn record_at(&self, idx: NodeIndex, id: &Identifier) -> Result<&Record, StoreError> {
        // Only the sentinel lacks a record, and it is never indexed.
        self.tree.node(idx).record().ok_or_else(|| not_found(id))
    }

    // A parent that is the sentinel counts as no parent.
    fn parent_of(&self, id: &Identifier) -> Lookup {
        let Some(&idx) = self.by_id.get(id) else {
            return Lookup::NotFound;
        };
        match self.tree.parent(idx) {
            Ok(parent) if !parent.is_root() => Lookup::Found(parent),
            _ => Lookup::NoParent,
        }
    }
}

fn not_found(id: &Identifier) -> StoreError {
    StoreError::NotFound { id: id.clone() }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
