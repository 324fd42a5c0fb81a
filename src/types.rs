//! Core types: identifiers, parent references and records.
//!
//! A [`Record`] keeps the JSON object it was read from untouched, so anything
//! returned by a query serializes back to exactly what the caller supplied.

use crate::error::StoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

/// Record identifier: an integer or a string.
///
/// Integers order numerically, strings by bytes, and every integer sorts
/// before every string. The same ordering backs index lookups and sorting.
///
/// Integer ids are limited to the signed 64-bit range; larger JSON integers
/// are rejected on input rather than wrapped or rounded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Int(i64),
    Str(String),
}

impl Identifier {
    /// Read an identifier out of a JSON value.
    ///
    /// Only strings and integers that fit in an `i64` qualify; floats and
    /// integers above `i64::MAX` give `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Identifier::Int),
            Value::String(s) => Some(Identifier::Str(s.clone())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Identifier::Int(n) => Value::from(*n),
            Identifier::Str(s) => Value::from(s.as_str()),
        }
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Int(a), Identifier::Int(b)) => a.cmp(b),
            (Identifier::Str(a), Identifier::Str(b)) => a.cmp(b),
            (Identifier::Int(_), Identifier::Str(_)) => Ordering::Less,
            (Identifier::Str(_), Identifier::Int(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Int(n) => write!(f, "{}", n),
            Identifier::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier::Int(value)
    }
}

impl From<i32> for Identifier {
    fn from(value: i32) -> Self {
        Identifier::Int(value as i64)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Str(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::Str(value)
    }
}

/// Where a record hangs in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentRef {
    /// Top-level item, attached under the root sentinel
    Root,
    Id(Identifier),
}

impl ParentRef {
    pub fn is_root(&self) -> bool {
        matches!(self, ParentRef::Root)
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRef::Root => write!(f, "<root>"),
            ParentRef::Id(id) => write!(f, "{}", id),
        }
    }
}

fn default_id_field() -> String {
    "id".to_string()
}

fn default_parent_field() -> String {
    "parent".to_string()
}

fn default_root_marker() -> String {
    "root".to_string()
}

/// Field names and root marker used to interpret raw JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Field holding the record's own identifier
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Field holding the parent identifier
    #[serde(default = "default_parent_field")]
    pub parent_field: String,

    /// Parent value that marks a top-level item
    #[serde(default = "default_root_marker")]
    pub root_marker: String,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            id_field: default_id_field(),
            parent_field: default_parent_field(),
            root_marker: default_root_marker(),
        }
    }
}

/// One input item: identifier, parent reference and the original object.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: Identifier,
    parent: ParentRef,
    fields: Map<String, Value>,
    id_field: String,
    parent_field: String,
}

impl Record {
    /// Build a record with only `id` and `parent` fields, using the default schema.
    pub fn new(id: impl Into<Identifier>, parent: ParentRef) -> Self {
        let id = id.into();
        let schema = RecordSchema::default();
        let mut fields = Map::new();
        fields.insert(schema.id_field.clone(), id.to_json());
        let parent_value = match &parent {
            ParentRef::Root => Value::from(schema.root_marker),
            ParentRef::Id(p) => p.to_json(),
        };
        fields.insert(schema.parent_field.clone(), parent_value);
        Self {
            id,
            parent,
            fields,
            id_field: schema.id_field,
            parent_field: schema.parent_field,
        }
    }

    /// Append an extra field. Replaces the value in place if the key exists.
    ///
    /// The id and parent keys cannot be set this way: the record would
    /// serialize differently from what `id()` and `parent()` report.
    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Self, StoreError> {
        let key = key.into();
        if key == self.id_field || key == self.parent_field {
            return Err(StoreError::InvalidRecord(format!(
                "record {}: field \"{}\" is part of the record's identity",
                self.id, key
            )));
        }
        self.fields.insert(key, value);
        Ok(self)
    }

    /// Interpret a JSON object according to `schema`.
    pub fn from_value(value: Value, schema: &RecordSchema) -> Result<Self, StoreError> {
        let fields = match value {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::InvalidRecord(format!(
                    "expected a JSON object, got {}",
                    other
                )))
            }
        };

        let raw_id = fields.get(&schema.id_field).ok_or_else(|| {
            StoreError::InvalidRecord(format!("missing field \"{}\"", schema.id_field))
        })?;
        let id = Identifier::from_json(raw_id).ok_or_else(|| {
            StoreError::InvalidRecord(format!(
                "field \"{}\" must be a signed 64-bit integer or a string, got {}",
                schema.id_field, raw_id
            ))
        })?;

        let raw_parent = fields.get(&schema.parent_field).ok_or_else(|| {
            StoreError::InvalidRecord(format!(
                "record {} is missing field \"{}\"",
                id, schema.parent_field
            ))
        })?;
        let parent = match raw_parent {
            Value::String(s) if *s == schema.root_marker => ParentRef::Root,
            other => ParentRef::Id(Identifier::from_json(other).ok_or_else(|| {
                StoreError::InvalidRecord(format!(
                    "record {}: field \"{}\" must be a signed 64-bit integer or a string, got {}",
                    id, schema.parent_field, other
                ))
            })?),
        };

        Ok(Self {
            id,
            parent,
            fields,
            id_field: schema.id_field.clone(),
            parent_field: schema.parent_field.clone(),
        })
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn parent(&self) -> &ParentRef {
        &self.parent
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_root()
    }

    /// Look up any field of the original object, including `id` and `parent`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The original object, in its original field order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Record::from_value(value, &RecordSchema::default()).map_err(serde::de::Error::custom)
    }
}
