//! Record types for normstore
//!
//! This module defines the foundational types:
//! - RecordId: Identifier of a record (integer or string)
//! - Fields: Domain-defined part of a record
//! - Record: One entry of a normalized collection

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a record, unique within one store
///
/// Integer ids take part in id generation (`next_id` is one past the largest
/// integer id present); string ids are accepted but never generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer identifier
    Int(i64),
    /// String identifier
    Str(String),
}

impl RecordId {
    /// Get as i64 if this is an integer id
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RecordId::Int(i) => Some(*i),
            RecordId::Str(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(i) => write!(f, "{}", i),
            RecordId::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(i: i64) -> Self {
        RecordId::Int(i)
    }
}

impl From<i32> for RecordId {
    fn from(i: i32) -> Self {
        RecordId::Int(i as i64)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Str(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Str(s)
    }
}

/// Name of the id field in serialized records
pub const ID_FIELD: &str = "id";

/// Field name → value map: everything in a record except its id
///
/// Also the shape of the partial values handed to `update`.
pub type Fields = BTreeMap<String, Value>;

/// One record of a normalized collection
///
/// Serializes as a single flat object: `{"id": 1, "name": "W"}`.
///
/// The id is optional only so a record that has not been created yet can be
/// handed to `add`, which fills it in. Every record held by a store state
/// carries an id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,
    #[serde(flatten)]
    fields: Fields,
}

impl Record {
    /// Create an empty record without id
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with the given id
    pub fn with_id(id: impl Into<RecordId>) -> Self {
        Self {
            id: Some(id.into()),
            fields: Fields::new(),
        }
    }

    /// Create a record from an optional id and its fields
    pub fn from_parts(id: Option<RecordId>, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Builder-style field assignment
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// The record id, if assigned
    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    /// Assign the record id
    pub fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    /// Remove and return the record id
    pub fn take_id(&mut self) -> Option<RecordId> {
        self.id.take()
    }

    /// Read one field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Write one field, returning the previous value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Remove one field
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// All fields except the id
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Shallow merge: every field of `partial` overrides the same field here
    ///
    /// The id is never touched: an `"id"` entry in `partial` is skipped.
    pub fn merged(&self, partial: &Fields) -> Record {
        let mut fields = self.fields.clone();
        for (name, value) in partial {
            if name == ID_FIELD {
                continue;
            }
            fields.insert(name.clone(), value.clone());
        }
        Record {
            id: self.id.clone(),
            fields,
        }
    }
}
