//! Declarative store and index definitions
//!
//! An [`IndexDefinition`] says how to compute a record's key and whether the
//! index is unique or grouped. Attribute-based and computed keys are both
//! normalized here into one [`KeyFn`] closure; nothing downstream knows which
//! form a definition was written in.
//!
//! ```ignore
//! let definition = StoreDefinition::new()
//!     .ordered_by(OrderingPolicy::by_field("name"))
//!     .with_index(IndexDefinition::attribute("containerId"))
//!     .with_index(IndexDefinition::attribute("slug").unique())
//!     .with_index(IndexDefinition::computed("isColored", |record| {
//!         IndexKey::Bool(record.get("color").is_some_and(Value::is_truthy))
//!     }));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use normstore_core::{IndexKey, Record, StoreError};

use crate::ordering::OrderingPolicy;

/// Key extraction function captured by an index
pub type KeyFn = Arc<dyn Fn(&Record) -> IndexKey + Send + Sync>;

/// The two index variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// At most one id per key
    Unique,
    /// An ordered list of ids per key
    Grouped,
}

impl IndexKind {
    /// Name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Unique => "unique",
            IndexKind::Grouped => "grouped",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unique" => Ok(IndexKind::Unique),
            "grouped" => Ok(IndexKind::Grouped),
            other => Err(StoreError::UnknownIndexKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Index name derived from an attribute: `containerId` → `byContainerId`
pub fn index_name(attribute: &str) -> String {
    let mut chars = attribute.chars();
    match chars.next() {
        Some(first) => format!("by{}{}", first.to_uppercase(), chars.as_str()),
        None => "by".to_string(),
    }
}

/// Definition of one index
#[derive(Clone)]
pub struct IndexDefinition {
    name: String,
    key_fn: KeyFn,
    kind: IndexKind,
    ordering: OrderingPolicy,
}

impl IndexDefinition {
    /// Grouped index keyed by one attribute
    ///
    /// A missing or null attribute lands in the unset bucket.
    pub fn attribute(attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        let name = index_name(&attribute);
        Self::from_key_fn(
            name,
            Arc::new(move |record: &Record| IndexKey::from_optional(record.get(&attribute))),
        )
    }

    /// Grouped index keyed by a custom function
    ///
    /// The index is named after `label` the same way attribute indexes are.
    pub fn computed<F>(label: &str, key_fn: F) -> Self
    where
        F: Fn(&Record) -> IndexKey + Send + Sync + 'static,
    {
        Self::from_key_fn(index_name(label), Arc::new(key_fn))
    }

    fn from_key_fn(name: String, key_fn: KeyFn) -> Self {
        Self {
            name,
            key_fn,
            kind: IndexKind::Grouped,
            ordering: OrderingPolicy::none(),
        }
    }

    /// Make this a unique index
    pub fn unique(self) -> Self {
        self.kind(IndexKind::Unique)
    }

    /// Set the index kind
    pub fn kind(mut self, kind: IndexKind) -> Self {
        self.kind = kind;
        self
    }

    /// Keep every group sorted by `ordering` (grouped indexes only)
    pub fn ordered_by(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Override the derived name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Index name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index kind
    pub fn index_kind(&self) -> IndexKind {
        self.kind
    }

    /// Ordering policy of the groups
    pub fn ordering(&self) -> &OrderingPolicy {
        &self.ordering
    }

    /// Key extraction function
    pub fn key_fn(&self) -> &KeyFn {
        &self.key_fn
    }
}

impl fmt::Debug for IndexDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexDefinition")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("ordering", &self.ordering)
            .finish()
    }
}

/// Definition of a whole store: its indexes and the order of its id list
#[derive(Debug, Clone, Default)]
pub struct StoreDefinition {
    indexes: Vec<IndexDefinition>,
    ordering: OrderingPolicy,
}

impl StoreDefinition {
    /// Store without index and without ordering
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an index
    pub fn with_index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    /// Keep the primary id list sorted by `ordering`
    pub fn ordered_by(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Index definitions in declaration order
    pub fn indexes(&self) -> &[IndexDefinition] {
        &self.indexes
    }

    /// Ordering of the primary id list
    pub fn ordering(&self) -> &OrderingPolicy {
        &self.ordering
    }

    pub(crate) fn into_parts(self) -> (Vec<IndexDefinition>, OrderingPolicy) {
        (self.indexes, self.ordering)
    }
}
