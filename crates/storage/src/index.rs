//! Secondary indexes over a normalized collection
//!
//! This module provides the two index variants a store can maintain:
//! - UniqueIndex: Maps key → id, at most one id per key
//! - GroupedIndex: Maps key → ordered list of ids
//!
//! Indexes are caches: every slice can be rebuilt from the primary store
//! with `load`. The incremental operations (`add`, `remove`, `update`,
//! `to_front`) take the slice of the previous state and return the slice of
//! the next one, reusing the previous `Arc` whenever their own data did not
//! change.

pub mod grouped;
pub mod unique;

use std::sync::Arc;

use normstore_core::{Record, RecordId};

use crate::definition::{IndexDefinition, IndexKind};
use crate::state::{RecordMap, StoreState};

pub use grouped::{Group, GroupedIndex, GroupedSlice};
pub use unique::{UniqueIndex, UniqueSlice};

/// The part of a state owned by one index
#[derive(Debug, Clone)]
pub enum IndexSlice {
    /// Slice of a unique index
    Unique(Arc<UniqueSlice>),
    /// Slice of a grouped index
    Grouped(Arc<GroupedSlice>),
}

impl IndexSlice {
    /// Whether both slices are the same allocation
    pub fn ptr_eq(&self, other: &IndexSlice) -> bool {
        match (self, other) {
            (IndexSlice::Unique(a), IndexSlice::Unique(b)) => Arc::ptr_eq(a, b),
            (IndexSlice::Grouped(a), IndexSlice::Grouped(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Kind of index owning this slice
    pub fn kind(&self) -> IndexKind {
        match self {
            IndexSlice::Unique(_) => IndexKind::Unique,
            IndexSlice::Grouped(_) => IndexKind::Grouped,
        }
    }

    /// Get the unique map if this is a unique slice
    pub fn as_unique(&self) -> Option<&Arc<UniqueSlice>> {
        match self {
            IndexSlice::Unique(slice) => Some(slice),
            IndexSlice::Grouped(_) => None,
        }
    }

    /// Get the grouped map if this is a grouped slice
    pub fn as_grouped(&self) -> Option<&Arc<GroupedSlice>> {
        match self {
            IndexSlice::Grouped(slice) => Some(slice),
            IndexSlice::Unique(_) => None,
        }
    }
}

/// One configured index
///
/// The variant is chosen from the definition when the store is built and
/// never changes afterwards.
#[derive(Debug)]
pub enum Index {
    /// Key → id
    Unique(UniqueIndex),
    /// Key → ordered ids
    Grouped(GroupedIndex),
}

impl Index {
    /// Build the index stored at `position` of every state's slice list
    pub fn from_definition(definition: IndexDefinition, position: usize) -> Self {
        match definition.index_kind() {
            IndexKind::Unique => Index::Unique(UniqueIndex::new(definition, position)),
            IndexKind::Grouped => Index::Grouped(GroupedIndex::new(definition, position)),
        }
    }

    /// Index name
    pub fn name(&self) -> &str {
        match self {
            Index::Unique(index) => index.name(),
            Index::Grouped(index) => index.name(),
        }
    }

    /// Index kind
    pub fn kind(&self) -> IndexKind {
        match self {
            Index::Unique(_) => IndexKind::Unique,
            Index::Grouped(_) => IndexKind::Grouped,
        }
    }

    /// Position of this index's slice in a state
    pub fn position(&self) -> usize {
        match self {
            Index::Unique(index) => index.position(),
            Index::Grouped(index) => index.position(),
        }
    }

    /// Get the unique index if this is one
    pub fn as_unique(&self) -> Option<&UniqueIndex> {
        match self {
            Index::Unique(index) => Some(index),
            Index::Grouped(_) => None,
        }
    }

    /// Get the grouped index if this is one
    pub fn as_grouped(&self) -> Option<&GroupedIndex> {
        match self {
            Index::Grouped(index) => Some(index),
            Index::Unique(_) => None,
        }
    }

    /// This index's slice in `state`, if it has the expected kind
    pub fn slice<'a>(&self, state: &'a StoreState) -> Option<&'a IndexSlice> {
        state
            .slice(self.position())
            .filter(|slice| slice.kind() == self.kind())
    }

    /// Empty slice
    pub fn initialize(&self) -> IndexSlice {
        match self {
            Index::Unique(_) => IndexSlice::Unique(Arc::new(UniqueSlice::default())),
            Index::Grouped(_) => IndexSlice::Grouped(Arc::new(GroupedSlice::default())),
        }
    }

    /// Slice rebuilt from scratch out of the primary store
    pub fn load(&self, records: &RecordMap, all_ids: &[RecordId]) -> IndexSlice {
        match self {
            Index::Unique(index) => IndexSlice::Unique(index.load(records, all_ids)),
            Index::Grouped(index) => IndexSlice::Grouped(index.load(records, all_ids)),
        }
    }

    /// Slice after `record` was added; `records` already contains it
    pub fn add(&self, slice: &IndexSlice, records: &RecordMap, record: &Record) -> IndexSlice {
        match (self, slice) {
            (Index::Unique(index), IndexSlice::Unique(s)) => {
                IndexSlice::Unique(index.add(s, record))
            }
            (Index::Grouped(index), IndexSlice::Grouped(s)) => {
                IndexSlice::Grouped(index.add(s, records, record))
            }
            _ => slice.clone(),
        }
    }

    /// Slice after `record` was removed
    pub fn remove(&self, slice: &IndexSlice, record: &Record) -> IndexSlice {
        match (self, slice) {
            (Index::Unique(index), IndexSlice::Unique(s)) => {
                IndexSlice::Unique(index.remove(s, record))
            }
            (Index::Grouped(index), IndexSlice::Grouped(s)) => {
                IndexSlice::Grouped(index.remove(s, record))
            }
            _ => slice.clone(),
        }
    }

    /// Slice after `old` was replaced by `new`; `records` already holds `new`
    pub fn update(
        &self,
        slice: &IndexSlice,
        records: &RecordMap,
        old: &Record,
        new: &Record,
    ) -> IndexSlice {
        match (self, slice) {
            (Index::Unique(index), IndexSlice::Unique(s)) => {
                IndexSlice::Unique(index.update(s, old, new))
            }
            (Index::Grouped(index), IndexSlice::Grouped(s)) => {
                IndexSlice::Grouped(index.update(s, records, old, new))
            }
            _ => slice.clone(),
        }
    }

    /// Slice after `record` was moved to the end of the collection
    pub fn to_front(&self, slice: &IndexSlice, record: &Record) -> IndexSlice {
        match (self, slice) {
            (Index::Grouped(index), IndexSlice::Grouped(s)) => {
                IndexSlice::Grouped(index.to_front(s, record))
            }
            _ => slice.clone(),
        }
    }
}
