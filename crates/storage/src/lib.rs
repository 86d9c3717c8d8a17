//! Storage layer for normstore
//!
//! This crate implements the normalized collection and its indexes:
//! - StoreState: immutable snapshot (id → record map, ordered ids, slices)
//! - NormalizedStore: commands and queries over a state
//! - UniqueIndex / GroupedIndex: key → id and key → ordered ids
//! - OrderingPolicy: optional order of the id list and of each group
//! - StoreConfig: TOML form of a store definition
//!
//! # Structural sharing
//!
//! States are never mutated. A command returns a new state that reuses,
//! through `Arc`, every record, list and index slice it did not change.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod definition;
pub mod ids;
pub mod index;
pub mod normalized;
pub mod ordering;
pub mod state;

pub use config::{IndexConfig, OrderConfig, StoreConfig};
pub use definition::{index_name, IndexDefinition, IndexKind, KeyFn, StoreDefinition};
pub use index::grouped::EMPTY_GROUP;
pub use index::{
    Group, GroupedIndex, GroupedSlice, Index, IndexSlice, UniqueIndex, UniqueSlice,
};
pub use normalized::NormalizedStore;
pub use ordering::{Comparator, OrderingPolicy};
pub use state::{RecordMap, StoreState};
