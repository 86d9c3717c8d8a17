//! normstore - normalized in-memory collections with derived indexes
//!
//! A collection keeps every record once, in an id → record map plus an
//! ordered id list, and maintains unique and grouped indexes over it. States
//! are immutable: each command returns a new state that shares every
//! untouched part with the previous one.
//!
//! # Quick Start
//!
//! ```ignore
//! use normstore::{IndexDefinition, NormalizedStore, Record, StoreDefinition};
//!
//! let store = NormalizedStore::new(
//!     StoreDefinition::new().with_index(IndexDefinition::attribute("containerId")),
//! )?;
//! let state = store.initialize();
//! let state = store.add(&state, &mut Record::new().with("containerId", 4))?;
//! ```
//!
//! # Architecture
//!
//! - [`NormalizedStore`] and [`StoreState`] are the typed core.
//! - The [`Executor`] and [`Collection`] offer the same operations as
//!   serializable [`Command`]s and [`Query`]s.

pub use normstore_core::{
    Fields, IndexKey, Record, RecordId, StoreError, StoreResult, Value, ID_FIELD,
};
pub use normstore_executor::{
    Collection, Command, CommandKind, Error, Executor, Output, Query, Result,
};
pub use normstore_storage::{
    Group, GroupedIndex, Index, IndexConfig, IndexDefinition, IndexKind, IndexSlice,
    NormalizedStore, OrderConfig, OrderingPolicy, StoreConfig, StoreDefinition, StoreState,
    UniqueIndex, EMPTY_GROUP,
};
