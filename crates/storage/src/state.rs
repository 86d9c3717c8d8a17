//! StoreState: immutable snapshot of a normalized collection
//!
//! A state holds the primary store (id → record map plus ordered id list) and
//! one slice per configured index. Every component sits behind its own `Arc`
//! so that commands can share untouched parts with the state they were
//! derived from:
//!
//! ```text
//! StoreState ──Arc──► by_id    Arc<RecordMap>     (values: Arc<Record>)
//!                     all_ids  Arc<Vec<RecordId>>
//!                     indexes  [IndexSlice]       (each slice Arc'd)
//! ```
//!
//! Cloning a state is cheap and yields the *same* state: [`StoreState::ptr_eq`]
//! holds between a state and its clones. Commands that change nothing return
//! such a clone.

use std::fmt;
use std::sync::Arc;

use normstore_core::{Record, RecordId};
use rustc_hash::FxHashMap;

use crate::index::IndexSlice;

/// Primary map: id → record
pub type RecordMap = FxHashMap<RecordId, Arc<Record>>;

/// Immutable state of one normalized collection
#[derive(Clone)]
pub struct StoreState {
    inner: Arc<StateInner>,
}

struct StateInner {
    by_id: Arc<RecordMap>,
    all_ids: Arc<Vec<RecordId>>,
    indexes: Vec<IndexSlice>,
}

impl StoreState {
    pub(crate) fn from_parts(
        by_id: Arc<RecordMap>,
        all_ids: Arc<Vec<RecordId>>,
        indexes: Vec<IndexSlice>,
    ) -> Self {
        Self {
            inner: Arc::new(StateInner {
                by_id,
                all_ids,
                indexes,
            }),
        }
    }

    /// Whether `a` and `b` are the same state value (not merely equal)
    pub fn ptr_eq(a: &StoreState, b: &StoreState) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// The primary id → record map
    pub fn by_id(&self) -> &Arc<RecordMap> {
        &self.inner.by_id
    }

    /// The ordered id list
    pub fn all_ids(&self) -> &Arc<Vec<RecordId>> {
        &self.inner.all_ids
    }

    /// Every index slice, in index definition order
    pub fn index_slices(&self) -> &[IndexSlice] {
        &self.inner.indexes
    }

    /// The slice at `position`
    pub fn slice(&self, position: usize) -> Option<&IndexSlice> {
        self.inner.indexes.get(position)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Record stored under `id`
    pub fn get(&self, id: &RecordId) -> Option<&Arc<Record>> {
        self.inner.by_id.get(id)
    }

    /// Whether a record is stored under `id`
    pub fn contains(&self, id: &RecordId) -> bool {
        self.inner.by_id.contains_key(id)
    }

    /// Ids in collection order
    pub fn ids(&self) -> &[RecordId] {
        &self.inner.all_ids
    }

    /// Records in collection order
    pub fn all(&self) -> Vec<Arc<Record>> {
        self.inner
            .all_ids
            .iter()
            .filter_map(|id| self.inner.by_id.get(id).cloned())
            .collect()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.inner.all_ids.len()
    }

    /// Whether the collection holds no record
    pub fn is_empty(&self) -> bool {
        self.inner.all_ids.is_empty()
    }

    /// Largest integer id present, 0 when there is none
    ///
    /// String ids and negative integer ids never raise the result above 0.
    pub fn last_created_id(&self) -> i64 {
        self.inner
            .all_ids
            .iter()
            .filter_map(RecordId::as_int)
            .fold(0, i64::max)
    }

    /// Id `add` assigns to a record that comes without one
    ///
    /// Saturates at `i64::MAX`; `add` itself refuses to generate past it.
    pub fn next_id(&self) -> RecordId {
        RecordId::Int(self.last_created_id().saturating_add(1))
    }

    /// Record stored under [`last_created_id`](Self::last_created_id)
    pub fn last_created(&self) -> Option<&Arc<Record>> {
        self.get(&RecordId::Int(self.last_created_id()))
    }
}

impl fmt::Debug for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreState")
            .field("all_ids", &self.inner.all_ids)
            .field("by_id", &self.inner.by_id)
            .field("indexes", &self.inner.indexes)
            .finish()
    }
}
