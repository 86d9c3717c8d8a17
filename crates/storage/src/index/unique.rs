//! Unique index: key → id
//!
//! At most one id per key. When two records compute the same key the last
//! one written wins, on `load` as on `add`; the collision is logged, not
//! rejected.

use std::fmt;
use std::sync::Arc;

use normstore_core::{IndexKey, Record, RecordId};
use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::definition::{IndexDefinition, KeyFn};
use crate::state::{RecordMap, StoreState};

/// Slice of a unique index
pub type UniqueSlice = FxHashMap<IndexKey, RecordId>;

/// Index mapping each key to a single record
pub struct UniqueIndex {
    name: String,
    position: usize,
    key_fn: KeyFn,
}

impl UniqueIndex {
    pub(crate) fn new(definition: IndexDefinition, position: usize) -> Self {
        if definition.ordering().is_present() {
            trace!(index = definition.name(), "ordering ignored on unique index");
        }
        Self {
            name: definition.name().to_string(),
            position,
            key_fn: Arc::clone(definition.key_fn()),
        }
    }

    /// Index name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of this index's slice in a state
    pub fn position(&self) -> usize {
        self.position
    }

    /// Key of `record` under this index
    pub fn compute_key(&self, record: &Record) -> IndexKey {
        (self.key_fn)(record)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// This index's slice in `state`
    pub fn slice<'a>(&self, state: &'a StoreState) -> Option<&'a Arc<UniqueSlice>> {
        state.slice(self.position).and_then(|slice| slice.as_unique())
    }

    /// Id mapped to `key`
    pub fn get_id<'a>(&self, state: &'a StoreState, key: &IndexKey) -> Option<&'a RecordId> {
        self.slice(state).and_then(|slice| slice.get(key))
    }

    /// Record whose key is `key`
    pub fn get<'a>(&self, state: &'a StoreState, key: &IndexKey) -> Option<&'a Arc<Record>> {
        self.get_id(state, key).and_then(|id| state.get(id))
    }

    /// Whether `key` is mapped
    ///
    /// Presence in the slice is authoritative: this does not check that the
    /// mapped id still resolves to a record.
    pub fn exists(&self, state: &StoreState, key: &IndexKey) -> bool {
        self.get_id(state, key).is_some()
    }

    // ========================================================================
    // Slice transitions
    // ========================================================================

    pub(crate) fn load(&self, records: &RecordMap, all_ids: &[RecordId]) -> Arc<UniqueSlice> {
        let mut slice = UniqueSlice::with_capacity_and_hasher(all_ids.len(), Default::default());
        for id in all_ids {
            let Some(record) = records.get(id) else {
                continue;
            };
            if let Some(previous) = slice.insert(self.compute_key(record), id.clone()) {
                warn!(index = %self.name, id = %id, previous = %previous, "unique key collision, last writer wins");
            }
        }
        Arc::new(slice)
    }

    pub(crate) fn add(&self, slice: &Arc<UniqueSlice>, record: &Record) -> Arc<UniqueSlice> {
        let Some(id) = record.id() else {
            return Arc::clone(slice);
        };
        let key = self.compute_key(record);
        let mut next = (**slice).clone();
        if let Some(previous) = next.insert(key, id.clone()) {
            if &previous != id {
                warn!(index = %self.name, id = %id, previous = %previous, "unique key collision, last writer wins");
            }
        }
        Arc::new(next)
    }

    pub(crate) fn remove(&self, slice: &Arc<UniqueSlice>, record: &Record) -> Arc<UniqueSlice> {
        let key = self.compute_key(record);
        if record.id().is_none() || slice.get(&key) != record.id() {
            return Arc::clone(slice);
        }
        let mut next = (**slice).clone();
        next.remove(&key);
        trace!(index = %self.name, key = %key, "unique entry removed");
        Arc::new(next)
    }

    pub(crate) fn update(
        &self,
        slice: &Arc<UniqueSlice>,
        old: &Record,
        new: &Record,
    ) -> Arc<UniqueSlice> {
        let old_key = self.compute_key(old);
        let new_key = self.compute_key(new);
        let Some(id) = new.id() else {
            return Arc::clone(slice);
        };
        if old_key == new_key {
            return Arc::clone(slice);
        }
        let mut next = (**slice).clone();
        if next.get(&old_key) == Some(id) {
            next.remove(&old_key);
        }
        if let Some(previous) = next.insert(new_key.clone(), id.clone()) {
            if &previous != id {
                warn!(index = %self.name, id = %id, previous = %previous, "unique key collision, last writer wins");
            }
        }
        trace!(index = %self.name, from = %old_key, to = %new_key, "unique entry rekeyed");
        Arc::new(next)
    }
}

impl fmt::Debug for UniqueIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueIndex")
            .field("name", &self.name)
            .field("position", &self.position)
            .finish()
    }
}
