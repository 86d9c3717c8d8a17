//! NormalizedStore: the command and query surface of a collection
//!
//! A `NormalizedStore` holds the configuration of one collection (its
//! indexes and the optional ordering of the id list) and turns a
//! [`StoreState`] plus a command into the next state. It never owns a state
//! itself; callers keep the state and pass it back in.
//!
//! Every command copies only what it changes:
//!
//! - untouched records keep their `Arc<Record>`
//! - `all_ids` keeps its `Arc` unless the list itself changed
//! - each index slice keeps its `Arc` unless that index's data changed
//! - a command that changes nothing returns a clone of the input state, for
//!   which [`StoreState::ptr_eq`] holds

use std::collections::HashSet;
use std::sync::Arc;

use normstore_core::{
    Fields, Record, RecordId, StoreError, StoreResult, ID_FIELD,
};
use tracing::{debug, info, trace, warn};

use crate::config::StoreConfig;
use crate::definition::StoreDefinition;
use crate::ids::{move_to_end, remove_id};
use crate::index::{GroupedIndex, Index, IndexSlice, UniqueIndex};
use crate::ordering::OrderingPolicy;
use crate::state::{RecordMap, StoreState};

/// Configured collection: indexes plus ordering of the id list
#[derive(Debug)]
pub struct NormalizedStore {
    indexes: Vec<Index>,
    ordering: OrderingPolicy,
}

impl NormalizedStore {
    /// Build a store from its definition
    ///
    /// # Errors
    ///
    /// `InvalidDefinition` when two indexes share a name.
    pub fn new(definition: StoreDefinition) -> StoreResult<Self> {
        let (definitions, ordering) = definition.into_parts();

        let mut names = HashSet::new();
        for definition in &definitions {
            if !names.insert(definition.name().to_string()) {
                return Err(StoreError::InvalidDefinition(format!(
                    "index '{}' is defined twice",
                    definition.name()
                )));
            }
        }

        let indexes: Vec<Index> = definitions
            .into_iter()
            .enumerate()
            .map(|(position, definition)| Index::from_definition(definition, position))
            .collect();

        info!(
            indexes = indexes.len(),
            ordered = ordering.is_present(),
            "normalized store built"
        );

        Ok(Self { indexes, ordering })
    }

    /// Build a store from a declarative configuration
    pub fn from_config(config: StoreConfig) -> StoreResult<Self> {
        Self::new(config.into_definition()?)
    }

    /// Configured indexes in definition order
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Index named `name`
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|index| index.name() == name)
    }

    /// Unique index named `name`
    pub fn unique_index(&self, name: &str) -> Option<&UniqueIndex> {
        self.index(name).and_then(Index::as_unique)
    }

    /// Grouped index named `name`
    pub fn grouped_index(&self, name: &str) -> Option<&GroupedIndex> {
        self.index(name).and_then(Index::as_grouped)
    }

    /// Ordering of the id list
    pub fn ordering(&self) -> &OrderingPolicy {
        &self.ordering
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Empty state with one empty slice per index
    pub fn initialize(&self) -> StoreState {
        StoreState::from_parts(
            Arc::new(RecordMap::default()),
            Arc::new(Vec::new()),
            self.indexes.iter().map(Index::initialize).collect(),
        )
    }

    /// Replace the whole content of `state` by `records`
    ///
    /// Ids keep input order unless an ordering is configured. An empty input
    /// returns `state` itself.
    ///
    /// # Errors
    ///
    /// `MissingIdentifier` or `DuplicateIdentifier` when a record has no id
    /// or repeats one; nothing is built in that case.
    pub fn bulk_load(
        &self,
        state: &StoreState,
        records: impl IntoIterator<Item = Record>,
    ) -> StoreResult<StoreState> {
        let records: Vec<Record> = records.into_iter().collect();
        if records.is_empty() {
            debug!("bulk load without records, state unchanged");
            return Ok(state.clone());
        }

        let mut by_id = RecordMap::with_capacity_and_hasher(records.len(), Default::default());
        let mut all_ids = Vec::with_capacity(records.len());
        for record in records {
            let Some(id) = record.id().cloned() else {
                return Err(StoreError::MissingIdentifier);
            };
            if by_id.contains_key(&id) {
                warn!(id = %id, "bulk load rejected, duplicate id in batch");
                return Err(StoreError::DuplicateIdentifier { id });
            }
            all_ids.push(id.clone());
            by_id.insert(id, Arc::new(record));
        }
        self.ordering.sort(&by_id, &mut all_ids);

        let indexes = self
            .indexes
            .iter()
            .map(|index| index.load(&by_id, &all_ids))
            .collect();

        debug!(records = all_ids.len(), "bulk load");
        Ok(StoreState::from_parts(
            Arc::new(by_id),
            Arc::new(all_ids),
            indexes,
        ))
    }

    /// Add one record
    ///
    /// A record without id gets [`StoreState::next_id`]; the id is written
    /// back into `record` only when the command succeeds.
    ///
    /// # Errors
    ///
    /// `DuplicateIdentifier` when the id is already stored,
    /// `IdentifierSpaceExhausted` when no integer id is left to generate.
    pub fn add(&self, state: &StoreState, record: &mut Record) -> StoreResult<StoreState> {
        let id = match record.id() {
            Some(id) => {
                if state.contains(id) {
                    warn!(id = %id, "add rejected, duplicate id");
                    return Err(StoreError::DuplicateIdentifier { id: id.clone() });
                }
                id.clone()
            }
            None => {
                let last = state.last_created_id();
                let next = last
                    .checked_add(1)
                    .ok_or(StoreError::IdentifierSpaceExhausted { last })?;
                RecordId::Int(next)
            }
        };

        let mut stored = record.clone();
        stored.set_id(id.clone());
        let stored = Arc::new(stored);

        let mut by_id = (**state.by_id()).clone();
        by_id.insert(id.clone(), Arc::clone(&stored));
        let mut all_ids = (**state.all_ids()).clone();
        all_ids.push(id.clone());
        self.ordering.sort(&by_id, &mut all_ids);

        let indexes = self.rewrite_indexes(state, &by_id, &all_ids, |index, slice| {
            index.add(slice, &by_id, &stored)
        });

        debug!(id = %id, records = all_ids.len(), "add");
        record.set_id(id);
        Ok(StoreState::from_parts(
            Arc::new(by_id),
            Arc::new(all_ids),
            indexes,
        ))
    }

    /// Remove the record stored under `id`
    pub fn remove(&self, state: &StoreState, id: &RecordId) -> StoreState {
        let Some(old) = state.get(id).cloned() else {
            debug!(id = %id, "remove of unknown id, state unchanged");
            return state.clone();
        };

        let mut by_id = (**state.by_id()).clone();
        by_id.remove(id);
        let mut all_ids = (**state.all_ids()).clone();
        remove_id(&mut all_ids, id);

        let indexes = self.rewrite_indexes(state, &by_id, &all_ids, |index, slice| {
            index.remove(slice, &old)
        });

        debug!(id = %id, records = all_ids.len(), "remove");
        StoreState::from_parts(Arc::new(by_id), Arc::new(all_ids), indexes)
    }

    /// Shallow-merge `values` onto the record stored under `id`
    ///
    /// An `"id"` entry in `values` is ignored.
    pub fn update(&self, state: &StoreState, id: &RecordId, values: Fields) -> StoreState {
        let Some(old) = state.get(id) else {
            debug!(id = %id, "update of unknown id, state unchanged");
            return state.clone();
        };
        if values.contains_key(ID_FIELD) {
            debug!(id = %id, "id entry in update values ignored");
        }
        let merged = old.merged(&values);
        self.replace_stored(state, id, merged)
    }

    /// Replace the record stored under `record`'s id
    ///
    /// # Errors
    ///
    /// `MissingIdentifier` when `record` has no id. An id that is not stored
    /// is not an error: the state is returned unchanged.
    pub fn replace(&self, state: &StoreState, record: Record) -> StoreResult<StoreState> {
        let Some(id) = record.id().cloned() else {
            return Err(StoreError::MissingIdentifier);
        };
        if !state.contains(&id) {
            debug!(id = %id, "replace of unknown id, state unchanged");
            return Ok(state.clone());
        }
        Ok(self.replace_stored(state, &id, record))
    }

    /// Move `id` to the tail of the id list and of its groups
    pub fn reorder_to_end(&self, state: &StoreState, id: &RecordId) -> StoreState {
        let Some(record) = state.get(id).cloned() else {
            debug!(id = %id, "reorder of unknown id, state unchanged");
            return state.clone();
        };

        let all_ids = if state.all_ids().last() == Some(id) {
            Arc::clone(state.all_ids())
        } else {
            let mut ids = (**state.all_ids()).clone();
            move_to_end(&mut ids, id);
            Arc::new(ids)
        };

        let by_id = state.by_id();
        let indexes = self.rewrite_indexes(state, by_id, &all_ids, |index, slice| {
            index.to_front(slice, &record)
        });

        debug!(id = %id, records = all_ids.len(), "reorder to end");
        StoreState::from_parts(Arc::clone(by_id), all_ids, indexes)
    }

    fn replace_stored(&self, state: &StoreState, id: &RecordId, record: Record) -> StoreState {
        let Some(old) = state.get(id).cloned() else {
            return state.clone();
        };
        let new = Arc::new(record);

        let mut by_id = (**state.by_id()).clone();
        by_id.insert(id.clone(), Arc::clone(&new));

        let all_ids = if self.ordering.is_needed(&old, &new) {
            let mut ids = (**state.all_ids()).clone();
            self.ordering.sort(&by_id, &mut ids);
            Arc::new(ids)
        } else {
            Arc::clone(state.all_ids())
        };

        let indexes = self.rewrite_indexes(state, &by_id, &all_ids, |index, slice| {
            index.update(slice, &by_id, &old, &new)
        });

        debug!(id = %id, records = all_ids.len(), "replace");
        StoreState::from_parts(Arc::new(by_id), all_ids, indexes)
    }

    /// Apply `rewrite` to every index slice of `state`
    ///
    /// A slice that is missing or of the wrong kind is rebuilt from `by_id`
    /// and `all_ids`, which already describe the next state.
    fn rewrite_indexes<F>(
        &self,
        state: &StoreState,
        by_id: &RecordMap,
        all_ids: &[RecordId],
        rewrite: F,
    ) -> Vec<IndexSlice>
    where
        F: Fn(&Index, &IndexSlice) -> IndexSlice,
    {
        self.indexes
            .iter()
            .map(|index| match index.slice(state) {
                Some(slice) => {
                    let next = rewrite(index, slice);
                    if !next.ptr_eq(slice) {
                        trace!(index = index.name(), "slice rewritten");
                    }
                    next
                }
                None => {
                    warn!(index = index.name(), "state lacks slice for index, rebuilding");
                    index.load(by_id, all_ids)
                }
            })
            .collect()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Record stored under `id`
    pub fn get_by_id<'a>(&self, state: &'a StoreState, id: &RecordId) -> Option<&'a Arc<Record>> {
        state.get(id)
    }

    /// Ids in collection order
    pub fn get_all_ids<'a>(&self, state: &'a StoreState) -> &'a [RecordId] {
        state.ids()
    }

    /// Records in collection order
    pub fn get_all(&self, state: &StoreState) -> Vec<Arc<Record>> {
        state.all()
    }

    /// Whether `state` holds no record
    pub fn is_empty(&self, state: &StoreState) -> bool {
        state.is_empty()
    }

    /// Largest integer id in `state`, 0 when there is none
    pub fn last_created_id(&self, state: &StoreState) -> i64 {
        state.last_created_id()
    }

    /// Id the next `add` without id assigns
    pub fn next_id(&self, state: &StoreState) -> RecordId {
        state.next_id()
    }

    /// Record stored under the largest integer id
    pub fn last_created<'a>(&self, state: &'a StoreState) -> Option<&'a Arc<Record>> {
        state.last_created()
    }
}
