//! Grouped index: key → ordered list of ids
//!
//! Within a group ids are kept in insertion order, or in the order of the
//! index's [`OrderingPolicy`] when one is configured (stable, so ties keep
//! insertion order). `to_front` always moves an id to the tail of its group,
//! ordering or not; the next order-relevant update sorts it back.
//!
//! Removing the last id of a group leaves an empty list under the key.
//! Looking up a key that was never grouped returns [`EMPTY_GROUP`].

use std::fmt;
use std::sync::Arc;

use normstore_core::{IndexKey, Record, RecordId};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::definition::{IndexDefinition, KeyFn};
use crate::ids::{move_to_end, remove_id};
use crate::ordering::OrderingPolicy;
use crate::state::{RecordMap, StoreState};

/// Ids of one group
pub type Group = Arc<Vec<RecordId>>;

/// Slice of a grouped index
pub type GroupedSlice = FxHashMap<IndexKey, Group>;

/// Group returned for every key that has none
pub static EMPTY_GROUP: Lazy<Group> = Lazy::new(|| Arc::new(Vec::new()));

/// Index mapping each key to the ordered ids of its records
pub struct GroupedIndex {
    name: String,
    position: usize,
    key_fn: KeyFn,
    ordering: OrderingPolicy,
}

impl GroupedIndex {
    pub(crate) fn new(definition: IndexDefinition, position: usize) -> Self {
        Self {
            name: definition.name().to_string(),
            position,
            key_fn: Arc::clone(definition.key_fn()),
            ordering: definition.ordering().clone(),
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

    /// Ordering policy of the groups
    pub fn ordering(&self) -> &OrderingPolicy {
        &self.ordering
    }

    /// Key of `record` under this index
    pub fn compute_key(&self, record: &Record) -> IndexKey {
        (self.key_fn)(record)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// This index's slice in `state`
    pub fn slice<'a>(&self, state: &'a StoreState) -> Option<&'a Arc<GroupedSlice>> {
        state.slice(self.position).and_then(|slice| slice.as_grouped())
    }

    /// Shared group of `key`, [`EMPTY_GROUP`] when there is none
    pub fn group<'a>(&self, state: &'a StoreState, key: &IndexKey) -> &'a Group {
        match self.slice(state).and_then(|slice| slice.get(key)) {
            Some(group) => group,
            None => &EMPTY_GROUP,
        }
    }

    /// Ids grouped under `key`
    ///
    /// Two calls on the same state return the same backing storage.
    pub fn get<'a>(&self, state: &'a StoreState, key: &IndexKey) -> &'a [RecordId] {
        self.group(state, key).as_slice()
    }

    /// Ids grouped under the unset key
    pub fn get_unset<'a>(&self, state: &'a StoreState) -> &'a [RecordId] {
        self.get(state, &IndexKey::Unset)
    }

    /// Keys present in the slice, including keys whose group is now empty
    pub fn keys<'a>(&self, state: &'a StoreState) -> Vec<&'a IndexKey> {
        self.slice(state)
            .map(|slice| slice.keys().collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // Slice transitions
    // ========================================================================

    pub(crate) fn load(&self, records: &RecordMap, all_ids: &[RecordId]) -> Arc<GroupedSlice> {
        let mut groups: FxHashMap<IndexKey, Vec<RecordId>> = FxHashMap::default();
        for id in all_ids {
            let Some(record) = records.get(id) else {
                continue;
            };
            groups
                .entry(self.compute_key(record))
                .or_default()
                .push(id.clone());
        }
        let slice = groups
            .into_iter()
            .map(|(key, mut ids)| {
                self.ordering.sort(records, &mut ids);
                (key, Arc::new(ids))
            })
            .collect();
        Arc::new(slice)
    }

    pub(crate) fn add(
        &self,
        slice: &Arc<GroupedSlice>,
        records: &RecordMap,
        record: &Record,
    ) -> Arc<GroupedSlice> {
        let Some(id) = record.id() else {
            return Arc::clone(slice);
        };
        let key = self.compute_key(record);
        let mut ids = group_of(slice, &key).to_vec();
        ids.push(id.clone());
        self.ordering.sort(records, &mut ids);

        let mut next = (**slice).clone();
        next.insert(key, Arc::new(ids));
        Arc::new(next)
    }

    pub(crate) fn remove(&self, slice: &Arc<GroupedSlice>, record: &Record) -> Arc<GroupedSlice> {
        let Some(id) = record.id() else {
            return Arc::clone(slice);
        };
        let key = self.compute_key(record);
        let mut ids = group_of(slice, &key).to_vec();
        if remove_id(&mut ids, id).is_none() {
            return Arc::clone(slice);
        }
        let mut next = (**slice).clone();
        next.insert(key, Arc::new(ids));
        Arc::new(next)
    }

    pub(crate) fn update(
        &self,
        slice: &Arc<GroupedSlice>,
        records: &RecordMap,
        old: &Record,
        new: &Record,
    ) -> Arc<GroupedSlice> {
        let Some(id) = new.id() else {
            return Arc::clone(slice);
        };
        let old_key = self.compute_key(old);
        let new_key = self.compute_key(new);

        if old_key != new_key {
            let mut next = (**slice).clone();
            if slice.contains_key(&old_key) {
                let mut old_ids = group_of(slice, &old_key).to_vec();
                remove_id(&mut old_ids, id);
                next.insert(old_key.clone(), Arc::new(old_ids));
            }
            let mut new_ids = group_of(slice, &new_key).to_vec();
            new_ids.push(id.clone());
            self.ordering.sort(records, &mut new_ids);
            trace!(index = %self.name, id = %id, from = %old_key, to = %new_key, "regrouped");
            next.insert(new_key, Arc::new(new_ids));
            return Arc::new(next);
        }

        if self.ordering.is_needed(old, new) {
            let mut ids = group_of(slice, &new_key).to_vec();
            self.ordering.sort(records, &mut ids);
            trace!(index = %self.name, id = %id, key = %new_key, "group re-sorted");
            let mut next = (**slice).clone();
            next.insert(new_key, Arc::new(ids));
            return Arc::new(next);
        }

        Arc::clone(slice)
    }

    pub(crate) fn to_front(&self, slice: &Arc<GroupedSlice>, record: &Record) -> Arc<GroupedSlice> {
        let Some(id) = record.id() else {
            return Arc::clone(slice);
        };
        let key = self.compute_key(record);
        let group = group_of(slice, &key);
        if group.last() == Some(id) {
            return Arc::clone(slice);
        }
        let mut ids = group.to_vec();
        if move_to_end(&mut ids, id).is_none() {
            return Arc::clone(slice);
        }
        let mut next = (**slice).clone();
        next.insert(key, Arc::new(ids));
        Arc::new(next)
    }
}

fn group_of<'a>(slice: &'a GroupedSlice, key: &IndexKey) -> &'a [RecordId] {
    slice.get(key).map(|group| group.as_slice()).unwrap_or(&[])
}

impl fmt::Debug for GroupedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedIndex")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("ordering", &self.ordering)
            .finish()
    }
}
