//! Structural sharing between consecutive states

use std::sync::Arc;

use crate::common::*;
use normstore::{IndexDefinition, Record, RecordId, StoreDefinition, StoreState};

fn indexed() -> normstore::NormalizedStore {
    store(
        StoreDefinition::new()
            .with_index(IndexDefinition::attribute("containerId"))
            .with_index(IndexDefinition::attribute("slug").unique()),
    )
}

#[test]
fn test_unindexed_update_shares_all_but_one_record() {
    let store = indexed();
    let state = loaded(
        &store,
        vec![
            Record::with_id(1).with("containerId", 1).with("slug", "a"),
            Record::with_id(2).with("containerId", 2).with("slug", "b"),
        ],
    );
    let next = store.update(&state, &RecordId::Int(1), values(&[("value", true.into())]));

    assert!(!StoreState::ptr_eq(&state, &next));
    assert!(Arc::ptr_eq(state.all_ids(), next.all_ids()));
    for (before, after) in state.index_slices().iter().zip(next.index_slices()) {
        assert!(before.ptr_eq(after));
    }
    assert!(Arc::ptr_eq(
        state.get(&RecordId::Int(2)).unwrap(),
        next.get(&RecordId::Int(2)).unwrap()
    ));
}

#[test]
fn test_noops_return_same_state() {
    let store = indexed();
    let state = loaded(&store, vec![Record::with_id(1)]);
    let missing = RecordId::Int(42);

    assert!(StoreState::ptr_eq(&state, &store.remove(&state, &missing)));
    assert!(StoreState::ptr_eq(
        &state,
        &store.update(&state, &missing, values(&[("a", 1.into())]))
    ));
    assert!(StoreState::ptr_eq(
        &state,
        &store.replace(&state, Record::with_id(42)).unwrap()
    ));
    assert!(StoreState::ptr_eq(&state, &store.reorder_to_end(&state, &missing)));
    assert!(StoreState::ptr_eq(&state, &store.bulk_load(&state, Vec::new()).unwrap()));
}

#[test]
fn test_all_ids_same_storage_between_calls() {
    let store = indexed();
    let state = loaded(&store, vec![Record::with_id(1), Record::with_id(2)]);
    assert!(std::ptr::eq(store.get_all_ids(&state), store.get_all_ids(&state)));
}

#[test]
fn test_grouped_to_front_shares_other_groups() {
    let store = indexed();
    let state = loaded(
        &store,
        vec![
            Record::with_id(1).with("containerId", 1),
            Record::with_id(2).with("containerId", 2),
            Record::with_id(4).with("containerId", 1),
        ],
    );
    let next = store.reorder_to_end(&state, &RecordId::Int(1));
    let index = store.grouped_index("byContainerId").unwrap();
    assert_eq!(index.get(&next, &1.into()), ids(&[4, 1]).as_slice());
    assert!(Arc::ptr_eq(
        index.group(&state, &2.into()),
        index.group(&next, &2.into())
    ));
}
