//! Grouped and unique index scenarios

use crate::common::*;
use normstore::{IndexDefinition, IndexKey, Record, RecordId, StoreDefinition, StoreError, Value};

#[test]
fn test_grouped_by_container() {
    let store = store(StoreDefinition::new().with_index(IndexDefinition::attribute("containerId")));
    let state = loaded(
        &store,
        vec![
            Record::with_id(1).with("containerId", 1),
            Record::with_id(2).with("containerId", 2),
            Record::with_id(3),
            Record::with_id(4).with("containerId", 1),
            Record::with_id(5).with("containerId", Value::Null),
        ],
    );
    let index = store.grouped_index("byContainerId").unwrap();
    assert_eq!(index.get(&state, &1.into()), ids(&[1, 4]).as_slice());
    assert_eq!(index.get(&state, &2.into()), ids(&[2]).as_slice());
    assert_eq!(index.get(&state, &IndexKey::Unset), ids(&[3, 5]).as_slice());
    assert_eq!(index.get(&state, &IndexKey::Unset), index.get_unset(&state));
}

#[test]
fn test_unique_key_change() {
    let store = store(
        StoreDefinition::new().with_index(IndexDefinition::attribute("containerId").unique()),
    );
    let state = loaded(
        &store,
        vec![
            Record::with_id(1).with("containerId", 10),
            Record::with_id(2).with("containerId", 20),
            Record::with_id(3).with("containerId", 30),
        ],
    );
    let state = store.update(&state, &RecordId::Int(1), values(&[("containerId", 40.into())]));

    let index = store.unique_index("byContainerId").unwrap();
    assert!(!index.exists(&state, &10.into()));
    assert_eq!(
        index.get(&state, &40.into()).map(|record| (**record).clone()),
        Some(Record::with_id(1).with("containerId", 40))
    );
}

#[test]
fn test_unique_collision_last_writer_wins() {
    let store = store(StoreDefinition::new().with_index(IndexDefinition::attribute("slug").unique()));
    let state = loaded(&store, vec![Record::with_id(1).with("slug", "a")]);
    let state = store
        .add(&state, &mut Record::with_id(2).with("slug", "a"))
        .unwrap();
    let index = store.unique_index("bySlug").unwrap();
    assert_eq!(index.get_id(&state, &"a".into()), Some(&RecordId::Int(2)));

    // Removing the loser leaves the winner mapped
    let state = store.remove(&state, &RecordId::Int(1));
    assert_eq!(index.get_id(&state, &"a".into()), Some(&RecordId::Int(2)));
}

#[test]
fn test_duplicate_add_fails_without_effect() {
    let store = store(StoreDefinition::new().with_index(IndexDefinition::attribute("containerId")));
    let state = store
        .add(&store.initialize(), &mut Record::with_id(10))
        .unwrap();
    let result = store.add(&state, &mut Record::with_id(10));
    assert_eq!(
        result.unwrap_err(),
        StoreError::DuplicateIdentifier {
            id: RecordId::Int(10)
        }
    );
    assert_eq!(state.ids(), ids(&[10]).as_slice());
    let index = store.grouped_index("byContainerId").unwrap();
    assert_eq!(index.get_unset(&state), ids(&[10]).as_slice());
}

#[test]
fn test_monotonic_ids() {
    let store = store(StoreDefinition::new());
    let state = loaded(&store, vec![Record::with_id(3), Record::with_id(7)]);
    let mut record = Record::new();
    store.add(&state, &mut record).unwrap();
    assert_eq!(record.id(), Some(&RecordId::Int(8)));
}

#[test]
fn test_float_keys_normalize() {
    let store = store(StoreDefinition::new().with_index(IndexDefinition::attribute("weight")));
    let state = loaded(
        &store,
        vec![
            Record::with_id(1).with("weight", 0.0),
            Record::with_id(2).with("weight", -0.0),
            Record::with_id(3).with("weight", f64::NAN),
            Record::with_id(4).with("weight", f64::NAN),
            Record::with_id(5).with("weight", vec![Value::Int(1)]),
        ],
    );
    let index = store.grouped_index("byWeight").unwrap();
    assert_eq!(index.get(&state, &0.0.into()), ids(&[1, 2]).as_slice());
    assert_eq!(index.get(&state, &f64::NAN.into()), ids(&[3, 4]).as_slice());
    assert_eq!(index.get_unset(&state), ids(&[5]).as_slice());
}

#[test]
fn test_integral_float_keys_group_with_ints() {
    let store = store(StoreDefinition::new().with_index(IndexDefinition::attribute("containerId")));
    let state = loaded(
        &store,
        vec![
            Record::with_id(1).with("containerId", 1),
            Record::with_id(2).with("containerId", 1.0),
            Record::with_id(3).with("containerId", 1.5),
        ],
    );
    let index = store.grouped_index("byContainerId").unwrap();
    assert_eq!(index.get(&state, &IndexKey::Int(1)), ids(&[1, 2]).as_slice());
    assert_eq!(index.get(&state, &1.5.into()), ids(&[3]).as_slice());
}
