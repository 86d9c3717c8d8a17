//! Global ordering and reordering scenarios

use std::cmp::Ordering;

use crate::common::*;
use normstore::{NormalizedStore, OrderingPolicy, Record, RecordId, StoreDefinition, StoreState, Value};
use proptest::prelude::*;

fn by_name() -> StoreDefinition {
    StoreDefinition::new().ordered_by(OrderingPolicy::by_field("name"))
}

#[test]
fn test_load_sorted_by_name() {
    let store = store(by_name());
    let state = loaded(
        &store,
        vec![
            Record::with_id(1).with("name", "W"),
            Record::with_id(2).with("name", "A"),
            Record::with_id(3).with("name", "D"),
            Record::with_id(4).with("name", "H"),
        ],
    );
    assert_eq!(store.get_all_ids(&state), ids(&[2, 3, 4, 1]).as_slice());
}

#[test]
fn test_add_replace_remove_keep_order() {
    let store = store(by_name());
    let state = loaded(
        &store,
        vec![
            Record::with_id(1).with("name", "A"),
            Record::with_id(2).with("name", "W"),
        ],
    );
    let state = store
        .add(&state, &mut Record::new().with("name", "C"))
        .unwrap();
    assert_eq!(store.get_all_ids(&state), ids(&[1, 3, 2]).as_slice());

    let state = store
        .replace(&state, Record::with_id(1).with("name", "Z"))
        .unwrap();
    assert_eq!(store.get_all_ids(&state), ids(&[3, 2, 1]).as_slice());

    let state = store.remove(&state, &RecordId::Int(2));
    assert_eq!(store.get_all_ids(&state), ids(&[3, 1]).as_slice());
}

#[test]
fn test_reorder_to_end() {
    let store = store(StoreDefinition::new());
    let state = loaded(&store, (1..=4).map(Record::with_id).collect());
    let state = store.reorder_to_end(&state, &RecordId::Int(1));
    assert_eq!(store.get_all_ids(&state), ids(&[2, 3, 4, 1]).as_slice());
    let state = store.reorder_to_end(&state, &RecordId::Int(3));
    assert_eq!(store.get_all_ids(&state), ids(&[2, 4, 1, 3]).as_slice());
}

#[test]
fn test_descending_order() {
    let store = store(StoreDefinition::new().ordered_by(OrderingPolicy::by_field_desc("rank")));
    let state = loaded(
        &store,
        vec![
            Record::with_id(1).with("rank", 2),
            Record::with_id(2).with("rank", 9),
            Record::with_id(3).with("rank", 5),
        ],
    );
    assert_eq!(store.get_all_ids(&state), ids(&[2, 3, 1]).as_slice());
}

// ============================================================================
// Mixed numeric fields
// ============================================================================

fn by_v() -> StoreDefinition {
    StoreDefinition::new().ordered_by(OrderingPolicy::by_field("v"))
}

fn v_values(store: &NormalizedStore, state: &StoreState) -> Vec<Value> {
    store
        .get_all(state)
        .iter()
        .map(|record| record.get("v").cloned().unwrap_or(Value::Null))
        .collect()
}

fn assert_sorted(values: &[Value]) -> Result<(), TestCaseError> {
    for pair in values.windows(2) {
        prop_assert_ne!(pair[0].total_cmp(&pair[1]), Ordering::Greater, "{:?}", pair);
    }
    let ints: Vec<i64> = values.iter().filter_map(Value::as_int).collect();
    prop_assert!(ints.windows(2).all(|w| w[0] <= w[1]), "ints out of order: {:?}", ints);
    Ok(())
}

#[test]
fn test_nan_values_sort_after_numbers() {
    let store = store(by_v());
    let records = (1..=200i64).map(|id| {
        let v = if id % 7 == 0 {
            Value::Float(f64::NAN)
        } else {
            Value::Int((id * 7919) % 1009 - 500)
        };
        Record::with_id(id).with("v", v)
    });
    let state = loaded(&store, records.collect());
    let values = v_values(&store, &state);

    assert_sorted(&values).unwrap();
    let nan_count = values
        .iter()
        .filter(|v| v.as_float().is_some_and(f64::is_nan))
        .count();
    assert_eq!(nan_count, 28);
    assert!(values[200 - nan_count..]
        .iter()
        .all(|v| v.as_float().is_some_and(f64::is_nan)));
}

#[test]
fn test_change_to_nan_resorts() {
    let store = store(by_v());
    let state = loaded(
        &store,
        vec![
            Record::with_id(1).with("v", 1),
            Record::with_id(2).with("v", 2),
        ],
    );
    let state = store.update(&state, &RecordId::Int(1), values(&[("v", f64::NAN.into())]));
    assert_eq!(store.get_all_ids(&state), ids(&[2, 1]).as_slice());
}

fn arb_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1000i64..1000).prop_map(Value::Int),
        (-1000.0f64..1000.0).prop_map(Value::Float),
        Just(Value::Float(f64::NAN)),
        Just(Value::Float(-0.0)),
        Just(Value::Int(9_007_199_254_740_993)),
        Just(Value::Float(9_007_199_254_740_992.0)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: mixed ints, floats and NaN stay ordered through loads and adds.
    #[test]
    fn prop_mixed_numbers_stay_sorted(
        initial in prop::collection::vec(arb_number(), 0..40),
        added in prop::collection::vec(arb_number(), 0..10),
    ) {
        let store = store(by_v());
        let records = initial
            .into_iter()
            .zip(1i64..)
            .map(|(v, id)| Record::with_id(id).with("v", v))
            .collect();
        let mut state = loaded(&store, records);
        assert_sorted(&v_values(&store, &state))?;

        for v in added {
            let mut record = Record::new().with("v", v);
            state = store.add(&state, &mut record).unwrap();
            assert_sorted(&v_values(&store, &state))?;
        }
    }
}
