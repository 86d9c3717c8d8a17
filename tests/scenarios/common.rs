//! Common test utilities for scenario tests

#![allow(dead_code)]

use std::sync::Once;

use normstore::{Fields, NormalizedStore, Record, RecordId, StoreDefinition, StoreState, Value};

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Build a store, panicking on an invalid definition
pub fn store(definition: StoreDefinition) -> NormalizedStore {
    init_tracing();
    NormalizedStore::new(definition).unwrap()
}

/// Bulk load `records` into a fresh state
pub fn loaded(store: &NormalizedStore, records: Vec<Record>) -> StoreState {
    store.bulk_load(&store.initialize(), records).unwrap()
}

/// Integer ids
pub fn ids(values: &[i64]) -> Vec<RecordId> {
    values.iter().copied().map(RecordId::Int).collect()
}

/// Partial values for `update`
pub fn values(pairs: &[(&str, Value)]) -> Fields {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}
