//! Record command and query handlers.
//!
//! Each command handler returns the next state together with its output.
//! Handlers that find nothing to change return the input state.

use normstore_core::{Fields, Record, RecordId};
use normstore_storage::{NormalizedStore, StoreState};

use crate::{Error, Output, Result};

// =============================================================================
// Commands
// =============================================================================

/// Handle Load command.
pub fn load(
    store: &NormalizedStore,
    state: &StoreState,
    records: Option<Vec<Record>>,
) -> Result<(StoreState, Output)> {
    let next = store.bulk_load(state, records.unwrap_or_default())?;
    Ok((next, Output::Unit))
}

/// Handle Create command.
pub fn create(
    store: &NormalizedStore,
    state: &StoreState,
    mut record: Record,
) -> Result<(StoreState, Output)> {
    let next = store.add(state, &mut record)?;
    let id = record.id().cloned().ok_or_else(|| Error::Store {
        reason: "created record has no identifier".to_string(),
    })?;
    Ok((next, Output::Created { id }))
}

/// Handle Update command.
pub fn update(
    store: &NormalizedStore,
    state: &StoreState,
    id: RecordId,
    values: Fields,
) -> Result<(StoreState, Output)> {
    let found = state.contains(&id);
    Ok((store.update(state, &id, values), Output::Bool(found)))
}

/// Handle Replace command.
pub fn replace(
    store: &NormalizedStore,
    state: &StoreState,
    record: Record,
) -> Result<(StoreState, Output)> {
    let found = record.id().is_some_and(|id| state.contains(id));
    let next = store.replace(state, record)?;
    Ok((next, Output::Bool(found)))
}

/// Handle Delete command.
pub fn delete(
    store: &NormalizedStore,
    state: &StoreState,
    id: RecordId,
) -> Result<(StoreState, Output)> {
    let found = state.contains(&id);
    Ok((store.remove(state, &id), Output::Bool(found)))
}

/// Handle ToFront command.
pub fn to_front(
    store: &NormalizedStore,
    state: &StoreState,
    id: RecordId,
) -> Result<(StoreState, Output)> {
    let found = state.contains(&id);
    Ok((store.reorder_to_end(state, &id), Output::Bool(found)))
}

// =============================================================================
// Queries
// =============================================================================

/// Handle GetById query.
pub fn get_by_id(store: &NormalizedStore, state: &StoreState, id: &RecordId) -> Output {
    Output::Record(store.get_by_id(state, id).map(|record| (**record).clone()))
}

/// Handle GetAllIds query.
pub fn get_all_ids(store: &NormalizedStore, state: &StoreState) -> Output {
    Output::Ids(store.get_all_ids(state).to_vec())
}

/// Handle GetAll query.
pub fn get_all(store: &NormalizedStore, state: &StoreState) -> Output {
    Output::Records(
        store
            .get_all(state)
            .into_iter()
            .map(|record| (*record).clone())
            .collect(),
    )
}

/// Handle LastCreated query.
pub fn last_created(store: &NormalizedStore, state: &StoreState) -> Output {
    Output::Record(store.last_created(state).map(|record| (**record).clone()))
}
