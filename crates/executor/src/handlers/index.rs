//! Index query handlers.

use normstore_core::IndexKey;
use normstore_storage::{Index, IndexKind, NormalizedStore, StoreState};

use crate::{Error, Output, Result};

fn find<'a>(store: &'a NormalizedStore, name: &str) -> Result<&'a Index> {
    store.index(name).ok_or_else(|| Error::IndexNotFound {
        name: name.to_string(),
    })
}

/// Handle IndexGet query.
///
/// A unique index answers with the record, a grouped index with the ids of
/// the group.
pub fn index_get(
    store: &NormalizedStore,
    state: &StoreState,
    name: &str,
    key: &IndexKey,
) -> Result<Output> {
    match find(store, name)? {
        Index::Unique(index) => Ok(Output::Record(
            index.get(state, key).map(|record| (**record).clone()),
        )),
        Index::Grouped(index) => Ok(Output::Ids(index.get(state, key).to_vec())),
    }
}

/// Handle IndexExists query.
pub fn index_exists(
    store: &NormalizedStore,
    state: &StoreState,
    name: &str,
    key: &IndexKey,
) -> Result<Output> {
    match find(store, name)? {
        Index::Unique(index) => Ok(Output::Bool(index.exists(state, key))),
        Index::Grouped(_) => Err(Error::WrongIndexKind {
            name: name.to_string(),
            expected: IndexKind::Unique.to_string(),
        }),
    }
}
