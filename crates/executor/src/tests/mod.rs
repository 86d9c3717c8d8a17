//! Test modules for the executor crate.


use std::sync::Arc;

use normstore_storage::{IndexDefinition, NormalizedStore, OrderingPolicy, StoreDefinition};

use crate::Executor;

/// Executor over a store with a grouped `byContainerId` index sorted by
/// name and a unique `bySlug` index.
pub(crate) fn create_test_executor() -> Executor {
    let store = NormalizedStore::new(
        StoreDefinition::new()
            .with_index(
                IndexDefinition::attribute("containerId")
                    .ordered_by(OrderingPolicy::by_field("name")),
            )
            .with_index(IndexDefinition::attribute("slug").unique()),
    )
    .unwrap();
    Executor::new(Arc::new(store))
}
