//! The Executor - single entry point to a normalized collection.
//!
//! The Executor is a stateless dispatcher that routes commands and queries to
//! the store and converts results to outputs.

use std::sync::Arc;

use normstore_storage::{NormalizedStore, StoreConfig, StoreState};
use tracing::debug;

use crate::handlers::{index, record};
use crate::{Command, Output, Query, Result};

/// The command executor - single entry point to a collection.
///
/// The Executor is **stateless**: it holds the store configuration but no
/// collection state. Callers pass the current state in and keep the state
/// that comes back.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use normstore_executor::{Command, Executor};
///
/// let executor = Executor::new(Arc::new(store));
/// let state = executor.initialize();
///
/// // Single command execution
/// let (state, output) = executor.execute(&state, Command::Create {
///     record: Record::new().with("name", "W"),
/// })?;
///
/// // Batch execution
/// let (state, results) = executor.execute_many(&state, vec![
///     Command::Delete { id: RecordId::Int(1) },
///     Command::Delete { id: RecordId::Int(2) },
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    store: Arc<NormalizedStore>,
}

impl Executor {
    /// Create a new executor wrapping a store.
    pub fn new(store: Arc<NormalizedStore>) -> Self {
        Self { store }
    }

    /// Create an executor for a store declared in TOML configuration.
    pub fn from_config(config: StoreConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(NormalizedStore::from_config(config)?)))
    }

    /// Empty collection state.
    pub fn initialize(&self) -> StoreState {
        self.store.initialize()
    }

    /// Execute a single command.
    ///
    /// Returns the next state and the command result. On error no state is
    /// returned: the input state is still the current one.
    pub fn execute(&self, state: &StoreState, cmd: Command) -> Result<(StoreState, Output)> {
        debug!(command = %cmd.kind(), "execute");
        let store = self.store.as_ref();
        match cmd {
            Command::Load { records } => record::load(store, state, records),
            Command::Create { record } => record::create(store, state, record),
            Command::Update { id, values } => record::update(store, state, id, values),
            Command::Replace { record } => record::replace(store, state, record),
            Command::Delete { id } => record::delete(store, state, id),
            Command::ToFront { id } => record::to_front(store, state, id),
        }
    }

    /// Execute multiple commands in sequence.
    ///
    /// Each command sees the state left by the previous successful one; a
    /// failed command leaves the state as it was and execution continues.
    pub fn execute_many(
        &self,
        state: &StoreState,
        cmds: Vec<Command>,
    ) -> (StoreState, Vec<Result<Output>>) {
        let mut current = state.clone();
        let mut results = Vec::with_capacity(cmds.len());
        for cmd in cmds {
            match self.execute(&current, cmd) {
                Ok((next, output)) => {
                    current = next;
                    results.push(Ok(output));
                }
                Err(e) => results.push(Err(e)),
            }
        }
        (current, results)
    }

    /// Answer a query against `state`.
    pub fn query(&self, state: &StoreState, query: Query) -> Result<Output> {
        let store = self.store.as_ref();
        match query {
            Query::GetById { id } => Ok(record::get_by_id(store, state, &id)),
            Query::GetAllIds => Ok(record::get_all_ids(store, state)),
            Query::GetAll => Ok(record::get_all(store, state)),
            Query::IsEmpty => Ok(Output::Bool(store.is_empty(state))),
            Query::LastCreatedId => Ok(Output::Int(store.last_created_id(state))),
            Query::NextId => Ok(Output::Id(store.next_id(state))),
            Query::LastCreated => Ok(record::last_created(store, state)),
            Query::IndexGet { index: name, key } => index::index_get(store, state, &name, &key),
            Query::IndexExists { index: name, key } => {
                index::index_exists(store, state, &name, &key)
            }
        }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &Arc<NormalizedStore> {
        &self.store
    }
}
