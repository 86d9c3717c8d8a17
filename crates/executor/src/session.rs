//! Stateful holder of one collection.
//!
//! The [`Collection`] wraps an [`Executor`] and owns the current
//! [`StoreState`], the way a store slice is owned by an application state.
//!
//! # Usage
//!
//! ```ignore
//! use normstore_executor::{Collection, Command, Query};
//!
//! let mut collection = Collection::new(executor);
//!
//! collection.dispatch(Command::Create { record: Record::new().with("name", "W") })?;
//! let all = collection.select(Query::GetAll)?;
//! ```

use normstore_storage::StoreState;
use tracing::debug;

use crate::{Command, Executor, Output, Query, Result};

/// A stateful holder that wraps an [`Executor`] and the current state.
///
/// A failed command leaves the held state untouched.
#[derive(Debug, Clone)]
pub struct Collection {
    executor: Executor,
    state: StoreState,
}

impl Collection {
    /// Create a collection holding the empty state.
    pub fn new(executor: Executor) -> Self {
        let state = executor.initialize();
        Self { executor, state }
    }

    /// Create a collection holding `state`.
    pub fn with_state(executor: Executor, state: StoreState) -> Self {
        Self { executor, state }
    }

    /// Execute a command and keep the state it produces.
    pub fn dispatch(&mut self, cmd: Command) -> Result<Output> {
        let kind = cmd.kind();
        match self.executor.execute(&self.state, cmd) {
            Ok((next, output)) => {
                self.state = next;
                Ok(output)
            }
            Err(e) => {
                debug!(command = %kind, error = %e, "command failed, state kept");
                Err(e)
            }
        }
    }

    /// Answer a query against the current state.
    pub fn select(&self, query: Query) -> Result<Output> {
        self.executor.query(&self.state, query)
    }

    /// The current state.
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Get a reference to the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }
}
