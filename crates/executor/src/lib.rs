//! # normstore Executor
//!
//! The command layer over a normalized collection.
//!
//! It provides:
//! - [`Command`]/[`Query`]/[`Output`] - Serializable command vocabulary
//! - [`Executor`] - Stateless dispatcher over a `NormalizedStore`
//! - [`Collection`] - Holder of the current state
//!
//! ## Quick Start
//!
//! ```text
//! use normstore_executor::{Collection, Command, Executor, Query};
//!
//! let executor = Executor::from_config(StoreConfig::from_toml_str(config)?)?;
//! let mut collection = Collection::new(executor);
//!
//! collection.dispatch(Command::Create { record })?;
//! let ids = collection.select(Query::GetAllIds)?;
//! ```

#![warn(missing_docs)]

mod command;
mod convert;
mod error;
mod executor;
pub mod json;
mod output;
mod session;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use command::{Command, CommandKind, Query};
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use session::Collection;

// Re-export core types so users don't need normstore-core directly
pub use normstore_core::{Fields, IndexKey, Record, RecordId, Value};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
