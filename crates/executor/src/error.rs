//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Lossless**: Store errors keep their message

use normstore_core::RecordId;
use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Conflict | `DuplicateIdentifier` | Id already stored |
/// | Not Found | `IndexNotFound` | No index with that name |
/// | Type | `WrongIndexKind` | Query not supported by the index kind |
/// | Validation | `InvalidInput` | Bad command or query text |
/// | Store | `Store` | Any other store error |
///
/// # Example
///
/// ```ignore
/// match executor.execute(&state, cmd) {
///     Ok((next, output)) => { /* keep next */ }
///     Err(Error::DuplicateIdentifier { id }) => {
///         println!("id {} already stored", id);
///     }
///     Err(e) => {
///         println!("Error: {}", e);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// A record with this id is already stored
    #[error("duplicate identifier: {id}")]
    DuplicateIdentifier { id: RecordId },

    /// No index with this name is configured
    #[error("index not found: {name}")]
    IndexNotFound { name: String },

    /// The index cannot answer this query
    #[error("wrong index kind: {name} is not a {expected} index")]
    WrongIndexKind { name: String, expected: String },

    /// Invalid input
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Store error
    #[error("store error: {reason}")]
    Store { reason: String },
}
