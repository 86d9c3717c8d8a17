//! Error types for normstore
//!
//! This module defines all error types raised by the store and its indexes.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Commands on an id that is not stored are not errors: `remove`, `update`,
//! `replace` and `reorder_to_end` return the unchanged state instead.

use crate::types::RecordId;
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Error types for the normalized store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with this id is already stored
    #[error("Duplicate identifier: {id}")]
    DuplicateIdentifier {
        /// The rejected id
        id: RecordId,
    },

    /// Index definition names a kind that is neither unique nor grouped
    #[error("Unknown index kind: {kind}")]
    UnknownIndexKind {
        /// The kind as written in the definition
        kind: String,
    },

    /// A record that must carry an id does not
    #[error("Record has no identifier")]
    MissingIdentifier,

    /// Generating the next integer id would overflow
    #[error("Identifier space exhausted: no integer id after {last}")]
    IdentifierSpaceExhausted {
        /// Largest integer id currently stored
        last: i64,
    },

    /// Store definition is inconsistent
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    /// Store configuration cannot be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}
