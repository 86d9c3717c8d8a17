//! Output enum for command and query results.
//!
//! Every command and query produces exactly one output type. This mapping is
//! deterministic: the same command always produces the same output variant
//! (though the values may differ based on collection state).

use normstore_core::{Record, RecordId};
use serde::{Deserialize, Serialize};

/// Successful execution results.
///
/// # Example
///
/// ```text
/// let (state, output) = executor.execute(&state, Command::Create { record })?;
///
/// match output {
///     Output::Created { id } => println!("created {}", id),
///     _ => unreachable!("Create always returns Created"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (load)
    Unit,

    /// Id assigned by a create
    Created {
        /// The stored record's id
        id: RecordId,
    },

    /// Optional record (lookups that may find nothing)
    Record(Option<Record>),

    /// Records in collection order
    Records(Vec<Record>),

    /// Ids in collection or group order
    Ids(Vec<RecordId>),

    /// Boolean result
    Bool(bool),

    /// Single id
    Id(RecordId),

    /// Integer result
    Int(i64),
}
