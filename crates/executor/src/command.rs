//! Command and Query enums: the serializable vocabulary of a collection.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON
//! - **Pure data**: No closures or executable code
//!
//! Custom key functions and comparators live in the store definition, never
//! in a command.

use std::fmt;

use normstore_core::{Fields, IndexKey, Record, RecordId};
use serde::{Deserialize, Serialize};

/// A command transforms one collection state into the next.
///
/// # Example
///
/// ```text
/// {"Create": {"record": {"name": "W", "containerId": 4}}}
/// {"Update": {"id": 1, "values": {"name": "A"}}}
/// {"Delete": {"id": 1}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Replace the whole collection.
    /// Returns: `Output::Unit`
    Load {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        records: Option<Vec<Record>>,
    },

    /// Add one record; the id is generated when absent.
    /// Returns: `Output::Created`
    Create { record: Record },

    /// Shallow-merge `values` onto a stored record.
    /// Returns: `Output::Bool` (true if the id was stored)
    Update { id: RecordId, values: Fields },

    /// Replace a stored record by one carrying the same id.
    /// Returns: `Output::Bool` (true if the id was stored)
    Replace { record: Record },

    /// Remove a record.
    /// Returns: `Output::Bool` (true if the id was stored)
    Delete { id: RecordId },

    /// Move a record to the end of the collection and of its groups.
    /// Returns: `Output::Bool` (true if the id was stored)
    ToFront { id: RecordId },
}

/// Kind of a [`Command`], named the way action types are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandKind {
    /// [`Command::Create`]
    Create,
    /// [`Command::Update`]
    Update,
    /// [`Command::Delete`]
    Delete,
    /// [`Command::Replace`]
    Replace,
    /// [`Command::ToFront`]
    ToFront,
    /// [`Command::Load`]
    Load,
}

impl CommandKind {
    /// Every kind, in declaration order
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Create,
        CommandKind::Update,
        CommandKind::Delete,
        CommandKind::Replace,
        CommandKind::ToFront,
        CommandKind::Load,
    ];

    /// Action type name
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Create => "create",
            CommandKind::Update => "update",
            CommandKind::Delete => "delete",
            CommandKind::Replace => "replace",
            CommandKind::ToFront => "toFront",
            CommandKind::Load => "load",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Command {
    /// Returns the kind of this command.
    ///
    /// The exhaustive match ensures the compiler flags any new `Command`
    /// variant that is added without a corresponding kind.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Load { .. } => CommandKind::Load,
            Command::Create { .. } => CommandKind::Create,
            Command::Update { .. } => CommandKind::Update,
            Command::Replace { .. } => CommandKind::Replace,
            Command::Delete { .. } => CommandKind::Delete,
            Command::ToFront { .. } => CommandKind::ToFront,
        }
    }

    /// Id the command targets, when it names one
    pub fn target(&self) -> Option<&RecordId> {
        match self {
            Command::Update { id, .. } | Command::Delete { id } | Command::ToFront { id } => {
                Some(id)
            }
            Command::Create { record } | Command::Replace { record } => record.id(),
            Command::Load { .. } => None,
        }
    }
}

/// A read against one collection state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Query {
    /// Returns: `Output::Record`
    GetById { id: RecordId },
    /// Returns: `Output::Ids`
    GetAllIds,
    /// Returns: `Output::Records`
    GetAll,
    /// Returns: `Output::Bool`
    IsEmpty,
    /// Returns: `Output::Int`
    LastCreatedId,
    /// Returns: `Output::Id`
    NextId,
    /// Returns: `Output::Record`
    LastCreated,
    /// Look a key up in an index. A missing key means the unset key.
    /// Returns: `Output::Record` for a unique index, `Output::Ids` for a
    /// grouped one
    IndexGet {
        index: String,
        #[serde(default)]
        key: IndexKey,
    },
    /// Whether a unique index maps `key`.
    /// Returns: `Output::Bool`
    IndexExists { index: String, key: IndexKey },
}
