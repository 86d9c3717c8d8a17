//! JSON text in and out of the command layer.

use serde::Serialize;

use crate::{Command, Error, Query, Result};

/// Parse a command from JSON text.
pub fn parse_command(text: &str) -> Result<Command> {
    serde_json::from_str(text).map_err(|e| Error::InvalidInput {
        reason: format!("invalid command: {}", e),
    })
}

/// Parse a query from JSON text.
pub fn parse_query(text: &str) -> Result<Query> {
    serde_json::from_str(text).map_err(|e| Error::InvalidInput {
        reason: format!("invalid query: {}", e),
    })
}

/// Render an output, an error or anything else serializable as JSON text.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::InvalidInput {
        reason: format!("cannot serialize: {}", e),
    })
}
