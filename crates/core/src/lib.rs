//! Core types for normstore
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: Field value carried by records (JSON-shaped)
//! - RecordId: Record identifier (integer or string)
//! - Record / Fields: One entry of a normalized collection
//! - IndexKey: Hashable key computed by an index
//! - StoreError: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod types;
pub mod value;

pub use error::{StoreError, StoreResult};
pub use key::IndexKey;
pub use types::{Fields, Record, RecordId, ID_FIELD};
pub use value::Value;
