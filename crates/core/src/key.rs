//! Index keys for normstore
//!
//! An index maps each record to one [`IndexKey`]. Keys are a hashable
//! normalization of [`Value`]:
//!
//! - `Null`, a missing attribute, and composite values (`Array`, `Object`)
//!   all land in the canonical [`IndexKey::Unset`] bucket
//! - a float with an integral value in `i64` range is the matching
//!   [`IndexKey::Int`], so `1`, `1.0` and `-0.0`/`0` group together
//! - every NaN is one key
//!
//! Keys serialize through [`Value`], so `null` in JSON is the unset key.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical bit pattern used for every NaN key
const CANONICAL_NAN_BITS: u64 = 0x7ff8_0000_0000_0000;

/// 2^63 as f64
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Key computed for a record by an index
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum IndexKey {
    /// No key: null, missing, or not representable as a key
    #[default]
    Unset,
    /// Boolean key
    Bool(bool),
    /// Integer key
    Int(i64),
    /// Non-integral float key, stored as normalized IEEE-754 bits
    Float(u64),
    /// String key
    Str(String),
}

impl IndexKey {
    /// Key for a float: integral values become `Int`, NaN is canonical
    pub fn float(f: f64) -> Self {
        if f.is_nan() {
            return IndexKey::Float(CANONICAL_NAN_BITS);
        }
        if f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) {
            return IndexKey::Int(f as i64);
        }
        IndexKey::Float(f.to_bits())
    }

    /// Key for a borrowed value
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null | Value::Array(_) | Value::Object(_) => IndexKey::Unset,
            Value::Bool(b) => IndexKey::Bool(*b),
            Value::Int(i) => IndexKey::Int(*i),
            Value::Float(f) => IndexKey::float(*f),
            Value::String(s) => IndexKey::Str(s.clone()),
        }
    }

    /// Key for an optional value; `None` is the unset key
    pub fn from_optional(value: Option<&Value>) -> Self {
        value.map(Self::from_value).unwrap_or(IndexKey::Unset)
    }

    /// Check if this is the unset key
    pub fn is_unset(&self) -> bool {
        matches!(self, IndexKey::Unset)
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Unset => write!(f, "null"),
            IndexKey::Bool(b) => write!(f, "{}", b),
            IndexKey::Int(i) => write!(f, "{}", i),
            IndexKey::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            IndexKey::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<Value> for IndexKey {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => IndexKey::Str(s),
            other => IndexKey::from_value(&other),
        }
    }
}

impl From<IndexKey> for Value {
    fn from(key: IndexKey) -> Self {
        match key {
            IndexKey::Unset => Value::Null,
            IndexKey::Bool(b) => Value::Bool(b),
            IndexKey::Int(i) => Value::Int(i),
            IndexKey::Float(bits) => Value::Float(f64::from_bits(bits)),
            IndexKey::Str(s) => Value::String(s),
        }
    }
}

impl From<bool> for IndexKey {
    fn from(b: bool) -> Self {
        IndexKey::Bool(b)
    }
}

impl From<i64> for IndexKey {
    fn from(i: i64) -> Self {
        IndexKey::Int(i)
    }
}

impl From<i32> for IndexKey {
    fn from(i: i32) -> Self {
        IndexKey::Int(i as i64)
    }
}

impl From<f64> for IndexKey {
    fn from(f: f64) -> Self {
        IndexKey::float(f)
    }
}

impl From<&str> for IndexKey {
    fn from(s: &str) -> Self {
        IndexKey::Str(s.to_string())
    }
}

impl From<String> for IndexKey {
    fn from(s: String) -> Self {
        IndexKey::Str(s)
    }
}

impl<T: Into<IndexKey>> From<Option<T>> for IndexKey {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(IndexKey::Unset)
    }
}
