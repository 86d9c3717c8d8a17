//! Ordering policies for id lists
//!
//! An [`OrderingPolicy`] wraps an optional record comparator. It keeps the
//! primary id list sorted when configured on the store, and a group's id list
//! sorted when configured on a grouped index.
//!
//! - Absent comparator: `is_present()` is false, `is_needed()` is always
//!   false and `sort()` leaves the list untouched.
//! - Present comparator: `sort()` is a stable sort over the records the ids
//!   resolve to, and `is_needed(old, new)` is `comparator(old, new) != Equal`.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use normstore_core::{Record, RecordId, Value};

use crate::state::RecordMap;

/// Shared record comparator
pub type Comparator = Arc<dyn Fn(&Record, &Record) -> Ordering + Send + Sync>;

/// Optional total order over records
#[derive(Clone, Default)]
pub struct OrderingPolicy {
    comparator: Option<Comparator>,
    label: Option<String>,
}

impl OrderingPolicy {
    /// Policy without comparator: nothing is ever sorted
    pub fn none() -> Self {
        Self::default()
    }

    /// Policy backed by a custom comparator
    pub fn new<F>(comparator: F) -> Self
    where
        F: Fn(&Record, &Record) -> Ordering + Send + Sync + 'static,
    {
        Self {
            comparator: Some(Arc::new(comparator)),
            label: None,
        }
    }

    /// Ascending order over one field
    ///
    /// Missing fields sort like `Null`, i.e. first. See
    /// [`Value::total_cmp`](normstore_core::Value::total_cmp) for the order
    /// across value types.
    pub fn by_field(field: impl Into<String>) -> Self {
        let field = field.into();
        let label = format!("{} asc", field);
        let mut policy = Self::new(move |a: &Record, b: &Record| compare_field(a, b, &field));
        policy.label = Some(label);
        policy
    }

    /// Descending order over one field
    pub fn by_field_desc(field: impl Into<String>) -> Self {
        let field = field.into();
        let label = format!("{} desc", field);
        let mut policy =
            Self::new(move |a: &Record, b: &Record| compare_field(b, a, &field));
        policy.label = Some(label);
        policy
    }

    /// Whether an explicit order is configured
    pub fn is_present(&self) -> bool {
        self.comparator.is_some()
    }

    /// Whether replacing `old` by `new` may move the record
    pub fn is_needed(&self, old: &Record, new: &Record) -> bool {
        match &self.comparator {
            Some(cmp) => cmp(old, new) != Ordering::Equal,
            None => false,
        }
    }

    /// Compare two records, `None` when no comparator is configured
    pub fn compare(&self, a: &Record, b: &Record) -> Option<Ordering> {
        self.comparator.as_ref().map(|cmp| cmp(a, b))
    }

    /// Stable sort of `ids` by the records they resolve to in `records`
    ///
    /// Ids missing from `records` sink to the tail in their current order.
    pub fn sort(&self, records: &RecordMap, ids: &mut [RecordId]) {
        let Some(cmp) = &self.comparator else {
            return;
        };
        ids.sort_by(|a, b| match (records.get(a), records.get(b)) {
            (Some(ra), Some(rb)) => cmp(ra, rb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }
}

impl fmt::Debug for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.comparator, &self.label) {
            (None, _) => write!(f, "OrderingPolicy(none)"),
            (Some(_), Some(label)) => write!(f, "OrderingPolicy({})", label),
            (Some(_), None) => write!(f, "OrderingPolicy(custom)"),
        }
    }
}

fn compare_field(a: &Record, b: &Record, field: &str) -> Ordering {
    let null = Value::Null;
    let va = a.get(field).unwrap_or(&null);
    let vb = b.get(field).unwrap_or(&null);
    va.total_cmp(vb)
}
