//! Command and query handlers organized by surface.
//!
//! | Module | Handles | Store surface |
//! |--------|---------|---------------|
//! | `record` | 6 commands, 7 queries | NormalizedStore commands and queries |
//! | `index` | 2 queries | UniqueIndex, GroupedIndex |

pub mod index;
pub mod record;
