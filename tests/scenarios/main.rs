//! Collection Scenario Tests
//!
//! End-to-end behavior of a normalized collection through the public facade:
//! - Grouped and unique index scenarios
//! - Global ordering and reordering
//! - Structural sharing between consecutive states
//! - The JSON command layer driving a collection

mod common;

mod command_flow;
mod index_scenarios;
mod ordering;
mod sharing;
