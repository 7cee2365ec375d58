//! Unit tests for the board module.
//!
//! Tests are organised by concern: domain values, the snapshot, drag and
//! drop synchronization, reconciliation of rejected moves, editing, and
//! port-level expectations checked with mocks.

mod reconcile_tests;
mod snapshot_tests;
mod support;
