//! Adapter implementations of the board ports.
//!
//! - [`http`]: `reqwest` client for the sprint-planning REST API
//! - [`memory`]: in-process fakes used by tests and offline demos
//! - [`tracing_notifier`]: renders notifications as log events

pub mod http;
pub mod memory;
pub mod tracing_notifier;
