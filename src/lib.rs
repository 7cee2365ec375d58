//! Sprintboard: optimistic drag-and-drop task board for a sprint-planning
//! REST API.
//!
//! # Architecture
//!
//! Sprintboard follows hexagonal architecture principles:
//!
//! - **Domain**: Board, task, and feed types with no infrastructure
//!   dependencies
//! - **Ports**: Trait interfaces for the REST API and the notification
//!   surface
//! - **Adapters**: HTTP, in-memory, and tracing implementations of ports
//!
//! # Modules
//!
//! - [`board`]: Board state and its synchronization with the server
//! - [`config`]: TOML and environment configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod board;
pub mod config;
pub mod telemetry;
