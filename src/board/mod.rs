//! Sprint board synchronization.
//!
//! A board shows a project's tasks in one column per status. Cards are moved
//! by drag and drop: the move is applied locally at once and then confirmed
//! with the REST API, and rejected moves are reconciled per the configured
//! policy. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The synchronization controller in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
