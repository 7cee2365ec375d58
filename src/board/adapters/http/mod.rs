//! REST adapter for the board ports.
//!
//! Paths are resolved against a configured base URL. Bodies may arrive bare
//! or wrapped in the `{success, data, error}` envelope; an envelope with
//! `success: false` becomes [`crate::board::ports::ApiError::Rejected`].

mod client;
mod models;

pub use client::HttpBoardApi;
