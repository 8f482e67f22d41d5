//! Integration test utilities for TicketChirp
//!
//! Spawns the real axum app on a local port and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
