//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod feed;
pub mod health;
pub mod posts;
pub mod users;
