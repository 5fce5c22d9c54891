//! inboxd library entrypoint.
//!
//! Modules:
//! - `app`: startup, configuration, shared state
//! - `http`: Axum router and handlers
//! - `db`: schema migration and SQLite helpers
//! - `models`: typed records used across layers
//! - `util`: tracing setup and preview derivation

pub mod app;
pub mod db;
pub mod http;
pub mod models;
pub mod util;
