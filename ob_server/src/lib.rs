//! HTTP API server for olympic-system tournament brackets.
//!
//! The binary in `main.rs` wires configuration, logging, the database pool,
//! and the [`api`] router together; everything else lives here so the router
//! can be exercised in tests.

pub mod api;
pub mod config;
pub mod logging;
