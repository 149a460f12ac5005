//! edgetally gateway library entry.
//!
//! This crate wires configuration, the store binding, and the tracking
//! engines from `edgetally-core` into an axum service. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod clock;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
pub mod transport;
