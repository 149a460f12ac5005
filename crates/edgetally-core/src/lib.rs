//! edgetally core: per-route hit tracking and windowed aggregation.
//!
//! This crate owns the record model, the window classification rules, the
//! `KeyValueStore` capability and the two engines built on top of it
//! (`HitRecorder`, `StatsAggregator`). It carries no HTTP or runtime
//! dependencies so the same logic runs against an edge KV binding or an
//! in-process map.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Store failures and undecodable records surface as `TallyError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod store;
pub mod tracking;
pub mod window;

/// Shared result type.
pub use error::{Result, TallyError};
pub use model::{AggregateResult, RouteStat};
pub use store::KeyValueStore;
pub use tracking::{AggregateReport, HitRecorder, StatsAggregator};
pub use window::{Freshness, WindowMs, WindowPolicy};
