//! Lightweight in-process metrics (dependency-free).
//!
//! Metrics are stored as atomics and rendered by the `/_edge/metrics`
//! handler in Prometheus text format.

pub mod metrics;

pub use metrics::TallyMetrics;
