//! Hit recording and windowed aggregation over a `KeyValueStore`.
//!
//! Both engines borrow a copy of a record for the duration of one store
//! round-trip and never cache state in process. Neither holds a lock across
//! `.await` points, so concurrent requests interleave freely at the store.

mod aggregator;
mod recorder;

pub use aggregator::{AggregateReport, StatsAggregator, DEFAULT_LIST_LIMIT};
pub use recorder::HitRecorder;
