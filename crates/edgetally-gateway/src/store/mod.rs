//! `KeyValueStore` implementations available to the gateway.
//!
//! - `MemoryStore`: in-process map, used for single-node runs and tests.
//! - `GuardedStore`: wraps any store with a per-operation deadline and
//!   latency/error metrics.

mod guarded;
mod memory;

pub use guarded::GuardedStore;
pub use memory::MemoryStore;
