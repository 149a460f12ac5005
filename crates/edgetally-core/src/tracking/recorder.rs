use std::sync::Arc;

use crate::error::Result;
use crate::model::RouteStat;
use crate::store::KeyValueStore;

/// Records hits as a load / increment / store sequence.
///
/// The sequence is not atomic. Two hits on the same route that both load
/// before either stores will write the same count, and one increment is
/// lost. Counters are therefore approximate under contention; callers that
/// need exact counts must supply a store with its own atomic increment.
#[derive(Clone)]
pub struct HitRecorder {
    store: Arc<dyn KeyValueStore>,
}

impl HitRecorder {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Count one hit on `route_id` at `now` (epoch ms) and return the
    /// updated record.
    ///
    /// Store failures propagate; a stored value that does not decode is
    /// reported as `CorruptRecord` and left untouched.
    pub async fn record_hit(&self, route_id: &str, now: u64) -> Result<RouteStat> {
        let base = match self.store.get(route_id).await? {
            Some(raw) => RouteStat::decode(route_id, &raw)?,
            None => RouteStat::empty(now),
        };

        let updated = base.touch(now);
        self.store.put(route_id, updated.encode()?).await?;

        tracing::debug!(route = %route_id, hits = updated.hits, last = updated.last, "hit recorded");
        Ok(updated)
    }
}
