//! Record model persisted in the store and the aggregate rendered by `/stats`.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};
use crate::window::WindowMs;

/// Per-route hit record. Stored as JSON `{"hits": .., "last": ..}` under the
/// route identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStat {
    /// Number of recorded hits. At least 1 for any stored record.
    pub hits: u64,
    /// Epoch milliseconds of the most recent hit.
    pub last: u64,
}

impl RouteStat {
    /// Base record used when a route has never been seen.
    pub fn empty(now: u64) -> Self {
        Self { hits: 0, last: now }
    }

    /// Count one more hit at `now`.
    pub fn touch(self, now: u64) -> Self {
        Self {
            hits: self.hits.saturating_add(1),
            last: now,
        }
    }

    /// Decode a stored value. `key` is only used for error context.
    pub fn decode(key: &str, raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw).map_err(|e| TallyError::CorruptRecord {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Encode for storage.
    pub fn encode(&self) -> Result<Bytes> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(|e| TallyError::Internal(format!("encode route stat failed: {e}")))
    }
}

/// Snapshot returned by the stats endpoint. Only live routes are included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub window_ms: WindowMs,
    pub total_calls: u64,
    pub routes_count: usize,
    pub routes: BTreeMap<String, RouteStat>,
    /// Epoch milliseconds at which the snapshot was computed.
    pub generated_at: u64,
}

impl AggregateResult {
    pub fn empty(window_ms: WindowMs, generated_at: u64) -> Self {
        Self {
            window_ms,
            total_calls: 0,
            routes_count: 0,
            routes: BTreeMap::new(),
            generated_at,
        }
    }

    /// Add a live record.
    pub(crate) fn include(&mut self, route: String, stat: RouteStat) {
        self.total_calls = self.total_calls.saturating_add(stat.hits);
        self.routes.insert(route, stat);
        self.routes_count = self.routes.len();
    }
}
