use std::sync::Arc;

use crate::error::{Result, TallyError};
use crate::model::{AggregateResult, RouteStat};
use crate::store::KeyValueStore;
use crate::window::{Freshness, WindowMs};

/// Listing cap used when none is configured.
pub const DEFAULT_LIST_LIMIT: usize = 1000;

/// Aggregate plus bookkeeping about what the scan saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    pub result: AggregateResult,
    /// Keys returned by the listing.
    pub scanned: usize,
    /// Stale records deleted during this scan.
    pub pruned: usize,
    /// Stale records whose deletion failed (left in place).
    pub prune_failures: usize,
    /// Records that could not be decoded and were skipped.
    pub corrupt: usize,
    /// The listing returned exactly `list_limit` keys, so routes may have
    /// been omitted.
    pub listing_capped: bool,
}

/// Computes windowed aggregates and lazily evicts stale records.
///
/// Only the first `list_limit` keys of the store listing are examined. With
/// more distinct routes than that, the rest are silently left out of the
/// aggregate (and never pruned by it).
///
/// Pruning is a read-then-delete with no condition on the delete. A hit that
/// lands on a route after it was read as stale but before its delete erases
/// the refreshed record along with every hit it had accumulated; the next
/// hit starts the route again from 1. Like the recorder's lost update, this
/// is accepted for approximate counters.
#[derive(Clone)]
pub struct StatsAggregator {
    store: Arc<dyn KeyValueStore>,
    list_limit: usize,
}

impl StatsAggregator {
    pub fn new(store: Arc<dyn KeyValueStore>, list_limit: usize) -> Self {
        Self {
            store,
            list_limit: list_limit.max(1),
        }
    }

    pub fn list_limit(&self) -> usize {
        self.list_limit
    }

    /// Sum live hits within `window` ending at `now`.
    pub async fn compute_aggregate(&self, window: WindowMs, now: u64) -> Result<AggregateResult> {
        self.compute_report(window, now).await.map(|r| r.result)
    }

    /// Like `compute_aggregate`, also reporting pruning and truncation.
    ///
    /// List and get failures abort the scan. Delete failures are logged and
    /// counted; the stale record simply survives until the next scan.
    /// A successful delete may race a concurrent hit on the same key and
    /// remove the record that hit just wrote.
    pub async fn compute_report(&self, window: WindowMs, now: u64) -> Result<AggregateReport> {
        let keys = self.store.list(self.list_limit).await?;

        let mut report = AggregateReport {
            result: AggregateResult::empty(window, now),
            scanned: keys.len(),
            pruned: 0,
            prune_failures: 0,
            corrupt: 0,
            listing_capped: keys.len() >= self.list_limit,
        };

        for key in keys {
            // Vanished between list and get.
            let Some(raw) = self.store.get(&key).await? else {
                continue;
            };

            let stat = match RouteStat::decode(&key, &raw) {
                Ok(stat) => stat,
                Err(TallyError::CorruptRecord { reason, .. }) => {
                    tracing::warn!(key = %key, %reason, "skipping undecodable record");
                    report.corrupt += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if Freshness::classify(stat.last, now, window).is_live() {
                report.result.include(key, stat);
                continue;
            }

            match self.store.delete(&key).await {
                Ok(()) => report.pruned += 1,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "stale record prune failed");
                    report.prune_failures += 1;
                }
            }
        }

        if report.listing_capped {
            tracing::debug!(limit = self.list_limit, "key listing reached its cap");
        }
        tracing::debug!(
            window_ms = window.as_millis(),
            scanned = report.scanned,
            live = report.result.routes_count,
            pruned = report.pruned,
            "aggregate computed"
        );
        Ok(report)
    }
}
