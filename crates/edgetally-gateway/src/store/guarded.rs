use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;

use edgetally_core::error::{Result, StoreOp, TallyError};
use edgetally_core::KeyValueStore;

use crate::obs::TallyMetrics;

/// Bounds every store call with a deadline and records latency/errors.
///
/// A timed-out call is reported as `StoreUnavailable`; the underlying
/// operation is dropped, so a put may or may not have landed. No retries.
pub struct GuardedStore {
    inner: Arc<dyn KeyValueStore>,
    timeout: Duration,
    metrics: Arc<TallyMetrics>,
}

impl GuardedStore {
    pub fn new(inner: Arc<dyn KeyValueStore>, timeout: Duration, metrics: Arc<TallyMetrics>) -> Self {
        Self {
            inner,
            timeout,
            metrics,
        }
    }

    async fn guard<T, F>(&self, op: StoreOp, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send,
    {
        let start = Instant::now();
        let res = match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(TallyError::store(
                op,
                format!("timed out after {}ms", self.timeout.as_millis()),
            )),
        };

        let labels = [("op", op.as_str())];
        self.metrics.store_op_duration.observe(&labels, start.elapsed());
        if let Err(e) = &res {
            self.metrics.store_errors.inc(&labels);
            tracing::debug!(op = %op, error = %e, "store operation failed");
        }
        res
    }
}

#[async_trait]
impl KeyValueStore for GuardedStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        self.guard(StoreOp::Get, self.inner.get(key)).await
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<()> {
        self.guard(StoreOp::Put, self.inner.put(key, value)).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.guard(StoreOp::Delete, self.inner.delete(key)).await
    }

    async fn list(&self, limit: usize) -> Result<Vec<String>> {
        self.guard(StoreOp::List, self.inner.list(limit)).await
    }
}
