//! Key-value store capability.
//!
//! The engines only need four operations, all keyed by route identifier. A
//! production binding is typically an eventually-consistent edge KV namespace;
//! tests and single-node deployments use an in-process map. Implementations
//! report failures as `TallyError::StoreUnavailable`.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Store `value` under `key` with no expiration.
    async fn put(&self, key: &str, value: Bytes) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// List at most `limit` keys, in the store's natural listing order.
    /// Keys past the limit are not reported and no error is raised.
    async fn list(&self, limit: usize) -> Result<Vec<String>>;
}
