use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use edgetally_core::error::Result;
use edgetally_core::KeyValueStore;

/// Mutex-guarded ordered map. Listing is lexicographic, like common edge KV
/// namespaces, so truncation at the listing cap is deterministic.
///
/// Each operation takes the lock once; a load followed by a store from the
/// hit recorder is two separate critical sections.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Bytes>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<()> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn list(&self, limit: usize) -> Result<Vec<String>> {
        Ok(self.entries.lock().await.keys().take(limit).cloned().collect())
    }
}
