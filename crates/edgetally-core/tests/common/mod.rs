//! In-test store double with fault injection and an optional read gate.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Barrier;

use edgetally_core::error::{Result, StoreOp, TallyError};
use edgetally_core::{KeyValueStore, RouteStat};

#[derive(Default)]
pub struct MapStore {
    data: Mutex<BTreeMap<String, Bytes>>,
    pub fail_get: AtomicBool,
    pub fail_put: AtomicBool,
    pub fail_delete: AtomicBool,
    pub fail_list: AtomicBool,
    pub deletes: AtomicUsize,
    /// When set, every `get` waits here until the barrier releases.
    read_gate: Option<Arc<Barrier>>,
    /// When set, every `delete` waits here before removing the key.
    delete_gate: Option<Arc<Barrier>>,
}

impl MapStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store whose reads rendezvous in groups of `parties`.
    pub fn gated(parties: usize) -> Arc<Self> {
        Arc::new(Self {
            read_gate: Some(Arc::new(Barrier::new(parties))),
            ..Self::default()
        })
    }

    /// Store whose deletes pause on a two-party barrier. The returned
    /// barrier is the other party: waiting on it lets the delete proceed.
    pub fn delete_gated() -> (Arc<Self>, Arc<Barrier>) {
        let gate = Arc::new(Barrier::new(2));
        let store = Arc::new(Self {
            delete_gate: Some(Arc::clone(&gate)),
            ..Self::default()
        });
        (store, gate)
    }

    pub fn seed(&self, key: &str, stat: RouteStat) {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), stat.encode().unwrap());
    }

    pub fn seed_raw(&self, key: &str, raw: &'static [u8]) {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), Bytes::from_static(raw));
    }

    pub fn stat(&self, key: &str) -> Option<RouteStat> {
        let raw = self.data.lock().unwrap().get(key).cloned()?;
        Some(RouteStat::decode(key, &raw).unwrap())
    }

    pub fn len(&self) -> usize {
        self.data.lock().unwrap().len()
    }

    fn check(&self, flag: &AtomicBool, op: StoreOp) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(TallyError::store(op, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MapStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        self.check(&self.fail_get, StoreOp::Get)?;
        let value = self.data.lock().unwrap().get(key).cloned();
        if let Some(gate) = &self.read_gate {
            gate.wait().await;
        }
        Ok(value)
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<()> {
        self.check(&self.fail_put, StoreOp::Put)?;
        self.data.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.check(&self.fail_delete, StoreOp::Delete)?;
        if let Some(gate) = &self.delete_gate {
            gate.wait().await;
        }
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.data.lock().unwrap().remove(key);
        Ok(())
    }

    async fn list(&self, limit: usize) -> Result<Vec<String>> {
        self.check(&self.fail_list, StoreOp::List)?;
        Ok(self.data.lock().unwrap().keys().take(limit).cloned().collect())
    }
}
