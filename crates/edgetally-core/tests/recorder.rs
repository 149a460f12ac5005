//! Hit recording against an in-test store.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::atomic::Ordering;

use common::MapStore;
use edgetally_core::{HitRecorder, RouteStat};

#[tokio::test]
async fn sequential_hits_count_exactly() {
    let store = MapStore::new();
    let recorder = HitRecorder::new(store.clone());

    let mut last = None;
    for (i, t) in [100u64, 150, 151, 400, 900].into_iter().enumerate() {
        let stat = recorder.record_hit("alpha", t).await.unwrap();
        assert_eq!(stat.hits, i as u64 + 1);
        last = Some(stat);
    }

    assert_eq!(last, Some(RouteStat { hits: 5, last: 900 }));
    assert_eq!(store.stat("alpha"), Some(RouteStat { hits: 5, last: 900 }));
}

#[tokio::test]
async fn routes_are_tracked_independently() {
    let store = MapStore::new();
    let recorder = HitRecorder::new(store.clone());

    recorder.record_hit("alpha", 1).await.unwrap();
    recorder.record_hit("beta", 2).await.unwrap();
    recorder.record_hit("alpha", 3).await.unwrap();

    assert_eq!(store.stat("alpha"), Some(RouteStat { hits: 2, last: 3 }));
    assert_eq!(store.stat("beta"), Some(RouteStat { hits: 1, last: 2 }));
}

#[tokio::test]
async fn concurrent_hits_can_lose_an_update() {
    // Both hits read the empty record before either writes back.
    let store = MapStore::gated(2);
    let recorder = HitRecorder::new(store.clone());

    let (a, b) = tokio::join!(recorder.record_hit("hot", 10), recorder.record_hit("hot", 11));

    assert_eq!(a.unwrap().hits, 1);
    assert_eq!(b.unwrap().hits, 1);
    assert_eq!(store.stat("hot").unwrap().hits, 1);
}

#[tokio::test]
async fn read_failure_propagates_and_writes_nothing() {
    let store = MapStore::new();
    store.fail_get.store(true, Ordering::SeqCst);
    let recorder = HitRecorder::new(store.clone());

    let err = recorder.record_hit("alpha", 1).await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "STORE_UNAVAILABLE");
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn write_failure_propagates() {
    let store = MapStore::new();
    store.seed("alpha", RouteStat { hits: 2, last: 5 });
    store.fail_put.store(true, Ordering::SeqCst);
    let recorder = HitRecorder::new(store.clone());

    let err = recorder.record_hit("alpha", 9).await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "STORE_UNAVAILABLE");
    assert_eq!(store.stat("alpha"), Some(RouteStat { hits: 2, last: 5 }));
}

#[tokio::test]
async fn corrupt_record_is_not_overwritten() {
    let store = MapStore::new();
    store.seed_raw("alpha", b"{\"hits\":\"many\"}");
    let recorder = HitRecorder::new(store.clone());

    let err = recorder.record_hit("alpha", 9).await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "CORRUPT_RECORD");
    assert_eq!(store.len(), 1);
}
