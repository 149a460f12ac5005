//! Shared application state for the edgetally gateway.
//!
//! Wires the configured store (behind a `GuardedStore`), the clock, and the
//! two tracking engines. Startup errors are returned, not panicked.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;

use edgetally_core::error::{Result, TallyError};
use edgetally_core::window::WindowPolicy;
use edgetally_core::{HitRecorder, KeyValueStore, StatsAggregator};

use crate::clock::{Clock, SystemClock};
use crate::config::GatewayConfig;
use crate::obs::TallyMetrics;
use crate::store::{GuardedStore, MemoryStore};
use crate::transport::route::RouteRules;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    rules: RouteRules,
    window_policy: WindowPolicy,
    cache_control: Option<HeaderValue>,
    recorder: HitRecorder,
    aggregator: StatsAggregator,
    clock: Arc<dyn Clock>,
    metrics: Arc<TallyMetrics>,
}

impl AppState {
    /// Build state backed by an in-process `MemoryStore` and the system clock.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        Self::with_parts(cfg, Arc::new(MemoryStore::new()), Arc::new(SystemClock))
    }

    /// Build state around an externally provided store binding and clock.
    pub fn with_parts(
        cfg: GatewayConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        cfg.validate()?;

        let cache_control = cfg
            .hit
            .cache_control
            .as_deref()
            .map(HeaderValue::from_str)
            .transpose()
            .map_err(|e| TallyError::BadRequest(format!("hit.cache_control: {e}")))?;

        let metrics = Arc::new(TallyMetrics::default());
        let store: Arc<dyn KeyValueStore> = Arc::new(GuardedStore::new(
            store,
            Duration::from_millis(cfg.store.op_timeout_ms),
            Arc::clone(&metrics),
        ));

        let rules = RouteRules::from_config(&cfg.stats);
        let window_policy = cfg.stats.window_policy();
        let recorder = HitRecorder::new(Arc::clone(&store));
        let aggregator = StatsAggregator::new(store, cfg.stats.list_limit);

        tracing::info!(
            reserved = %rules.reserved_route,
            list_limit = cfg.stats.list_limit,
            default_window_ms = window_policy.default.as_millis(),
            op_timeout_ms = cfg.store.op_timeout_ms,
            "tracking engines ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                rules,
                window_policy,
                cache_control,
                recorder,
                aggregator,
                clock,
                metrics,
            }),
        })
    }

    pub fn rules(&self) -> &RouteRules {
        &self.inner.rules
    }

    pub fn window_policy(&self) -> &WindowPolicy {
        &self.inner.window_policy
    }

    pub fn cache_control(&self) -> Option<&HeaderValue> {
        self.inner.cache_control.as_ref()
    }

    pub fn recorder(&self) -> &HitRecorder {
        &self.inner.recorder
    }

    pub fn aggregator(&self) -> &StatsAggregator {
        &self.inner.aggregator
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.clock.now_ms()
    }

    pub fn metrics(&self) -> &TallyMetrics {
        &self.inner.metrics
    }
}
