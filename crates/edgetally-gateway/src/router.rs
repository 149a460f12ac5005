//! Axum router wiring.
//!
//! Operational endpoints live under `/_edge/`; every other path falls through
//! to the tracking dispatcher.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/_edge/healthz", get(ops::healthz))
        .route("/_edge/metrics", get(ops::metrics))
        .fallback(transport::handler::dispatch)
        .with_state(state)
}
