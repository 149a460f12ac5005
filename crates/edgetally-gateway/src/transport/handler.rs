//! Catch-all request handler: classify the path, then record a hit or
//! compute the aggregate.

use axum::{
    extract::{Query, State},
    http::Uri,
    response::Response,
};

use edgetally_core::window::WindowMs;

use crate::app_state::AppState;
use crate::transport::response::{self, ApiError};
use crate::transport::route::RouteKind;

/// Query pairs in request order. Repeated keys are kept so the first
/// `window` wins; a malformed query string is treated as empty.
type QueryPairs = Option<Query<Vec<(String, String)>>>;

fn first_window(query: QueryPairs) -> Option<String> {
    let Query(pairs) = query?;
    pairs.into_iter().find(|(k, _)| k == "window").map(|(_, v)| v)
}

pub async fn dispatch(
    State(state): State<AppState>,
    uri: Uri,
    query: QueryPairs,
) -> Result<Response, ApiError> {
    match RouteKind::classify(uri.path(), state.rules()) {
        RouteKind::Stats => {
            let raw = first_window(query);
            let window = state.window_policy().resolve(raw.as_deref());
            stats(&state, window).await
        }
        RouteKind::Hit(route) => hit(&state, &route).await,
        RouteKind::Help => {
            state.metrics().help_responses.inc(&[]);
            Ok(response::help_response(
                &state.rules().reserved_route,
                state.window_policy().default.as_millis(),
            ))
        }
    }
}

async fn hit(state: &AppState, route: &str) -> Result<Response, ApiError> {
    let now = state.now_ms();
    match state.recorder().record_hit(route, now).await {
        Ok(stat) => {
            state.metrics().hits_recorded.inc(&[("outcome", "ok")]);
            let body = response::hit_body(route, now, &stat);
            Ok(response::hit_response(body, state.cache_control()))
        }
        Err(e) => {
            state.metrics().hits_recorded.inc(&[("outcome", "error")]);
            tracing::warn!(route = %route, error = %e, "hit not recorded");
            Err(e.into())
        }
    }
}

async fn stats(state: &AppState, window: WindowMs) -> Result<Response, ApiError> {
    let now = state.now_ms();
    let report = match state.aggregator().compute_report(window, now).await {
        Ok(report) => report,
        Err(e) => {
            state.metrics().stats_requests.inc(&[("outcome", "error")]);
            tracing::warn!(window_ms = window.as_millis(), error = %e, "aggregate failed");
            return Err(e.into());
        }
    };

    let m = state.metrics();
    m.stats_requests.inc(&[("outcome", "ok")]);
    m.routes_pruned.add(&[], report.pruned as u64);
    m.prune_failures.add(&[], report.prune_failures as u64);
    if report.listing_capped {
        m.listing_capped.inc(&[]);
    }
    m.live_routes
        .set(&[], i64::try_from(report.result.routes_count).unwrap_or(i64::MAX));

    tracing::info!(
        window_ms = window.as_millis(),
        total_calls = report.result.total_calls,
        routes = report.result.routes_count,
        pruned = report.pruned,
        capped = report.listing_capped,
        "stats served"
    );
    response::stats_response(&report.result)
}
