//! Response rendering for hit, stats, help and error outcomes.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use edgetally_core::error::TallyError;
use edgetally_core::{AggregateResult, RouteStat};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Request-boundary error. Store failures become a generic 5xx body.
#[derive(Debug)]
pub struct ApiError(pub TallyError);

impl From<TallyError> for ApiError {
    fn from(e: TallyError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TallyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            TallyError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            TallyError::UnsupportedVersion
            | TallyError::CorruptRecord { .. }
            | TallyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Unique per-request payload for a tracked route.
pub fn hit_body(route: &str, now_ms: u64, stat: &RouteStat) -> String {
    format!("Fresh content for \"{route}\" @ {now_ms} (hit #{})\n", stat.hits)
}

pub fn hit_response(body: String, cache_control: Option<&HeaderValue>) -> Response {
    let mut res = (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response();
    if let Some(v) = cache_control {
        res.headers_mut().insert(header::CACHE_CONTROL, v.clone());
    }
    res
}

pub fn stats_response(agg: &AggregateResult) -> Result<Response, ApiError> {
    let body = serde_json::to_string_pretty(agg)
        .map_err(|e| TallyError::Internal(format!("render aggregate failed: {e}")))?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

pub fn help_text(reserved_route: &str, default_window_ms: u64) -> String {
    format!(
        "Usage:\n  \
         /alpha, /beta ...              dynamic payload (tracks hits per route)\n  \
         /{reserved_route}[?window=60000]          metrics JSON (default window {default_window_ms} ms)\n  \
         window must be a positive integer; 0 or a non-number uses the default\n  \
         /_edge/healthz, /_edge/metrics  service health and counters\n"
    )
}

pub fn help_response(reserved_route: &str, default_window_ms: u64) -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, TEXT_PLAIN)],
        help_text(reserved_route, default_window_ms),
    )
        .into_response()
}
