//! Path classification: aggregate, hit, or help.

use crate::config::StatsSection;

/// Prefix reserved for operational endpoints; never a route identifier.
pub const OPS_PREFIX: &str = "_edge";

#[derive(Debug, Clone)]
pub struct RouteRules {
    pub reserved_route: String,
    pub max_route_bytes: usize,
}

impl RouteRules {
    pub fn from_config(stats: &StatsSection) -> Self {
        Self {
            reserved_route: stats.reserved_route.clone(),
            max_route_bytes: stats.max_route_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    Stats,
    Hit(String),
    Help,
}

impl RouteKind {
    /// Classify a request path. Exactly one leading `/` is stripped; the
    /// rest is an opaque route identifier (no percent-decoding).
    pub fn classify(path: &str, rules: &RouteRules) -> Self {
        let id = path.strip_prefix('/').unwrap_or(path);

        if id.is_empty() || id == rules.reserved_route {
            return RouteKind::Stats;
        }
        if id.starts_with('/') || id.len() > rules.max_route_bytes || is_ops_path(id) {
            return RouteKind::Help;
        }
        RouteKind::Hit(id.to_string())
    }
}

fn is_ops_path(id: &str) -> bool {
    id == OPS_PREFIX
        || id
            .strip_prefix(OPS_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}
