use serde::Deserialize;
use edgetally_core::error::{Result, TallyError};
use edgetally_core::tracking::DEFAULT_LIST_LIMIT;
use edgetally_core::window::{WindowMs, WindowPolicy};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub stats: StatsSection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub hit: HitSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::UnsupportedVersion);
        }

        self.stats.validate()?;
        self.store.validate()?;
        self.hit.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsSection {
    /// Path segment that selects the aggregate instead of a hit.
    #[serde(default = "default_reserved_route")]
    pub reserved_route: String,

    #[serde(default = "default_window_ms")]
    pub default_window_ms: u64,

    /// Optional ceiling for the `window` query parameter.
    #[serde(default)]
    pub max_window_ms: Option<u64>,

    /// Maximum number of keys examined per aggregate.
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Longest accepted route identifier, in bytes.
    #[serde(default = "default_max_route_bytes")]
    pub max_route_bytes: usize,
}

impl Default for StatsSection {
    fn default() -> Self {
        Self {
            reserved_route: default_reserved_route(),
            default_window_ms: default_window_ms(),
            max_window_ms: None,
            list_limit: default_list_limit(),
            max_route_bytes: default_max_route_bytes(),
        }
    }
}

impl StatsSection {
    pub fn validate(&self) -> Result<()> {
        if self.reserved_route.is_empty() || self.reserved_route.contains('/') {
            return Err(TallyError::BadRequest(
                "stats.reserved_route must be a single non-empty path segment".into(),
            ));
        }
        if self.default_window_ms == 0 {
            return Err(TallyError::BadRequest(
                "stats.default_window_ms must be positive".into(),
            ));
        }
        if let Some(max) = self.max_window_ms {
            if max < self.default_window_ms {
                return Err(TallyError::BadRequest(
                    "stats.max_window_ms must not be below default_window_ms".into(),
                ));
            }
        }
        if !(1..=10_000).contains(&self.list_limit) {
            return Err(TallyError::BadRequest(
                "stats.list_limit must be between 1 and 10000".into(),
            ));
        }
        if !(1..=4096).contains(&self.max_route_bytes) {
            return Err(TallyError::BadRequest(
                "stats.max_route_bytes must be between 1 and 4096".into(),
            ));
        }
        Ok(())
    }

    pub fn window_policy(&self) -> WindowPolicy {
        WindowPolicy {
            default: WindowMs::new(self.default_window_ms),
            max: self.max_window_ms.map(WindowMs::new),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Deadline applied to every single store operation.
    #[serde(default = "default_op_timeout_ms")]
    pub op_timeout_ms: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            op_timeout_ms: default_op_timeout_ms(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if !(10..=60_000).contains(&self.op_timeout_ms) {
            return Err(TallyError::BadRequest(
                "store.op_timeout_ms must be between 10 and 60000".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HitSection {
    /// `Cache-Control` value attached to hit responses so the edge caches them.
    #[serde(default)]
    pub cache_control: Option<String>,
}

impl HitSection {
    pub fn validate(&self) -> Result<()> {
        if let Some(v) = &self.cache_control {
            if v.is_empty() || !v.bytes().all(|b| b == b' ' || b.is_ascii_graphic()) {
                return Err(TallyError::BadRequest(
                    "hit.cache_control must be non-empty printable ASCII".into(),
                ));
            }
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_reserved_route() -> String {
    "stats".into()
}
fn default_window_ms() -> u64 {
    WindowMs::DEFAULT.as_millis()
}
fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}
fn default_max_route_bytes() -> usize {
    512
}
fn default_op_timeout_ms() -> u64 {
    2000
}
