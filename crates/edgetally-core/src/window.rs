//! Time window utilities: parsing the `window` parameter and classifying
//! records as live or stale.

use serde::Serialize;

/// Trailing window length in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct WindowMs(u64);

impl WindowMs {
    /// 5 minutes.
    pub const DEFAULT: WindowMs = WindowMs(300_000);

    pub const fn new(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

impl Default for WindowMs {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Classification of a record relative to a window ending at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Live,
    Stale,
}

impl Freshness {
    /// Live iff `now - last <= window`. A `last` ahead of `now` (clock skew
    /// between edge nodes) counts as live.
    pub fn classify(last: u64, now: u64, window: WindowMs) -> Self {
        if now.saturating_sub(last) <= window.0 {
            Freshness::Live
        } else {
            Freshness::Stale
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, Freshness::Live)
    }
}

/// Resolves the user-supplied `window` parameter.
///
/// Parsing is permissive: leading digits are honoured (`"250ms"` is 250),
/// anything non-numeric or non-positive falls back to the default, and an
/// optional ceiling clamps oversized values.
#[derive(Debug, Clone, Copy)]
pub struct WindowPolicy {
    pub default: WindowMs,
    pub max: Option<WindowMs>,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            default: WindowMs::DEFAULT,
            max: None,
        }
    }
}

impl WindowPolicy {
    pub fn resolve(&self, raw: Option<&str>) -> WindowMs {
        let parsed = match raw.and_then(leading_integer) {
            Some(v) if v > 0 => WindowMs(v),
            _ => self.default,
        };
        match self.max {
            Some(max) if parsed > max => max,
            _ => parsed,
        }
    }
}

/// Lenient integer prefix parse. Returns `None` when no digits lead the
/// input or the sign is negative; saturates on overflow.
fn leading_integer(raw: &str) -> Option<u64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let value = digits[..len]
        .bytes()
        .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add(u64::from(b - b'0')));

    if negative && value > 0 {
        return None;
    }
    Some(value)
}
