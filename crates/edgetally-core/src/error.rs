//! Shared error type across edgetally crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// The key-value store failed or timed out.
    StoreUnavailable,
    /// A stored value could not be decoded as a route record.
    CorruptRecord,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::CorruptRecord => "CORRUPT_RECORD",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("store {op} failed: {reason}")]
    StoreUnavailable { op: StoreOp, reason: String },
    #[error("corrupt record for key {key:?}: {reason}")]
    CorruptRecord { key: String, reason: String },
    #[error("internal: {0}")]
    Internal(String),
}

impl TallyError {
    /// Shorthand for a store-level failure.
    pub fn store(op: StoreOp, reason: impl Into<String>) -> Self {
        TallyError::StoreUnavailable {
            op,
            reason: reason.into(),
        }
    }

    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TallyError::BadRequest(_) => ClientCode::BadRequest,
            TallyError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            TallyError::StoreUnavailable { .. } => ClientCode::StoreUnavailable,
            TallyError::CorruptRecord { .. } => ClientCode::CorruptRecord,
            TallyError::Internal(_) => ClientCode::Internal,
        }
    }
}

/// Store operation kind, carried by store errors and used as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Get,
    Put,
    Delete,
    List,
}

impl StoreOp {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreOp::Get => "get",
            StoreOp::Put => "put",
            StoreOp::Delete => "delete",
            StoreOp::List => "list",
        }
    }
}

impl std::fmt::Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
