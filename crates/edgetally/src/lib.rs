//! Top-level facade crate for edgetally.
//!
//! Re-exports the tracking core and the gateway library so users can depend
//! on a single crate.

pub mod core {
    pub use edgetally_core::*;
}

pub mod gateway {
    pub use edgetally_gateway::*;
}
