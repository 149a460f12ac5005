//! Transport layer (HTTP).
//!
//! Classifies each request path once, then hands off to the hit recorder or
//! the stats aggregator and renders the outcome.

pub mod handler;
pub mod response;
pub mod route;
