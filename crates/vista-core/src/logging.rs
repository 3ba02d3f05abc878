//! Structured logging re-exports.
//!
//! With the `tracing` feature enabled, the `tracing` macros are reachable as
//! `vista_core::logging::*` (and from the crate root), so downstream state
//! crates can log without naming `tracing` in their own manifests.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
