#![forbid(unsafe_code)]

//! Core vocabulary for Vista view state.
//!
//! - [`Order`]: per-field ordering metadata used by ordered copy.
//! - [`FieldKey`]: typed field identifiers.
//! - [`CopyError`], [`CommandError`]: failure taxonomy.
//!
//! This crate has no runtime behaviour; `vista-runtime` builds the
//! observable state base on top of it.

pub mod error;
pub mod key;
pub mod logging;
pub mod ordering;

pub use error::{CommandError, CommandResult, CopyError};
pub use key::FieldKey;
pub use ordering::Order;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
