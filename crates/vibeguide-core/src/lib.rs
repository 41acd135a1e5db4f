#![forbid(unsafe_code)]

//! Core: grid geometry, canonical key events, seeded randomness, and logging.

pub mod event;
pub mod geometry;
pub mod logging;
pub mod rng;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
