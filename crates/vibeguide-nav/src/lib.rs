#![forbid(unsafe_code)]

//! Keyboard and pointer navigation over a generated grid layout.
//!
//! - [`GridIndex`] - non-blank cells with their resolved category and stream
//! - [`resolve_move`] - pure directional move resolution
//! - [`GridMetrics::scroll_into_view`] - snapped scroll requests
//! - [`Navigator`] - focus, drift re-anchoring, and activation
//!
//! Scroll position and the featured area live outside this crate and are
//! reached through the [`Viewport`] and [`FeaturedSink`] traits.

pub mod index;
pub mod navigator;
pub mod resolve;
pub mod sink;
pub mod viewport;

pub use index::{GridIndex, IndexCell, IndexRow};
pub use navigator::{NavOutcome, Navigator};
pub use resolve::{Direction, FocusedCell, resolve_move, vertical_target};
pub use sink::{FeaturedSink, RecordingSink, SinkCall};
pub use viewport::{GridMetrics, HeadlessViewport, ScrollRequest, Viewport, ViewportMetrics};
