#![forbid(unsafe_code)]

//! Session runtime for the channel grid.
//!
//! [`Guide`] owns the resident catalog and rebuilds layout and index in full
//! whenever categories, streams, or session flags change. Fetch results are
//! tagged with [`FetchTicket`]s so a superseded fetch can never overwrite a
//! newer one. [`SessionStore`] persists [`SessionFlags`]; [`FeaturedState`]
//! tracks the featured stream and its auto-rotation.
//!
//! # Feature Flags
//!
//! - `state-persistence`: [`FileStorage`] (JSON, write-then-rename)
//! - `tracing`: instrumentation in layout and navigation internals

pub mod guide;
pub mod rotation;
pub mod session;

pub use guide::{FetchTicket, Guide, GuideConfig};
pub use rotation::{Featured, FeaturedState};
#[cfg(feature = "state-persistence")]
pub use session::FileStorage;
pub use session::{
    MemoryStorage, SessionFlags, SessionStore, StorageBackend, StorageError, StorageResult,
    StoredEntry,
};
