#![forbid(unsafe_code)]

//! vibeguide public facade crate.
//!
//! Re-exports the channel-grid surface from the internal crates and offers a
//! prelude for embedding the guide in a host UI.
//!
//! ```
//! use vibeguide::prelude::*;
//!
//! let catalog = Catalog::with_categories(vec![Category::new("509658", "Just Chatting")])
//!     .with_streams("509658", vec![Stream::new("xqc", "xQc")]);
//! let mut guide = Guide::new(GuideConfig::default().seed(7), SessionFlags::default())?;
//! guide.load(&ResilientSource::new(StaticSource::new(catalog)));
//! assert_eq!(guide.index().len(), 1);
//! # Ok::<(), vibeguide::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use vibeguide_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent,
};
pub use vibeguide_core::geometry::{Rect, Span};
pub use vibeguide_core::rng::{RandomSource, ScriptedRolls, XorShift64};

// --- Catalog re-exports ----------------------------------------------------

pub use vibeguide_catalog::{
    Catalog, CatalogError, CatalogSource, Category, ResilientSource, Snapshot, SnapshotSource,
    SortOrder, StaticSource, Stream, StreamQuery, channel_label, format_viewer_count,
};

// --- Layout re-exports -----------------------------------------------------

pub use vibeguide_layout::{
    Block, BlockId, ConfigError, Layout, LayoutOptions, Row, RowConfig, RowKind, WidthTiers,
    generate_layout, generate_row_blocks,
};

// --- Navigation re-exports -------------------------------------------------

pub use vibeguide_nav::{
    Direction, FeaturedSink, FocusedCell, GridIndex, GridMetrics, IndexCell, IndexRow,
    NavOutcome, Navigator, ScrollRequest, Viewport, ViewportMetrics, resolve_move,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use vibeguide_runtime::{
    FetchTicket, Featured, FeaturedState, Guide, GuideConfig, MemoryStorage, SessionFlags,
    SessionStore, StorageBackend, StorageError,
};

#[cfg(feature = "state-persistence")]
pub use vibeguide_runtime::FileStorage;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for vibeguide hosts.
#[derive(Debug)]
pub enum Error {
    /// Invalid layout or guide configuration.
    Config(ConfigError),
    /// A catalog source failed outside the resilient wrapper.
    Catalog(CatalogError),
    /// Session storage failed.
    #[cfg(feature = "runtime")]
    Storage(StorageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Catalog(err) => write!(f, "catalog: {err}"),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => write!(f, "storage: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Catalog(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

#[cfg(feature = "runtime")]
impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

/// Standard result type for vibeguide APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Catalog, Category, Direction, Error, Event, FeaturedSink, GridIndex, GridMetrics,
        KeyCode, KeyEvent, Layout, LayoutOptions, NavOutcome, Navigator, ResilientSource,
        Result, StaticSource, Stream, Viewport,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{Guide, GuideConfig, SessionFlags, SessionStore};

    pub use crate::{catalog, core, layout, nav};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use vibeguide_catalog as catalog;
pub use vibeguide_core as core;
pub use vibeguide_layout as layout;
pub use vibeguide_nav as nav;
#[cfg(feature = "runtime")]
pub use vibeguide_runtime as runtime;
