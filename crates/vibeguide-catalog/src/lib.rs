#![forbid(unsafe_code)]

//! Category and stream data for the channel grid.
//!
//! - [`Category`] / [`Stream`] - Helix records
//! - [`Catalog`] - categories in rank order plus streams per category
//! - [`CatalogSource`] - pluggable provider; wrap it in [`ResilientSource`]
//!   so failures degrade to empty lists
//! - [`StreamQuery`] - clamped limits and ordering
//! - [`Snapshot`] / [`SnapshotSource`] - JSON capture and replay

pub mod catalog;
pub mod format;
pub mod model;
pub mod query;
pub mod snapshot;
pub mod source;

pub use catalog::Catalog;
pub use format::{channel_label, format_viewer_count};
pub use model::{Category, Stream};
pub use query::{
    DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT, MIN_QUERY_LIMIT, SortOrder, StreamQuery, clamp_limit,
};
pub use snapshot::{Snapshot, SnapshotSource, parse_categories, parse_streams};
pub use source::{CatalogError, CatalogResult, CatalogSource, ResilientSource, StaticSource};
