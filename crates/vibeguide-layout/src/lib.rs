#![forbid(unsafe_code)]

//! Synthetic program-grid layout.
//!
//! Turns a [`Catalog`](vibeguide_catalog::Catalog) into rows of variable-width
//! blocks:
//!
//! - [`generate_row_blocks`] - one row, sized by content weight or by an
//!   injected random source, honoring the alignment rule
//! - [`generate_layout`] - blank padding rows, one row per category, and the
//!   row-repetition rule
//! - [`Layout::verify`] - structural invariant check
//!
//! # Example
//!
//! ```
//! use vibeguide_catalog::{Catalog, Category, Stream};
//! use vibeguide_core::rng::XorShift64;
//! use vibeguide_layout::{LayoutOptions, generate_layout};
//!
//! let catalog = Catalog::with_categories(vec![Category::new("1", "Chess")])
//!     .with_streams("1", vec![Stream::new("gothamchess", "GothamChess")]);
//! let options = LayoutOptions::default();
//! let layout = generate_layout(&catalog, &options, &mut XorShift64::new(7));
//!
//! assert_eq!(layout.content_row_count(), 1);
//! assert!(layout.verify(options.row.alignment).is_ok());
//! ```

pub mod block;
pub mod config;
pub mod generator;
pub mod weight;

pub use block::{Block, BlockId, Layout, LayoutDefect, Row, RowKind};
pub use config::{ConfigError, LayoutOptions, RowConfig, WidthTiers};
pub use generator::{generate_layout, generate_row_blocks};
pub use weight::Weighted;
