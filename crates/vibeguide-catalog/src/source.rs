#![forbid(unsafe_code)]

//! Catalog sources and the error-swallowing wrapper the grid relies on.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior behind [`ResilientSource`] |
//! |---------|-------|-------------------------------------|
//! | `CatalogError::Unavailable` | source offline, missing credentials | empty list, logged |
//! | `CatalogError::Http` | non-2xx upstream status | empty list, logged |
//! | `CatalogError::Decode` | malformed payload | empty list, logged |
//! | `CatalogError::Io` | snapshot file unreadable | empty list, logged |
//!
//! Layout generation therefore only ever sees (possibly empty) data.

use std::fmt;

use crate::catalog::Catalog;
use crate::model::{Category, Stream};
use crate::query::{StreamQuery, clamp_limit};

/// Errors a raw catalog source may report.
#[derive(Debug)]
pub enum CatalogError {
    /// Source cannot serve requests right now.
    Unavailable(String),
    /// Upstream answered with a non-success status.
    Http {
        /// HTTP status code.
        status: u16,
        /// Upstream message, if any.
        message: String,
    },
    /// Payload could not be decoded.
    Decode(String),
    /// I/O failure while reading a local source.
    Io(std::io::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "catalog unavailable: {msg}"),
            Self::Http { status, message } => write!(f, "upstream returned {status}: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A provider of categories and their streams.
pub trait CatalogSource {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Top categories in rank order, at most `limit` (clamped to `1..=100`).
    fn top_categories(&self, limit: u32) -> CatalogResult<Vec<Category>>;

    /// Streams of one category, shaped by `query`.
    fn streams_for_category(
        &self,
        category_id: &str,
        query: &StreamQuery,
    ) -> CatalogResult<Vec<Stream>>;
}

impl<S: CatalogSource + ?Sized> CatalogSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn top_categories(&self, limit: u32) -> CatalogResult<Vec<Category>> {
        (**self).top_categories(limit)
    }

    fn streams_for_category(
        &self,
        category_id: &str,
        query: &StreamQuery,
    ) -> CatalogResult<Vec<Stream>> {
        (**self).streams_for_category(category_id, query)
    }
}

/// In-memory source backed by a [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    catalog: Catalog,
}

impl StaticSource {
    /// Serve the given catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl CatalogSource for StaticSource {
    fn name(&self) -> &str {
        "StaticSource"
    }

    fn top_categories(&self, limit: u32) -> CatalogResult<Vec<Category>> {
        let limit = clamp_limit(Some(limit)) as usize;
        Ok(self.catalog.categories().iter().take(limit).cloned().collect())
    }

    fn streams_for_category(
        &self,
        category_id: &str,
        query: &StreamQuery,
    ) -> CatalogResult<Vec<Stream>> {
        Ok(query.apply(self.catalog.streams_for(category_id).to_vec()))
    }
}

/// Wraps a source so every failure becomes an empty list.
#[derive(Debug, Clone, Default)]
pub struct ResilientSource<S> {
    inner: S,
}

impl<S: CatalogSource> ResilientSource<S> {
    /// Wrap `inner`.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped source.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Top categories, or an empty list on failure.
    pub fn top_categories(&self, limit: u32) -> Vec<Category> {
        match self.inner.top_categories(limit) {
            Ok(categories) => {
                tracing::debug!(
                    source = self.inner.name(),
                    count = categories.len(),
                    "fetched top categories"
                );
                categories
            }
            Err(err) => {
                tracing::warn!(
                    source = self.inner.name(),
                    error = %err,
                    "category fetch failed; continuing with none"
                );
                Vec::new()
            }
        }
    }

    /// Streams of a category, or an empty list on failure.
    pub fn streams_for_category(&self, category_id: &str, query: &StreamQuery) -> Vec<Stream> {
        match self.inner.streams_for_category(category_id, query) {
            Ok(streams) => {
                tracing::debug!(
                    source = self.inner.name(),
                    category_id,
                    count = streams.len(),
                    "fetched streams"
                );
                streams
            }
            Err(err) => {
                tracing::warn!(
                    source = self.inner.name(),
                    category_id,
                    error = %err,
                    "stream fetch failed; continuing with none"
                );
                Vec::new()
            }
        }
    }
}
