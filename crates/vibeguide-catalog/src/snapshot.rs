#![forbid(unsafe_code)]

//! JSON payloads: Helix `{"data": [...]}` pages and whole-catalog snapshots.
//!
//! A snapshot file captures one fetch session so the grid can be replayed
//! offline:
//!
//! ```json
//! {
//!   "categories": [{ "id": "509658", "name": "Just Chatting" }],
//!   "streams": { "509658": [{ "user_login": "xqc", "user_name": "xQc" }] }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::model::{Category, Stream};
use crate::query::{StreamQuery, clamp_limit};
use crate::source::{CatalogResult, CatalogSource};

/// One page of a Helix list response.
#[derive(Debug, Clone, Deserialize)]
struct HelixPage<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// Parse a `/games/top` response body.
pub fn parse_categories(body: &str) -> CatalogResult<Vec<Category>> {
    let page: HelixPage<Category> = serde_json::from_str(body)?;
    Ok(page.data)
}

/// Parse a `/streams` response body.
pub fn parse_streams(body: &str) -> CatalogResult<Vec<Stream>> {
    let page: HelixPage<Stream> = serde_json::from_str(body)?;
    Ok(page.data)
}

/// Serializable form of a [`Catalog`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub streams: HashMap<String, Vec<Stream>>,
}

impl Snapshot {
    /// Capture a catalog.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let streams = catalog
            .categories()
            .iter()
            .map(|category| {
                (
                    category.id.clone(),
                    catalog.streams_for(&category.id).to_vec(),
                )
            })
            .collect();
        Self {
            categories: catalog.categories().to_vec(),
            streams,
        }
    }

    /// Rebuild a catalog. Stream lists for unknown categories are dropped.
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        let mut catalog = Catalog::with_categories(self.categories);
        for (id, streams) in self.streams {
            if catalog.categories().iter().any(|c| c.id == id) {
                catalog.set_streams(id, streams);
            }
        }
        catalog
    }

    /// Parse snapshot JSON.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render snapshot JSON.
    pub fn to_json(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write a snapshot file.
    pub fn save(&self, path: impl AsRef<Path>) -> CatalogResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// A [`CatalogSource`] that serves a snapshot file read at construction.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    snapshot: Snapshot,
    name: String,
}

impl SnapshotSource {
    /// Load the snapshot at `path`.
    pub fn open(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let snapshot = Snapshot::load(path)?;
        tracing::debug!(
            path = %path.display(),
            categories = snapshot.categories.len(),
            "loaded catalog snapshot"
        );
        Ok(Self {
            snapshot,
            name: format!("SnapshotSource({})", path.display()),
        })
    }

    /// Serve an in-memory snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            name: "SnapshotSource(memory)".to_string(),
        }
    }
}

impl CatalogSource for SnapshotSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn top_categories(&self, limit: u32) -> CatalogResult<Vec<Category>> {
        let limit = clamp_limit(Some(limit)) as usize;
        Ok(self.snapshot.categories.iter().take(limit).cloned().collect())
    }

    fn streams_for_category(
        &self,
        category_id: &str,
        query: &StreamQuery,
    ) -> CatalogResult<Vec<Stream>> {
        let streams = self
            .snapshot
            .streams
            .get(category_id)
            .cloned()
            .unwrap_or_default();
        Ok(query.apply(streams))
    }
}
