#![forbid(unsafe_code)]

//! The resident dataset: categories in rank order plus streams per category.

use std::collections::HashMap;

use crate::model::{Category, Stream};

/// Categories (in rank order) and the streams fetched for each.
///
/// A category with no streams entry behaves exactly like one with an empty
/// list; lookups never fail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
    streams: HashMap<String, Vec<Stream>>,
}

impl Catalog {
    /// Empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with categories and no streams yet.
    #[must_use]
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories,
            streams: HashMap::new(),
        }
    }

    /// Builder form of [`Catalog::set_streams`].
    #[must_use]
    pub fn with_streams(mut self, category_id: impl Into<String>, streams: Vec<Stream>) -> Self {
        self.set_streams(category_id, streams);
        self
    }

    /// Replace the category list. Streams for categories that disappeared are
    /// dropped.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.streams
            .retain(|id, _| categories.iter().any(|category| &category.id == id));
        self.categories = categories;
    }

    /// Replace the streams of one category.
    pub fn set_streams(&mut self, category_id: impl Into<String>, streams: Vec<Stream>) {
        self.streams.insert(category_id.into(), streams);
    }

    /// Categories in rank order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category at rank position `index` (0-based).
    #[must_use]
    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    /// Streams of a category, empty when none were fetched.
    #[must_use]
    pub fn streams_for(&self, category_id: &str) -> &[Stream] {
        self.streams
            .get(category_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Streams of the category at rank position `index`.
    #[must_use]
    pub fn streams_at(&self, index: usize) -> &[Stream] {
        self.category(index)
            .map(|category| self.streams_for(&category.id))
            .unwrap_or(&[])
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True when no categories are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of streams across all categories.
    #[must_use]
    pub fn stream_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| self.streams_for(&category.id).len())
            .sum()
    }

    /// Copy of the catalog with mature streams removed.
    #[must_use]
    pub fn without_mature(&self) -> Catalog {
        let streams = self
            .streams
            .iter()
            .map(|(id, list)| {
                let kept = list.iter().filter(|s| !s.is_mature).cloned().collect();
                (id.clone(), kept)
            })
            .collect();
        Catalog {
            categories: self.categories.clone(),
            streams,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::with_categories(vec![
            Category::new("509658", "Just Chatting"),
            Category::new("21779", "League of Legends"),
        ])
        .with_streams(
            "509658",
            vec![Stream::new("xqc", "xQc"), Stream::new("hasanabi", "HasanAbi").mature()],
        )
    }

    #[test]
    fn missing_streams_entry_is_empty() {
        let catalog = sample();
        assert!(catalog.streams_for("21779").is_empty());
        assert!(catalog.streams_for("nope").is_empty());
        assert!(catalog.streams_at(7).is_empty());
    }

    #[test]
    fn streams_at_follows_rank_order() {
        let catalog = sample();
        assert_eq!(catalog.streams_at(0).len(), 2);
        assert_eq!(catalog.stream_count(), 2);
    }

    #[test]
    fn without_mature_filters_streams() {
        let filtered = sample().without_mature();
        let names: Vec<_> = filtered
            .streams_at(0)
            .iter()
            .map(|s| s.user_login.as_str())
            .collect();
        assert_eq!(names, ["xqc"]);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn set_categories_drops_orphaned_streams() {
        let mut catalog = sample();
        catalog.set_categories(vec![Category::new("21779", "League of Legends")]);
        assert_eq!(catalog.stream_count(), 0);
        assert!(catalog.streams_for("509658").is_empty());
    }
}
