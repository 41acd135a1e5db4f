#![forbid(unsafe_code)]

//! Request limits and stream ordering.
//!
//! Limits follow the Helix API bounds: anything outside `1..=100` is clamped,
//! and a missing limit falls back to 20.

use std::fmt;
use std::str::FromStr;

use crate::model::Stream;

/// Smallest page size accepted by the API.
pub const MIN_QUERY_LIMIT: u32 = 1;
/// Largest page size accepted by the API.
pub const MAX_QUERY_LIMIT: u32 = 100;
/// Page size used when the caller does not specify one.
pub const DEFAULT_QUERY_LIMIT: u32 = 20;

/// Clamp a requested page size into the accepted range.
#[must_use]
pub fn clamp_limit(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_QUERY_LIMIT)
        .clamp(MIN_QUERY_LIMIT, MAX_QUERY_LIMIT)
}

/// Ordering applied to the streams of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Most viewers first.
    #[default]
    Viewers,
    /// Most recently started first.
    Recent,
}

impl SortOrder {
    /// Query-string spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewers => "viewers",
            Self::Recent => "recent",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized sort spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortOrder(pub String);

impl fmt::Display for UnknownSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort order {:?} (expected viewers or recent)", self.0)
    }
}

impl std::error::Error for UnknownSortOrder {}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "viewers" => Ok(Self::Viewers),
            "recent" => Ok(Self::Recent),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

/// Parameters for fetching one category's streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamQuery {
    limit: u32,
    sort: SortOrder,
}

impl Default for StreamQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_QUERY_LIMIT,
            sort: SortOrder::Viewers,
        }
    }
}

impl StreamQuery {
    /// Query with a (clamped) limit and viewer ordering.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self::default().with_limit(limit)
    }

    /// Set the limit, clamped into the accepted range.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = clamp_limit(Some(limit));
        self
    }

    /// Set the ordering.
    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Effective limit.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Effective ordering.
    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Sort and truncate a stream list according to this query.
    ///
    /// Sorting is stable, so equal keys keep their source order.
    #[must_use]
    pub fn apply(&self, mut streams: Vec<Stream>) -> Vec<Stream> {
        match self.sort {
            SortOrder::Viewers => streams.sort_by(|a, b| b.viewer_count.cmp(&a.viewer_count)),
            SortOrder::Recent => streams.sort_by(|a, b| b.started_at.cmp(&a.started_at)),
        }
        streams.truncate(self.limit as usize);
        streams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(50)), 50);
        assert_eq!(clamp_limit(Some(1000)), 100);
    }

    #[test]
    fn sort_order_parses() {
        assert_eq!("viewers".parse::<SortOrder>(), Ok(SortOrder::Viewers));
        assert_eq!(" Recent ".parse::<SortOrder>(), Ok(SortOrder::Recent));
        assert_eq!("".parse::<SortOrder>(), Ok(SortOrder::Viewers));
        assert!("oldest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn apply_sorts_by_viewers_and_truncates() {
        let streams = vec![
            Stream::new("a", "A").with_viewers(10),
            Stream::new("b", "B").with_viewers(30),
            Stream::new("c", "C").with_viewers(20),
        ];
        let out = StreamQuery::new(2).apply(streams);
        let logins: Vec<_> = out.iter().map(|s| s.user_login.as_str()).collect();
        assert_eq!(logins, ["b", "c"]);
    }

    #[test]
    fn apply_sorts_by_recent() {
        let streams = vec![
            Stream::new("old", "Old").with_started_at("2024-01-01T10:00:00Z"),
            Stream::new("new", "New").with_started_at("2024-01-01T12:00:00Z"),
        ];
        let out = StreamQuery::default()
            .with_sort(SortOrder::Recent)
            .apply(streams);
        assert_eq!(out[0].user_login, "new");
    }

    #[test]
    fn query_limit_is_clamped() {
        assert_eq!(StreamQuery::new(0).limit(), 1);
        assert_eq!(StreamQuery::new(500).limit(), 100);
    }
}
