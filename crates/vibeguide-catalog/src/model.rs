#![forbid(unsafe_code)]

//! Category and stream records as delivered by the Helix API.
//!
//! Only `id`/`name` (categories) and `user_login`/`user_name` (streams) are
//! required; everything else defaults so partial fixtures deserialize.

use serde::{Deserialize, Serialize};

/// A content grouping (game or category). Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Category {
    /// Helix game id.
    pub id: String,
    /// Display name ("Just Chatting").
    pub name: String,
    #[serde(default)]
    pub box_art_url: String,
    #[serde(default)]
    pub igdb_id: String,
}

impl Category {
    /// Create a category with just an id and a name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A live stream belonging to a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stream {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub game_name: String,
    /// Stream type ("live"); `type` is reserved in Rust.
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub viewer_count: u64,
    /// RFC 3339 timestamp. Lexicographic order matches chronological order.
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_mature: bool,
}

impl Stream {
    /// Create a stream with a login and display name.
    #[must_use]
    pub fn new(user_login: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_login: user_login.into(),
            user_name: user_name.into(),
            ..Self::default()
        }
    }

    /// Set the viewer count.
    #[must_use]
    pub fn with_viewers(mut self, viewer_count: u64) -> Self {
        self.viewer_count = viewer_count;
        self
    }

    /// Set the start timestamp.
    #[must_use]
    pub fn with_started_at(mut self, started_at: impl Into<String>) -> Self {
        self.started_at = started_at.into();
        self
    }

    /// Mark the stream as mature.
    #[must_use]
    pub fn mature(mut self) -> Self {
        self.is_mature = true;
        self
    }

    /// Name shown in grid cells: `user_name`, or `user_login` when blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.user_name.trim().is_empty() {
            &self.user_login
        } else {
            &self.user_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_login() {
        let stream = Stream::new("xqc", "");
        assert_eq!(stream.display_name(), "xqc");
        let stream = Stream::new("xqc", "xQc");
        assert_eq!(stream.display_name(), "xQc");
    }

    #[test]
    fn stream_deserializes_with_minimal_fields() {
        let stream: Stream =
            serde_json::from_str(r#"{"user_login":"tenz","user_name":"TenZ"}"#).unwrap();
        assert_eq!(stream.display_name(), "TenZ");
        assert_eq!(stream.viewer_count, 0);
        assert!(!stream.is_mature);
    }

    #[test]
    fn stream_type_field_is_renamed() {
        let stream: Stream = serde_json::from_str(
            r#"{"user_login":"a","user_name":"A","type":"live","is_mature":true}"#,
        )
        .unwrap();
        assert_eq!(stream.kind, "live");
        assert!(stream.is_mature);
        let json = serde_json::to_string(&stream).unwrap();
        assert!(json.contains(r#""type":"live""#));
    }

    #[test]
    fn category_requires_id_and_name() {
        assert!(serde_json::from_str::<Category>(r#"{"name":"Valorant"}"#).is_err());
        let category: Category =
            serde_json::from_str(r#"{"id":"516575","name":"Valorant"}"#).unwrap();
        assert_eq!(category, Category::new("516575", "Valorant"));
    }
}
