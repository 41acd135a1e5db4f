#![forbid(unsafe_code)]

//! Featured-selection sink.

use vibeguide_catalog::{Category, Stream};

/// Receives activation effects: the stream promoted to the featured area.
pub trait FeaturedSink {
    /// Feature `stream` from `category`, shown as channel `rank`.
    fn set_featured_selection(&mut self, stream: &Stream, category: &Category, rank: usize);

    /// Toggle automatic rotation of the featured stream.
    fn set_auto_rotate_enabled(&mut self, enabled: bool);
}

impl<S: FeaturedSink + ?Sized> FeaturedSink for &mut S {
    fn set_featured_selection(&mut self, stream: &Stream, category: &Category, rank: usize) {
        (**self).set_featured_selection(stream, category, rank);
    }

    fn set_auto_rotate_enabled(&mut self, enabled: bool) {
        (**self).set_auto_rotate_enabled(enabled);
    }
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Featured {
        user_login: String,
        category_id: String,
        rank: usize,
    },
    AutoRotate(bool),
}

/// Sink that records every call, for tests and headless runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
}

impl FeaturedSink for RecordingSink {
    fn set_featured_selection(&mut self, stream: &Stream, category: &Category, rank: usize) {
        self.calls.push(SinkCall::Featured {
            user_login: stream.user_login.clone(),
            category_id: category.id.clone(),
            rank,
        });
    }

    fn set_auto_rotate_enabled(&mut self, enabled: bool) {
        self.calls.push(SinkCall::AutoRotate(enabled));
    }
}
