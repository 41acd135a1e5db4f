#![forbid(unsafe_code)]

//! Content weights used to size blocks.

use unicode_width::UnicodeWidthStr;
use vibeguide_catalog::Stream;

/// Anything that can size a content block.
pub trait Weighted {
    /// Relative size; for names, their terminal display width.
    fn weight(&self) -> usize;
}

impl Weighted for Stream {
    fn weight(&self) -> usize {
        self.display_name().width()
    }
}

impl Weighted for str {
    fn weight(&self) -> usize {
        self.width()
    }
}

impl Weighted for String {
    fn weight(&self) -> usize {
        self.as_str().width()
    }
}

impl Weighted for usize {
    fn weight(&self) -> usize {
        *self
    }
}

impl<T: Weighted + ?Sized> Weighted for &T {
    fn weight(&self) -> usize {
        (**self).weight()
    }
}
