//! Sample pairs read from a data source.
//!
//! A table is an ordered sequence of `(x, y)` samples, ascending by `x`.
//! Nothing in the crate re-sorts samples; ordering is the source's job.

use num_traits::Float;

/// One `(x, y)` point of the interpolation table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<T> {
    /// Abscissa.
    pub x: T,

    /// Tabulated value at `x`.
    pub y: T,
}

impl<T: Float> Sample<T> {
    /// Create a sample.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Whether `query` lies strictly between `self.x` and `next.x`.
    pub fn straddles(&self, next: &Sample<T>, query: T) -> bool {
        self.x < query && query < next.x
    }

    /// Linear interpolation between `self` and `next` at `query`.
    ///
    /// ```text
    /// y = y_0 + (y_1 - y_0) * (q - x_0) / (x_1 - x_0)
    /// ```
    pub fn lerp(&self, next: &Sample<T>, query: T) -> T {
        self.y + (next.y - self.y) * (query - self.x) / (next.x - self.x)
    }
}

impl<T: Float> From<(T, T)> for Sample<T> {
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}
