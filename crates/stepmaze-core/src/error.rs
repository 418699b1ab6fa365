//! Errors raised while building a grid.

use thiserror::Error;

/// Grid construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The blocked mask does not cover the grid exactly.
    #[error("blocked mask has {found} cells, expected {expected}")]
    MaskSize { expected: usize, found: usize },
    /// A picture row is wider or narrower than the first one.
    #[error("picture row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The grid cannot host the requested operation.
    #[error("grid {width}x{height} is too small, need at least {min}x{min}")]
    TooSmall { width: i32, height: i32, min: i32 },
}
