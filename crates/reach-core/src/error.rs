//! Error type for grid construction and coordinate lookup.

use std::fmt;

use crate::geom::{Point, Range};

/// Errors arising from grid construction or coordinate lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Columns or rows were not strictly positive.
    InvalidDimensions { columns: i32, rows: i32 },
    /// A traversal cost (or the maximum cost) was below 1.
    InvalidWeight(i32),
    /// An explicit weight list did not have one entry per cell.
    WeightCountMismatch { expected: usize, found: usize },
    /// A coordinate lies outside the grid.
    OutOfBounds {
        /// The offending coordinate.
        pos: Point,
        /// The valid range.
        bounds: Range,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { columns, rows } => {
                write!(f, "invalid grid dimensions {columns}x{rows}")
            }
            Self::InvalidWeight(w) => write!(f, "traversal cost {w} must be at least 1"),
            Self::WeightCountMismatch { expected, found } => {
                write!(f, "expected {expected} weights, found {found}")
            }
            Self::OutOfBounds { pos, bounds } => {
                write!(f, "coordinate {pos} out of bounds {bounds}")
            }
        }
    }
}

impl std::error::Error for GridError {}
