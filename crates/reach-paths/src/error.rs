//! Error types for searches and planner requests.

use std::fmt;

use reach_core::{GridError, Point};

/// Errors rejecting a search before it starts. The grid is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The origin is not a grid coordinate.
    OutOfBounds(GridError),
    /// The movement budget was negative.
    InvalidBudget(i32),
    /// The origin is an obstacle.
    SourceBlocked(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(e) => write!(f, "invalid search origin: {e}"),
            Self::InvalidBudget(b) => write!(f, "movement budget {b} is negative"),
            Self::SourceBlocked(p) => write!(f, "search origin {p} is blocked"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfBounds(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::OutOfBounds(e)
    }
}

/// Errors returned by [`Planner`](crate::Planner) requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// The search was rejected.
    Search(SearchError),
    /// A coordinate lookup failed.
    Grid(GridError),
    /// A target was selected before any origin.
    NoOrigin,
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search(e) => e.fmt(f),
            Self::Grid(e) => e.fmt(f),
            Self::NoOrigin => f.write_str("no origin selected"),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::NoOrigin => None,
        }
    }
}

impl From<SearchError> for PlannerError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<GridError> for PlannerError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
