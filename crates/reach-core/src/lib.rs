//! **reach-core** — the weighted grid behind bounded-cost reachability.
//!
//! This crate provides the data model shared by the *reach* crates:
//! geometry primitives, the [`Cell`] record with its per-search state, and
//! the [`Grid`] arena that owns every cell together with its precomputed
//! 4-directional adjacency.

pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, UNREACHABLE};
pub use config::GridConfig;
pub use error::GridError;
pub use geom::{Point, Range, manhattan};
pub use grid::Grid;
