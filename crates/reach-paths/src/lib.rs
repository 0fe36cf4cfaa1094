//! Movement-range search for weighted grids.
//!
//! This crate computes which cells of a [`reach_core::Grid`] can be reached
//! from an origin within a movement budget, and reconstructs the cheapest
//! route to any of them:
//!
//! - **Bounded Dijkstra** over per-cell traversal costs
//!   ([`BoundedSearch::compute_reachable`])
//! - **Path reconstruction** from predecessor links ([`reconstruct`])
//! - **Session context** for interactive front ends ([`Planner`])
//!
//! Results live on the grid's cells (cost, predecessor, visited and path
//! flags), so a renderer reads them straight from the grid.
//!
//! # Determinism
//!
//! Neighbours are explored west, east, south, north, and frontier entries
//! with equal cost are expanded in insertion order. Identical grids
//! therefore always produce identical costs and predecessors.

mod error;
mod frontier;
mod path;
mod planner;
mod search;

pub use error::{PlannerError, SearchError};
pub use path::{PathOutcome, reconstruct};
pub use planner::{DEFAULT_BUDGET, Planner};
pub use search::{BoundedSearch, Reached};
