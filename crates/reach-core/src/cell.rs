//! The [`Cell`] type — one grid location and its search state.

use smallvec::SmallVec;

use crate::geom::Point;

/// Sentinel cost meaning "not reached by the last search".
pub const UNREACHABLE: i32 = i32::MAX;

/// A single grid location.
///
/// The position and traversal cost are fixed when the grid is built. The
/// remaining fields are search state: cost, predecessor and `visited` are
/// written by the search engine, `on_path` by path reconstruction, and
/// `blocked` by obstacle edits. Predecessor and neighbours are indices into
/// the owning [`Grid`](crate::Grid).
///
/// Cells serialize for inspection only; grids are restored through
/// [`Grid`](crate::Grid)'s own serialized form.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cell {
    pos: Point,
    weight: i32,
    cost: i32,
    predecessor: Option<usize>,
    visited: bool,
    blocked: bool,
    on_path: bool,
    neighbors: SmallVec<[usize; 4]>,
}

impl Cell {
    pub(crate) fn new(pos: Point, weight: i32) -> Self {
        Self {
            pos,
            weight,
            cost: UNREACHABLE,
            predecessor: None,
            visited: false,
            blocked: false,
            on_path: false,
            neighbors: SmallVec::new(),
        }
    }

    /// Grid coordinate of this cell.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Cost paid to step *into* this cell.
    #[inline]
    pub fn traversal_cost(&self) -> i32 {
        self.weight
    }

    /// Minimal cost from the last search origin, or `None` if the cell was
    /// not reached within budget.
    #[inline]
    pub fn accumulated_cost(&self) -> Option<i32> {
        (self.cost != UNREACHABLE).then_some(self.cost)
    }

    /// Raw accumulated cost, [`UNREACHABLE`] when not reached.
    #[inline]
    pub fn raw_cost(&self) -> i32 {
        self.cost
    }

    /// Arena index of the cell this one was reached from.
    #[inline]
    pub fn predecessor(&self) -> Option<usize> {
        self.predecessor
    }

    /// Whether the last search finalized this cell.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Whether this cell is an obstacle.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Whether this cell lies on the last reconstructed path.
    #[inline]
    pub fn is_on_path(&self) -> bool {
        self.on_path
    }

    /// Whether this cell was the origin of the last search.
    #[inline]
    pub fn is_source(&self) -> bool {
        self.predecessor.is_none() && self.cost == 0
    }

    /// Arena indices of the orthogonal neighbours, west/east/south/north
    /// order with out-of-bounds directions omitted.
    #[inline]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    pub(crate) fn push_neighbor(&mut self, idx: usize) {
        self.neighbors.push(idx);
    }

    pub(crate) fn reset_path_state(&mut self) {
        self.cost = UNREACHABLE;
        self.predecessor = None;
        self.visited = false;
    }

    pub(crate) fn set_reached(&mut self, cost: i32, predecessor: Option<usize>) {
        self.cost = cost;
        self.predecessor = predecessor;
    }

    pub(crate) fn set_visited(&mut self) {
        self.visited = true;
    }

    pub(crate) fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    pub(crate) fn set_on_path(&mut self, on_path: bool) {
        self.on_path = on_path;
    }
}
