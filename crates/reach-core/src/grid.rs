//! A fixed-size arena of weighted [`Cell`]s with precomputed adjacency.
//!
//! Cells live in a single row-major `Vec`; neighbours and predecessors are
//! indices into it. The grid is built once and its dimensions never change.
//! Only the per-cell search, path and obstacle flags churn afterwards.

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

use crate::cell::Cell;
use crate::config::GridConfig;
use crate::error::GridError;
use crate::geom::{Point, Range};

/// Owning arena of grid cells.
///
/// With the `serde` feature a grid serializes as its dimensions, traversal
/// costs and obstacle coordinates. Deserializing rebuilds the adjacency and
/// applies the same checks as [`Grid::from_weights`]; search results are
/// not persisted.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr", into = "GridRepr")
)]
pub struct Grid {
    cells: Vec<Cell>,
    columns: i32,
    rows: i32,
}

impl Grid {
    /// Build a `columns × rows` grid with costs drawn uniformly from
    /// `1..=max_weight` using the thread RNG.
    pub fn build(columns: i32, rows: i32, max_weight: i32) -> Result<Self, GridError> {
        Self::build_with_rng(columns, rows, max_weight, &mut rand::rng())
    }

    /// Like [`Grid::build`], drawing costs from `rng`.
    pub fn build_with_rng<R: Rng + ?Sized>(
        columns: i32,
        rows: i32,
        max_weight: i32,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let len = cell_count(columns, rows)?;
        if max_weight < 1 {
            return Err(GridError::InvalidWeight(max_weight));
        }
        let mut weights = reserve(len, columns, rows)?;
        weights.extend((0..len).map(|_| rng.random_range(1..=max_weight)));
        Self::assemble(columns, rows, &weights)
    }

    /// Build a grid from explicit row-major costs (`weights[y * columns + x]`).
    pub fn from_weights(columns: i32, rows: i32, weights: &[i32]) -> Result<Self, GridError> {
        let expected = cell_count(columns, rows)?;
        if weights.len() != expected {
            return Err(GridError::WeightCountMismatch {
                expected,
                found: weights.len(),
            });
        }
        if let Some(&w) = weights.iter().find(|&&w| w < 1) {
            return Err(GridError::InvalidWeight(w));
        }
        Self::assemble(columns, rows, weights)
    }

    /// Build a grid where every cell costs `weight`.
    pub fn uniform(columns: i32, rows: i32, weight: i32) -> Result<Self, GridError> {
        let len = cell_count(columns, rows)?;
        let mut weights = reserve(len, columns, rows)?;
        weights.resize(len, weight);
        Self::from_weights(columns, rows, &weights)
    }

    /// Build a grid from a [`GridConfig`]. A configured seed makes the costs
    /// reproducible.
    pub fn from_config(cfg: &GridConfig) -> Result<Self, GridError> {
        match cfg.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Self::build_with_rng(cfg.columns, cfg.rows, cfg.max_weight, &mut rng)
            }
            None => Self::build(cfg.columns, cfg.rows, cfg.max_weight),
        }
    }

    fn assemble(columns: i32, rows: i32, weights: &[i32]) -> Result<Self, GridError> {
        let mut cells = reserve(weights.len(), columns, rows)?;
        cells.extend(
            Range::new(0, 0, columns, rows)
                .iter()
                .zip(weights)
                .map(|(p, &w)| Cell::new(p, w)),
        );
        let mut grid = Self {
            cells,
            columns,
            rows,
        };
        // Adjacency is derived only once every cell exists.
        for i in 0..grid.cells.len() {
            let p = grid.point_of(i);
            for n in p.cardinals() {
                if let Some(ni) = grid.idx(n) {
                    grid.cells[i].push_neighbor(ni);
                }
            }
        }
        log::debug!("built {columns}x{rows} grid");
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Dimensions and indexing
    // -----------------------------------------------------------------------

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// The coordinate range `[0, columns) × [0, rows)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.columns, self.rows)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a successfully built grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.columns as usize) + p.x as usize)
    }

    /// Flat index of `p`, failing with [`GridError::OutOfBounds`].
    pub fn index_of(&self, p: Point) -> Result<usize, GridError> {
        self.idx(p).ok_or(GridError::OutOfBounds {
            pos: p,
            bounds: self.bounds(),
        })
    }

    /// Coordinate of flat index `idx`.
    #[inline]
    pub fn point_of(&self, idx: usize) -> Point {
        let w = self.columns as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// The cell at `p`.
    pub fn cell_at(&self, p: Point) -> Result<&Cell, GridError> {
        let i = self.index_of(p)?;
        Ok(&self.cells[i])
    }

    /// The cell at flat index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Neighbour indices of the cell at `idx`, in west/east/south/north order.
    #[inline]
    pub fn neighbors_of(&self, idx: usize) -> &[usize] {
        self.cells[idx].neighbors()
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major iterator over all cells.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    // -----------------------------------------------------------------------
    // Obstacles and resets
    // -----------------------------------------------------------------------

    /// Mark or clear an obstacle. Search results computed earlier are not
    /// updated; run a new search to see the effect.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) -> Result<(), GridError> {
        let i = self.index_of(p)?;
        self.cells[i].set_blocked(blocked);
        Ok(())
    }

    /// Flip the obstacle flag at `p`, returning the new value.
    pub fn toggle_blocked(&mut self, p: Point) -> Result<bool, GridError> {
        let i = self.index_of(p)?;
        let blocked = !self.cells[i].is_blocked();
        self.cells[i].set_blocked(blocked);
        Ok(blocked)
    }

    /// Forget every cost, predecessor and visited flag.
    pub fn reset_all_path_state(&mut self) {
        for c in &mut self.cells {
            c.reset_path_state();
        }
    }

    /// Remove every obstacle.
    pub fn reset_all_blocked(&mut self) {
        for c in &mut self.cells {
            c.set_blocked(false);
        }
    }

    /// Clear every path highlight.
    pub fn reset_all_path_markers(&mut self) {
        for c in &mut self.cells {
            c.set_on_path(false);
        }
    }

    // -----------------------------------------------------------------------
    // Search-state writes
    // -----------------------------------------------------------------------
    //
    // Public so the search and reconstruction crates can drive them. Each
    // writer checks its preconditions and returns `false`, leaving the grid
    // unchanged, when the write would put a blocked cell on a route, link
    // non-adjacent cells, or record a cost that does not follow from the
    // predecessor.

    /// Make `idx` a search origin: cost 0, no predecessor. Refused for
    /// blocked cells.
    #[doc(hidden)]
    pub fn mark_source(&mut self, idx: usize) -> bool {
        match self.cells.get_mut(idx) {
            Some(c) if !c.is_blocked() => {
                c.set_reached(0, None);
                true
            }
            _ => false,
        }
    }

    /// Record a cheaper route into `idx` coming from the adjacent, reached
    /// cell `from`. `cost` must equal the cost of `from` plus the traversal
    /// cost of `idx` and beat the cost already recorded. Cost and
    /// predecessor are always written together.
    #[doc(hidden)]
    pub fn relax(&mut self, idx: usize, cost: i32, from: usize) -> bool {
        let (Some(target), Some(pred)) = (self.cells.get(idx), self.cells.get(from)) else {
            return false;
        };
        let valid = !target.is_blocked()
            && !pred.is_blocked()
            && target.neighbors().contains(&from)
            && pred.accumulated_cost().map(|c| c.saturating_add(target.traversal_cost()))
                == Some(cost)
            && cost < target.raw_cost();
        if valid {
            self.cells[idx].set_reached(cost, Some(from));
        }
        valid
    }

    /// Flag `idx` as finalized by the search. Refused for blocked or
    /// unreached cells.
    #[doc(hidden)]
    pub fn mark_visited(&mut self, idx: usize) -> bool {
        match self.cells.get_mut(idx) {
            Some(c) if !c.is_blocked() && c.accumulated_cost().is_some() => {
                c.set_visited();
                true
            }
            _ => false,
        }
    }

    /// Flag `idx` as part of the reconstructed path. Refused for unreached
    /// cells.
    #[doc(hidden)]
    pub fn mark_on_path(&mut self, idx: usize) -> bool {
        match self.cells.get_mut(idx) {
            Some(c) if c.accumulated_cost().is_some() => {
                c.set_on_path(true);
                true
            }
            _ => false,
        }
    }
}

/// Number of cells in a `columns × rows` grid, rejecting non-positive
/// dimensions and products that do not fit in `usize`.
fn cell_count(columns: i32, rows: i32) -> Result<usize, GridError> {
    if columns <= 0 || rows <= 0 {
        return Err(GridError::InvalidDimensions { columns, rows });
    }
    (columns as usize)
        .checked_mul(rows as usize)
        .ok_or(GridError::InvalidDimensions { columns, rows })
}

/// An empty `Vec` able to hold `len` items, or `InvalidDimensions` when the
/// allocation cannot be made.
fn reserve<T>(len: usize, columns: i32, rows: i32) -> Result<Vec<T>, GridError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| GridError::InvalidDimensions { columns, rows })?;
    Ok(v)
}

/// Serialized form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    columns: i32,
    rows: i32,
    weights: Vec<i32>,
    #[serde(default)]
    blocked: Vec<Point>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let mut grid = Grid::from_weights(repr.columns, repr.rows, &repr.weights)?;
        for p in repr.blocked {
            grid.set_blocked(p, true)?;
        }
        Ok(grid)
    }
}

#[cfg(feature = "serde")]
impl From<Grid> for GridRepr {
    fn from(grid: Grid) -> Self {
        Self {
            columns: grid.columns,
            rows: grid.rows,
            weights: grid.cells.iter().map(Cell::traversal_cost).collect(),
            blocked: grid
                .cells
                .iter()
                .filter(|c| c.is_blocked())
                .map(Cell::pos)
                .collect(),
        }
    }
}
