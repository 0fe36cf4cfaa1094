//! Session context tying a grid, a search engine and the current selection
//! together.

use reach_core::{Grid, Point};

use crate::error::{PlannerError, SearchError};
use crate::path::{PathOutcome, reconstruct};
use crate::search::BoundedSearch;

/// Default movement budget for a fresh planner.
pub const DEFAULT_BUDGET: i32 = 150;

/// Owns a [`Grid`] and serializes every mutation of it.
///
/// A presentation layer drives the planner with user actions (pick an
/// origin, pick a target, toggle an obstacle, clear) and reads cells back
/// through [`Planner::grid`] for rendering.
#[derive(Debug)]
pub struct Planner {
    grid: Grid,
    search: BoundedSearch,
    origin: Option<Point>,
    budget: i32,
}

impl Planner {
    /// Create a planner over `grid` with the given movement budget.
    pub fn new(grid: Grid, budget: i32) -> Result<Self, PlannerError> {
        if budget < 0 {
            return Err(SearchError::InvalidBudget(budget).into());
        }
        Ok(Self {
            grid,
            search: BoundedSearch::new(),
            origin: None,
            budget,
        })
    }

    /// Read access for rendering.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Give the grid back, ending the session.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// The origin of the current search results, if still valid.
    #[inline]
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// The movement budget used for searches.
    #[inline]
    pub fn budget(&self) -> i32 {
        self.budget
    }

    /// Change the movement budget. With an origin selected, the search is
    /// run again so the displayed range matches.
    pub fn set_budget(&mut self, budget: i32) -> Result<(), PlannerError> {
        if budget < 0 {
            log::warn!("rejected movement budget {budget}");
            return Err(SearchError::InvalidBudget(budget).into());
        }
        self.budget = budget;
        if let Some(origin) = self.origin {
            self.select_origin(origin)?;
        }
        Ok(())
    }

    /// Search from `p` with the current budget. Returns how many cells are
    /// within reach.
    pub fn select_origin(&mut self, p: Point) -> Result<usize, PlannerError> {
        let reached = match self.search.compute_reachable(&mut self.grid, p, self.budget) {
            Ok(r) => r.len(),
            Err(e) => {
                log::warn!("rejected origin {p}: {e}");
                return Err(e.into());
            }
        };
        self.grid.reset_all_path_markers();
        self.origin = Some(p);
        Ok(reached)
    }

    /// Reconstruct the route from the selected origin to `p`.
    pub fn select_target(&mut self, p: Point) -> Result<PathOutcome, PlannerError> {
        let Some(origin) = self.origin else {
            log::warn!("target {p} selected before any origin");
            return Err(PlannerError::NoOrigin);
        };
        Ok(reconstruct(&mut self.grid, origin, p)?)
    }

    /// Mark or clear an obstacle. Current results become stale, so the
    /// origin is forgotten until a new one is selected.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) -> Result<(), PlannerError> {
        self.grid.set_blocked(p, blocked)?;
        self.origin = None;
        Ok(())
    }

    /// Flip the obstacle at `p`, returning the new state. Forgets the origin
    /// like [`Planner::set_blocked`].
    pub fn toggle_blocked(&mut self, p: Point) -> Result<bool, PlannerError> {
        let blocked = self.grid.toggle_blocked(p)?;
        self.origin = None;
        Ok(blocked)
    }

    /// Drop search results, path markers and obstacles.
    pub fn clear(&mut self) {
        self.grid.reset_all_path_state();
        self.grid.reset_all_path_markers();
        self.grid.reset_all_blocked();
        self.origin = None;
    }
}
