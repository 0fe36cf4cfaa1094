use reach_core::{Grid, Point};

use crate::error::SearchError;
use crate::frontier::Frontier;

/// A cell finalized by [`BoundedSearch::compute_reachable`], with its cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reached {
    pub pos: Point,
    pub cost: i32,
}

/// Budget-limited Dijkstra search over a [`Grid`].
///
/// `BoundedSearch` owns the frontier and result buffers so that repeated
/// searches incur no allocations after the first one. The results
/// themselves are written into the grid's cells.
#[derive(Debug, Default)]
pub struct BoundedSearch {
    frontier: Frontier,
    reached: Vec<Reached>,
    nbuf: Vec<usize>,
    last: Option<(Point, i32)>,
}

impl BoundedSearch {
    /// Create a search engine with empty caches.
    pub fn new() -> Self {
        Self {
            nbuf: Vec::with_capacity(4),
            ..Self::default()
        }
    }

    /// Compute the minimal cost from `source` to every cell reachable within
    /// `budget` through unblocked cells.
    ///
    /// All path state on the grid is reset first. On return every reached
    /// cell has its cost and predecessor recorded and is marked visited;
    /// everything else is unreached. Blocked cells are never entered.
    ///
    /// Returns the reached cells in the order they were finalized. The
    /// request is validated before the grid is touched, so an error leaves
    /// the previous results in place.
    pub fn compute_reachable(
        &mut self,
        grid: &mut Grid,
        source: Point,
        budget: i32,
    ) -> Result<&[Reached], SearchError> {
        if budget < 0 {
            return Err(SearchError::InvalidBudget(budget));
        }
        let si = grid.index_of(source)?;
        if grid.cell(si).is_blocked() {
            return Err(SearchError::SourceBlocked(source));
        }

        grid.reset_all_path_state();
        self.frontier.clear();
        self.reached.clear();

        grid.mark_source(si);
        self.frontier.push(0, si);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = self.frontier.pop() {
            let ci = current.idx;
            let current_cost = grid.cell(ci).raw_cost();
            // Superseded by a cheaper entry pushed later.
            if current.cost != current_cost {
                continue;
            }

            nbuf.clear();
            nbuf.extend_from_slice(grid.neighbors_of(ci));

            for &ni in nbuf.iter() {
                // The grid refuses blocked cells and routes that are not
                // strictly cheaper.
                let candidate = current_cost.saturating_add(grid.cell(ni).traversal_cost());
                if candidate <= budget && grid.relax(ni, candidate, ci) {
                    self.frontier.push(candidate, ni);
                }
            }

            grid.mark_visited(ci);
            self.reached.push(Reached {
                pos: grid.point_of(ci),
                cost: current_cost,
            });
        }

        self.nbuf = nbuf;
        self.last = Some((source, budget));
        log::debug!(
            "search from {source} with budget {budget}: {} cells reached",
            self.reached.len()
        );
        Ok(&self.reached)
    }

    /// Cells finalized by the last successful search, in finalization order.
    #[inline]
    pub fn reached(&self) -> &[Reached] {
        &self.reached
    }

    /// Origin of the last successful search.
    #[inline]
    pub fn last_source(&self) -> Option<Point> {
        self.last.map(|(p, _)| p)
    }

    /// Budget of the last successful search.
    #[inline]
    pub fn last_budget(&self) -> Option<i32> {
        self.last.map(|(_, b)| b)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;
    use reach_core::{GridError, UNREACHABLE, manhattan};

    /// Unbounded shortest-path costs by repeated relaxation, ignoring
    /// blocked cells. Used as the reference for the engine.
    pub(crate) fn reference_costs(grid: &Grid, source: Point) -> Vec<i32> {
        let mut dist = vec![UNREACHABLE; grid.len()];
        dist[grid.idx(source).unwrap()] = 0;
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..grid.len() {
                if dist[i] == UNREACHABLE {
                    continue;
                }
                for &n in grid.neighbors_of(i) {
                    let c = grid.cell(n);
                    if c.is_blocked() {
                        continue;
                    }
                    let cand = dist[i] + c.traversal_cost();
                    if cand < dist[n] {
                        dist[n] = cand;
                        changed = true;
                    }
                }
            }
        }
        dist
    }

    /// Per-cell `(cost, predecessor, visited)` snapshot.
    pub(crate) fn snapshot(grid: &Grid) -> Vec<(i32, Option<usize>, bool)> {
        grid.iter()
            .map(|c| (c.raw_cost(), c.predecessor(), c.is_visited()))
            .collect()
    }

    /// Strategy for a small random grid with obstacles, an unblocked origin
    /// and a budget.
    pub(crate) fn arb_scene() -> impl Strategy<Value = (Grid, Point, i32)> {
        (1i32..8, 1i32..8)
            .prop_flat_map(|(w, h)| {
                let len = (w * h) as usize;
                (
                    Just((w, h)),
                    prop::collection::vec(1i32..10, len),
                    prop::collection::vec(prop::bool::weighted(0.2), len),
                    0..w,
                    0..h,
                    0i32..40,
                )
            })
            .prop_map(|((w, h), weights, blocked, sx, sy, budget)| {
                let mut grid = Grid::from_weights(w, h, &weights).unwrap();
                for (i, &b) in blocked.iter().enumerate() {
                    let p = grid.point_of(i);
                    grid.set_blocked(p, b).unwrap();
                }
                let source = Point::new(sx, sy);
                grid.set_blocked(source, false).unwrap();
                (grid, source, budget)
            })
    }

    #[test]
    fn uniform_3x3_budget_1_is_a_plus_shape() {
        let mut g = Grid::uniform(3, 3, 1).unwrap();
        let mut s = BoundedSearch::new();
        let src = Point::new(1, 1);
        let reached = s.compute_reachable(&mut g, src, 1).unwrap();
        assert_eq!(reached.len(), 5);
        assert_eq!(reached[0], Reached { pos: src, cost: 0 });

        for c in g.iter() {
            let d = manhattan(c.pos(), src);
            if d <= 1 {
                assert!(c.is_visited(), "{} should be visited", c.pos());
                assert_eq!(c.accumulated_cost(), Some(d));
            } else {
                assert!(!c.is_visited());
                assert_eq!(c.accumulated_cost(), None);
            }
        }
        assert!(g.cell_at(src).unwrap().is_source());
    }

    #[test]
    fn blocked_cell_is_routed_around() {
        let mut g = Grid::uniform(3, 3, 1).unwrap();
        g.set_blocked(Point::new(1, 0), true).unwrap();
        let mut s = BoundedSearch::new();
        s.compute_reachable(&mut g, Point::new(1, 1), 2).unwrap();

        let blocked = g.cell_at(Point::new(1, 0)).unwrap();
        assert_eq!(blocked.accumulated_cost(), None);
        assert!(!blocked.is_visited());

        for corner in [Point::new(0, 0), Point::new(2, 0)] {
            let c = g.cell_at(corner).unwrap();
            assert_eq!(c.accumulated_cost(), Some(2));
            let via = g.point_of(c.predecessor().unwrap());
            assert_eq!(via, Point::new(corner.x, 1));
        }
    }

    #[test]
    fn equal_cost_ties_follow_adjacency_order() {
        // (1, 1) is reachable at cost 2 through both (0, 1) and (1, 0).
        // (1, 0) is pushed first (east comes before south), so it is
        // finalized first and claims (1, 1).
        let mut g = Grid::uniform(2, 2, 1).unwrap();
        let mut s = BoundedSearch::new();
        let order: Vec<Point> = s
            .compute_reachable(&mut g, Point::ZERO, 10)
            .unwrap()
            .iter()
            .map(|r| r.pos)
            .collect();
        assert_eq!(
            order,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(1, 1)
            ]
        );
        let far = g.cell_at(Point::new(1, 1)).unwrap();
        assert_eq!(far.predecessor(), g.idx(Point::new(1, 0)));
    }

    #[test]
    fn expensive_cell_is_bypassed() {
        // The direct route east crosses a cost-9 cell; the detour through
        // the bottom row reaches (3, 0) far cheaper.
        #[rustfmt::skip]
        let weights = [
            1, 9, 1, 1,
            1, 1, 1, 9,
        ];
        let mut g = Grid::from_weights(4, 2, &weights).unwrap();
        let mut s = BoundedSearch::new();
        let reached = s.compute_reachable(&mut g, Point::ZERO, 20).unwrap().to_vec();
        assert_eq!(reached.len(), 8);
        let mut seen = std::collections::HashSet::new();
        assert!(reached.iter().all(|r| seen.insert(r.pos)));
        assert!(reached.windows(2).all(|w| w[0].cost <= w[1].cost));

        let far = g.cell_at(Point::new(3, 0)).unwrap();
        assert_eq!(far.accumulated_cost(), Some(5));
        assert_eq!(far.predecessor(), g.idx(Point::new(2, 0)));
        assert_eq!(g.cell_at(Point::new(1, 0)).unwrap().accumulated_cost(), Some(9));
        assert_eq!(g.cell_at(Point::new(3, 1)).unwrap().accumulated_cost(), Some(12));
    }

    #[test]
    fn zero_budget_reaches_only_the_source() {
        let mut g = Grid::uniform(4, 4, 1).unwrap();
        let mut s = BoundedSearch::new();
        let reached = s.compute_reachable(&mut g, Point::new(2, 2), 0).unwrap();
        assert_eq!(reached, &[Reached { pos: Point::new(2, 2), cost: 0 }]);
        assert_eq!(g.iter().filter(|c| c.is_visited()).count(), 1);
    }

    #[test]
    fn new_search_discards_previous_results() {
        let mut g = Grid::uniform(5, 1, 1).unwrap();
        let mut s = BoundedSearch::new();
        s.compute_reachable(&mut g, Point::new(0, 0), 4).unwrap();
        assert!(g.iter().all(|c| c.is_visited()));

        s.compute_reachable(&mut g, Point::new(4, 0), 1).unwrap();
        let visited: Vec<_> = g.iter().filter(|c| c.is_visited()).map(|c| c.pos()).collect();
        assert_eq!(visited, vec![Point::new(3, 0), Point::new(4, 0)]);
        assert_eq!(g.cell_at(Point::ZERO).unwrap().accumulated_cost(), None);
        assert_eq!(g.cell_at(Point::ZERO).unwrap().predecessor(), None);
        assert_eq!(s.last_source(), Some(Point::new(4, 0)));
        assert_eq!(s.last_budget(), Some(1));
    }

    #[test]
    fn invalid_requests_leave_grid_untouched() {
        let mut g = Grid::uniform(3, 3, 1).unwrap();
        let mut s = BoundedSearch::new();
        s.compute_reachable(&mut g, Point::new(1, 1), 1).unwrap();
        let before = snapshot(&g);

        assert_eq!(
            s.compute_reachable(&mut g, Point::new(1, 1), -1).unwrap_err(),
            SearchError::InvalidBudget(-1)
        );
        assert_eq!(
            s.compute_reachable(&mut g, Point::new(3, 1), 5).unwrap_err(),
            SearchError::OutOfBounds(GridError::OutOfBounds {
                pos: Point::new(3, 1),
                bounds: g.bounds(),
            })
        );
        g.set_blocked(Point::new(0, 0), true).unwrap();
        assert_eq!(
            s.compute_reachable(&mut g, Point::new(0, 0), 5).unwrap_err(),
            SearchError::SourceBlocked(Point::new(0, 0))
        );

        assert_eq!(snapshot(&g), before);
        assert_eq!(s.last_source(), Some(Point::new(1, 1)));
    }

    #[test]
    fn huge_budget_does_not_overflow() {
        let mut g = Grid::uniform(3, 1, 1_000_000).unwrap();
        let mut s = BoundedSearch::new();
        let reached = s.compute_reachable(&mut g, Point::ZERO, i32::MAX).unwrap();
        assert_eq!(reached.len(), 3);
        assert_eq!(
            g.cell_at(Point::new(2, 0)).unwrap().accumulated_cost(),
            Some(2_000_000)
        );
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn costs_are_minimal_and_within_budget((mut grid, source, budget) in arb_scene()) {
            let expected = reference_costs(&grid, source);
            let mut s = BoundedSearch::new();
            let reached = s.compute_reachable(&mut grid, source, budget).unwrap().len();

            let mut visited = 0;
            for (i, c) in grid.iter().enumerate() {
                if expected[i] <= budget {
                    prop_assert!(c.is_visited(), "{} should be reached", c.pos());
                    prop_assert_eq!(c.raw_cost(), expected[i]);
                    visited += 1;
                } else {
                    prop_assert!(!c.is_visited());
                    prop_assert_eq!(c.accumulated_cost(), None);
                }
            }
            prop_assert_eq!(visited, reached);
        }

        #[test]
        fn blocked_cells_are_never_entered((mut grid, source, budget) in arb_scene()) {
            let mut s = BoundedSearch::new();
            s.compute_reachable(&mut grid, source, budget).unwrap();
            for c in grid.iter() {
                if let Some(p) = c.predecessor() {
                    prop_assert!(!grid.cell(p).is_blocked());
                }
                if c.is_blocked() {
                    prop_assert!(!c.is_visited());
                    prop_assert_eq!(c.accumulated_cost(), None);
                }
            }
        }

        #[test]
        fn larger_budget_is_monotone((mut grid, source, budget) in arb_scene(), extra in 0i32..20) {
            let mut s = BoundedSearch::new();
            s.compute_reachable(&mut grid, source, budget).unwrap();
            let small = snapshot(&grid);
            s.compute_reachable(&mut grid, source, budget + extra).unwrap();
            let large = snapshot(&grid);
            for (a, b) in small.iter().zip(&large) {
                if a.2 {
                    prop_assert!(b.2);
                    prop_assert!(b.0 <= a.0);
                }
            }
        }

        #[test]
        fn repeated_searches_are_identical((mut grid, source, budget) in arb_scene()) {
            let mut s = BoundedSearch::new();
            let first = s.compute_reachable(&mut grid, source, budget).unwrap().to_vec();
            let state = snapshot(&grid);
            let mut fresh = BoundedSearch::new();
            let second = fresh.compute_reachable(&mut grid, source, budget).unwrap().to_vec();
            prop_assert_eq!(first, second);
            prop_assert_eq!(state, snapshot(&grid));
        }
    }
}
