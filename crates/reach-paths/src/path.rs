use reach_core::{Grid, GridError, Point};

/// Result of walking predecessor links from a target back to the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathOutcome {
    /// The route, origin first and target last.
    Found(Vec<Point>),
    /// The target was not reached by the last search.
    NoPath,
}

impl PathOutcome {
    /// The route, if one was found.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::Found(p) => Some(p),
            Self::NoPath => None,
        }
    }

    /// Whether a route was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Reconstruct the route from `source` to `target` out of the predecessor
/// links left by the last search, and mark it with the `on_path` flag.
///
/// The last [`compute_reachable`](crate::BoundedSearch::compute_reachable)
/// must have used `source` as its origin. Calling this against another
/// origin's results is a usage error: it may yield `NoPath` or a route that
/// is not optimal from `source`.
///
/// Path markers are cleared first. A target the search did not reach yields
/// [`PathOutcome::NoPath`], never a partial route, and leaves no markers set.
/// Only out-of-bounds coordinates are errors.
pub fn reconstruct(
    grid: &mut Grid,
    source: Point,
    target: Point,
) -> Result<PathOutcome, GridError> {
    let si = grid.index_of(source)?;
    let ti = grid.index_of(target)?;
    grid.reset_all_path_markers();

    if grid.cell(ti).accumulated_cost().is_none() {
        log::debug!("no path from {source} to {target}: target not reached");
        return Ok(PathOutcome::NoPath);
    }

    // Walked target-first; a valid chain never exceeds the cell count.
    let mut chain = vec![ti];
    let mut ci = ti;
    while ci != si {
        match grid.cell(ci).predecessor() {
            Some(pi) if chain.len() < grid.len() => {
                chain.push(pi);
                ci = pi;
            }
            _ => {
                log::debug!(
                    "no path from {source} to {target}: chain ends at {}",
                    grid.point_of(ci)
                );
                return Ok(PathOutcome::NoPath);
            }
        }
    }

    for &i in &chain {
        grid.mark_on_path(i);
    }
    chain.reverse();
    let path: Vec<Point> = chain.into_iter().map(|i| grid.point_of(i)).collect();
    log::debug!("path from {source} to {target}: {} cells", path.len());
    Ok(PathOutcome::Found(path))
}
