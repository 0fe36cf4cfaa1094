//! Command-line settings for the demo.

use clap::Parser;
use reach_core::{GridConfig, Point};

/// Movement range and cheapest route on a random weighted grid.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "reach-demo", version)]
pub struct Args {
    /// Grid columns
    #[arg(long, default_value_t = 40)]
    pub cols: i32,

    /// Grid rows
    #[arg(long, default_value_t = 20)]
    pub rows: i32,

    /// Traversal costs are drawn from 1..=N
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub weight: i32,

    /// Seed for reproducible costs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Movement budget
    #[arg(long, value_name = "N", default_value_t = 10, allow_negative_numbers = true)]
    pub budget: i32,

    /// Search origin (default: grid centre)
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub origin: Option<Point>,

    /// Reconstruct the route to this cell
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub target: Option<Point>,

    /// Place an obstacle (repeatable)
    #[arg(long = "block", value_name = "X,Y", value_parser = parse_point)]
    pub blocks: Vec<Point>,
}

impl Args {
    /// Grid settings taken from the flags.
    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            columns: self.cols,
            rows: self.rows,
            max_weight: self.weight,
            seed: self.seed,
        }
    }

    /// The configured origin, or the centre of the grid.
    pub fn origin_or_centre(&self) -> Point {
        self.origin.unwrap_or(Point::new(self.cols / 2, self.rows / 2))
    }
}

/// Parse `X,Y`.
fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("bad coordinate {v:?}: {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}
