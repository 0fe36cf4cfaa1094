//! Terminal demo: movement range and cheapest route on a random weighted grid.
//!
//! Run: cargo run --bin reach-demo -- --seed 7 --budget 12 --target 5,5

mod args;
mod render;

use std::io;

use clap::Parser;
use reach_core::{Grid, manhattan};
use reach_paths::{PathOutcome, Planner};

use crate::args::Args;

fn run(cfg: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let grid = Grid::from_config(&cfg.grid_config())?;
    let mut planner = Planner::new(grid, cfg.budget)?;
    for &p in &cfg.blocks {
        planner.set_blocked(p, true)?;
    }

    let origin = cfg.origin_or_centre();
    let reached = planner.select_origin(origin)?;
    println!("origin {origin}, budget {}: {reached} cells in reach", planner.budget());

    if let Some(target) = cfg.target {
        match planner.select_target(target)? {
            PathOutcome::Found(path) => {
                let cost = planner.grid().cell_at(target)?.accumulated_cost().unwrap_or(0);
                println!(
                    "route to {target}: {} steps, cost {cost} (distance {})",
                    path.len() - 1,
                    manhattan(origin, target)
                );
            }
            PathOutcome::NoPath => println!("no route to {target} within budget"),
        }
    }

    render::draw(&mut io::stdout(), planner.grid(), cfg.target, cfg.weight)?;
    Ok(())
}

fn main() {
    let cfg = Args::parse();
    if let Err(e) = run(&cfg) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
