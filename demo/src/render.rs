//! Turns grid state into a coloured terminal frame.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use reach_core::{Cell, Grid, Point};

/// An RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const DEFAULT: Rgb = Rgb(100, 100, 100);
pub const SOURCE: Rgb = Rgb(255, 0, 20);
pub const BLOCKED: Rgb = Rgb(0, 0, 0);
pub const VISITED: Rgb = Rgb(40, 150, 80);
pub const PATH: Rgb = Rgb(150, 40, 20);
pub const TARGET: Rgb = Rgb(0, 20, 255);

/// Strongest darkening applied to the most expensive cells, out of 255.
const MAX_SHADE: u32 = 200;

fn to_ct_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

/// Base colour of a cell before cost shading.
pub fn base_color(cell: &Cell, target: Option<Point>) -> Rgb {
    if cell.is_source() {
        SOURCE
    } else if target == Some(cell.pos()) && cell.is_on_path() {
        TARGET
    } else if cell.is_blocked() {
        BLOCKED
    } else if cell.is_on_path() {
        PATH
    } else if cell.is_visited() {
        VISITED
    } else {
        DEFAULT
    }
}

/// Darken `c` in proportion to the cell's traversal cost, so cheap cells
/// stay bright and the costliest are darkest.
pub fn shade(c: Rgb, weight: i32, max_weight: i32) -> Rgb {
    let steps = max_weight.max(1) as u32;
    let level = (weight.clamp(1, max_weight.max(1)) - 1) as u32;
    let alpha = MAX_SHADE * level / steps;
    let f = |v: u8| (v as u32 * (255 - alpha) / 255) as u8;
    Rgb(f(c.0), f(c.1), f(c.2))
}

/// Write the grid as rows of two-character cells showing the traversal
/// cost over the state colour.
pub fn draw<W: Write>(
    out: &mut W,
    grid: &Grid,
    target: Option<Point>,
    max_weight: i32,
) -> io::Result<()> {
    for y in 0..grid.rows() {
        for x in 0..grid.columns() {
            let Some(i) = grid.idx(Point::new(x, y)) else {
                continue;
            };
            let cell = grid.cell(i);
            let bg = shade(
                base_color(cell, target),
                cell.traversal_cost(),
                max_weight,
            );
            let label = format!("{:>2}", cell.traversal_cost() % 100);
            queue!(
                out,
                SetForegroundColor(Color::White),
                SetBackgroundColor(to_ct_color(bg)),
                Print(label)
            )?;
        }
        queue!(out, ResetColor, Print("\n"))?;
    }
    out.flush()
}
