//! Cell-selection primitives shared by hazard and entity placement.

use crate::grid::Grid;
use crate::types::{CellKind, Pos};

/// Hazards stay strictly farther than this from Start and Exit.
pub const HAZARD_SAFE_DISTANCE: f64 = 3.0;
/// Enemies spawn strictly farther than this from Start and Exit.
pub const ENEMY_SAFE_DISTANCE: f64 = 4.0;

/// `Open` cells whose distance to both Start and Exit exceeds `min_distance`, in row-major order.
pub(super) fn safe_cells(grid: &Grid, min_distance: f64) -> Vec<Pos> {
    let start = grid.start();
    let exit = grid.exit();
    grid.positions()
        .filter(|&pos| grid.cell_at(pos) == CellKind::Open)
        .filter(|&pos| pos.euclidean(start) > min_distance && pos.euclidean(exit) > min_distance)
        .collect()
}

/// Interior walls touching at least one `Open` corridor cell.
pub(super) fn door_candidates(grid: &Grid) -> Vec<Pos> {
    let mut candidates = Vec::new();
    for y in 1..(grid.height() - 1) {
        for x in 1..(grid.width() - 1) {
            let pos = Pos { y: y as i32, x: x as i32 };
            if grid.cell_at(pos) != CellKind::Wall {
                continue;
            }
            if pos.neighbors().iter().any(|&next| grid.cell_at(next) == CellKind::Open) {
                candidates.push(pos);
            }
        }
    }
    candidates
}
