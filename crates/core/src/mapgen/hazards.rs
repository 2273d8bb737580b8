//! Difficulty-scaled trap and collapsible-floor placement.

use crate::grid::Grid;
use crate::types::{CellKind, TrapKind};

use super::grid::{HAZARD_SAFE_DISTANCE, safe_cells};
use super::model::{CollapsibleFloor, HazardLayout, Trap};
use super::seed::MazeRng;

pub fn trap_probability(difficulty: u32) -> f64 {
    0.01 + f64::from(difficulty) * 0.005
}

pub fn collapsible_floor_probability(difficulty: u32) -> f64 {
    0.005 + f64::from(difficulty) * 0.01
}

/// Rolls a trap and, independently, a collapsible floor for every safe cell.
/// Collapsible floors are written back into `grid`.
pub fn place_traps(grid: &mut Grid, difficulty: u32, rng: &mut MazeRng) -> HazardLayout {
    let trap_chance = trap_probability(difficulty);
    let floor_chance = collapsible_floor_probability(difficulty);

    let mut layout = HazardLayout::default();
    for pos in safe_cells(grid, HAZARD_SAFE_DISTANCE) {
        if rng.chance(trap_chance) {
            layout.traps.push(Trap { pos, kind: TrapKind::Spike });
        }
        if rng.chance(floor_chance) {
            layout.collapsible_floors.push(CollapsibleFloor { pos, active: true });
            grid.set_cell(pos, CellKind::CollapsibleFloor);
        }
    }
    layout
}
