//! Point-in-cell movement legality and axis-separated sliding.

use std::f32::consts::FRAC_1_SQRT_2;

use crate::grid::Grid;
use crate::mapgen::Door;
use crate::types::{CellKind, Pos, Vec2};

/// Longest single sub-step along one axis, as a fraction of the tile size.
pub(super) const MAX_STEP_RATIO: f32 = 0.5;

/// Borrowed view of everything that blocks movement.
pub(super) struct Walls<'a> {
    pub(super) grid: &'a Grid,
    pub(super) doors: &'a [Door],
    pub(super) tile_size: f32,
}

impl Walls<'_> {
    pub(super) fn cell_of(&self, point: Vec2) -> Pos {
        Pos {
            y: (point.y / self.tile_size).floor() as i32,
            x: (point.x / self.tile_size).floor() as i32,
        }
    }

    /// Walls block unless an unlocked door sits on that exact cell. Outside the grid blocks.
    pub(super) fn is_passable(&self, point: Vec2) -> bool {
        let cell = self.cell_of(point);
        if !self.grid.in_bounds(cell) {
            return false;
        }
        match self.grid.cell_at(cell) {
            CellKind::Wall => self.doors.iter().any(|door| door.pos == cell && !door.locked),
            _ => true,
        }
    }

    /// Applies `delta` one axis at a time, x first, so blocked motion slides along walls.
    pub(super) fn slide(&self, from: Vec2, delta: Vec2) -> Vec2 {
        self.slide_traced(from, delta, |_| {})
    }

    /// Like [`Walls::slide`], reporting every accepted sub-step position to `on_step`.
    ///
    /// Each axis is swept in sub-steps of at most half a tile. The axis move is taken
    /// only if every sub-step lands on a passable point, so a long step can never hop
    /// over a wall or a locked door.
    pub(super) fn slide_traced(
        &self,
        from: Vec2,
        delta: Vec2,
        mut on_step: impl FnMut(Vec2),
    ) -> Vec2 {
        let mut pos = from;
        if let Some(steps) = self.sweep(pos, Vec2 { x: delta.x, y: 0.0 }) {
            for step in steps {
                on_step(step);
                pos = step;
            }
        }
        if let Some(steps) = self.sweep(pos, Vec2 { x: 0.0, y: delta.y }) {
            for step in steps {
                on_step(step);
                pos = step;
            }
        }
        pos
    }

    /// Sub-step points from `from` to `from + delta`, or `None` when any of them is blocked.
    fn sweep(&self, from: Vec2, delta: Vec2) -> Option<Vec<Vec2>> {
        let span = delta.x.abs().max(delta.y.abs());
        if span == 0.0 {
            return Some(Vec::new());
        }
        let max_step = self.tile_size * MAX_STEP_RATIO;
        let count = (span / max_step).ceil().clamp(1.0, self.max_sweep_steps()) as usize;
        let mut steps = Vec::with_capacity(count);
        for index in 1..=count {
            let point = from + delta * (index as f32 / count as f32);
            if !self.is_passable(point) {
                return None;
            }
            steps.push(point);
        }
        Some(steps)
    }

    /// Enough sub-steps to cross the whole grid; anything longer must leave it and is blocked.
    fn max_sweep_steps(&self) -> f32 {
        let cells = self.grid.width().max(self.grid.height()) as f32;
        cells / MAX_STEP_RATIO + 1.0
    }
}

/// Maps raw directional input to a velocity direction; diagonals keep unit speed.
pub(super) fn input_direction(move_x: i8, move_y: i8) -> Vec2 {
    let x = f32::from(move_x.signum());
    let y = f32::from(move_y.signum());
    if x != 0.0 && y != 0.0 {
        Vec2 { x: x * FRAC_1_SQRT_2, y: y * FRAC_1_SQRT_2 }
    } else {
        Vec2 { x, y }
    }
}
