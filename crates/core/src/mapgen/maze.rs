//! Randomized depth-first carving of a perfect maze on an odd-sized grid.

use crate::error::MazeError;
use crate::grid::Grid;
use crate::types::{CellKind, Pos};

use super::seed::MazeRng;

pub const MIN_MAZE_SIDE: usize = 5;

const CARVE_STEPS: [Pos; 4] =
    [Pos { y: -2, x: 0 }, Pos { y: 0, x: 2 }, Pos { y: 2, x: 0 }, Pos { y: 0, x: -2 }];

struct Frame {
    cell: Pos,
    steps: [Pos; 4],
    next_step: usize,
}

impl Frame {
    fn new(cell: Pos, rng: &mut MazeRng) -> Self {
        let mut steps = CARVE_STEPS;
        rng.shuffle(&mut steps);
        Self { cell, steps, next_step: 0 }
    }
}

pub fn generate_maze(width: usize, height: usize, rng: &mut MazeRng) -> Result<Grid, MazeError> {
    if width < MIN_MAZE_SIDE || height < MIN_MAZE_SIDE || width % 2 == 0 || height % 2 == 0 {
        return Err(MazeError::InvalidDimensions { width, height });
    }

    let mut grid = Grid::filled(width, height, CellKind::Wall);
    let origin = grid.start();
    grid.set_cell(origin, CellKind::Open);

    // Each frame remembers which of its shuffled directions it has tried, so
    // popping a frame is the backtrack.
    let mut stack = vec![Frame::new(origin, rng)];
    while let Some(frame) = stack.last_mut() {
        let Some(&step) = frame.steps.get(frame.next_step) else {
            stack.pop();
            continue;
        };
        frame.next_step += 1;

        let cell = frame.cell;
        let target = Pos { y: cell.y + step.y, x: cell.x + step.x };
        if !is_carvable_interior(&grid, target) || grid.cell_at(target) != CellKind::Wall {
            continue;
        }

        let between = Pos { y: cell.y + step.y / 2, x: cell.x + step.x / 2 };
        grid.set_cell(between, CellKind::Open);
        grid.set_cell(target, CellKind::Open);
        stack.push(Frame::new(target, rng));
    }

    let exit = grid.exit();
    grid.set_cell(origin, CellKind::Start);
    grid.set_cell(exit, CellKind::Exit);
    Ok(grid)
}

fn is_carvable_interior(grid: &Grid, pos: Pos) -> bool {
    pos.x > 0
        && pos.y > 0
        && (pos.x as usize) < grid.width() - 1
        && (pos.y as usize) < grid.height() - 1
}
