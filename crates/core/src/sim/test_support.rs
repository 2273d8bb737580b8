//! Shared fixtures for the simulation test suite.
//! The corridor level keeps world coordinates easy to reason about: 100 units per tile.

use super::*;
use crate::mapgen::EnemySpawn;
use crate::types::{CellKind, EnemyKind};

/// 9x5 grid: an open row at y=1 from the start (1,1) to x=7, then down to the exit at (7,3).
pub(super) fn corridor_grid() -> Grid {
    let mut grid = Grid::filled(9, 5, CellKind::Wall);
    for x in 1..=7 {
        grid.set_cell(Pos { y: 1, x }, CellKind::Open);
    }
    grid.set_cell(Pos { y: 2, x: 7 }, CellKind::Open);
    grid.set_cell(grid.start(), CellKind::Start);
    grid.set_cell(grid.exit(), CellKind::Exit);
    grid
}

pub(super) fn corridor_level() -> GeneratedLevel {
    GeneratedLevel {
        level_id: 1,
        seed: 7,
        grid: corridor_grid(),
        traps: Vec::new(),
        collapsible_floors: Vec::new(),
        enemies: Vec::new(),
        keys: Vec::new(),
        doors: Vec::new(),
    }
}

pub(super) fn corridor_config() -> SimConfig {
    SimConfig { world_extent: 900.0, ..SimConfig::default() }
}

pub(super) fn corridor_descriptor(time_limit_secs: Option<u32>) -> LevelDescriptor {
    LevelDescriptor {
        id: 1,
        name: "Corridor",
        grid_size: 9,
        enemies: 0,
        difficulty: 1,
        keys: 0,
        time_limit_secs,
        checkpoint: None,
        has_boss: false,
    }
}

pub(super) fn patrol_at(pos: Pos) -> EnemySpawn {
    EnemySpawn { kind: EnemyKind::Patrol, pos, heading: Vec2::RIGHT }
}

pub(super) fn active_sim(level: GeneratedLevel) -> LevelSimulation {
    active_sim_with(level, corridor_config())
}

pub(super) fn active_sim_with(level: GeneratedLevel, config: SimConfig) -> LevelSimulation {
    let mut sim = LevelSimulation::new(&corridor_descriptor(Some(100)), level, config);
    sim.begin();
    sim
}

pub(super) fn idle() -> TickInput {
    TickInput::default()
}
