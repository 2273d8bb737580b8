//! Enemy, key and door placement rules for generated levels.

use crate::grid::Grid;
use crate::types::{CellKind, EnemyKind, Vec2};

use super::grid::{ENEMY_SAFE_DISTANCE, door_candidates, safe_cells};
use super::model::{Door, EnemySpawn, Key};
use super::seed::MazeRng;

/// Spawns up to `count` enemies on shuffled safe cells. A grid with fewer safe
/// cells than requested simply yields fewer enemies.
pub fn spawn_enemies(
    grid: &Grid,
    count: usize,
    kind: EnemyKind,
    rng: &mut MazeRng,
) -> Vec<EnemySpawn> {
    let mut candidates = safe_cells(grid, ENEMY_SAFE_DISTANCE);
    rng.shuffle(&mut candidates);
    candidates
        .into_iter()
        .take(count)
        .map(|pos| EnemySpawn { kind, pos, heading: Vec2::RIGHT })
        .collect()
}

pub fn place_keys_and_doors(
    grid: &Grid,
    key_count: usize,
    rng: &mut MazeRng,
) -> (Vec<Key>, Vec<Door>) {
    let mut open_cells = grid.positions_of(CellKind::Open);
    rng.shuffle(&mut open_cells);
    let keys = open_cells
        .into_iter()
        .take(key_count)
        .zip(0_u32..)
        .map(|(pos, id)| Key { id, pos, collected: false })
        .collect();

    let mut door_cells = door_candidates(grid);
    rng.shuffle(&mut door_cells);
    let doors = door_cells
        .into_iter()
        .take(key_count)
        .zip(0_u32..)
        .map(|(pos, id)| Door { id, pos, locked: true })
        .collect();

    (keys, doors)
}
