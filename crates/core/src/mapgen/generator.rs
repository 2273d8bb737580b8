//! High-level level generation that composes maze carving, hazards and entity placement.

use log::debug;

use crate::content::LevelDescriptor;
use crate::error::MazeError;
use crate::types::EnemyKind;

use super::hazards::place_traps;
use super::maze::generate_maze;
use super::model::GeneratedLevel;
use super::seed::MazeRng;
use super::spawns::{place_keys_and_doors, spawn_enemies};

pub struct LevelGenerator {
    seed: u64,
}

impl LevelGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn generate(&self, descriptor: &LevelDescriptor) -> Result<GeneratedLevel, MazeError> {
        let mut rng = MazeRng::seed_from_u64(self.seed);
        let mut grid = generate_maze(descriptor.grid_size, descriptor.grid_size, &mut rng)?;
        let hazards = place_traps(&mut grid, descriptor.difficulty, &mut rng);

        // Boss levels draw one extra cell from the same shuffle so the boss
        // never shares a cell with a patrol.
        let roster = descriptor.enemies + usize::from(descriptor.has_boss);
        let mut enemies = spawn_enemies(&grid, roster, EnemyKind::Patrol, &mut rng);
        if descriptor.has_boss
            && enemies.len() == roster
            && let Some(boss) = enemies.last_mut()
        {
            boss.kind = EnemyKind::Boss;
        }

        let (keys, doors) = place_keys_and_doors(&grid, descriptor.keys, &mut rng);

        debug!(
            "generated level {} ({}x{}, seed {:#018x}): {} traps, {} collapsible floors, {} enemies, {} keys, {} doors",
            descriptor.id,
            grid.width(),
            grid.height(),
            self.seed,
            hazards.traps.len(),
            hazards.collapsible_floors.len(),
            enemies.len(),
            keys.len(),
            doors.len(),
        );

        Ok(GeneratedLevel {
            level_id: descriptor.id,
            seed: self.seed,
            grid,
            traps: hazards.traps,
            collapsible_floors: hazards.collapsible_floors,
            enemies,
            keys,
            doors,
        })
    }
}
