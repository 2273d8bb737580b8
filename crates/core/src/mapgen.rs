//! Procedural level generation split into coherent submodules.

pub mod hazards;
pub mod maze;
pub mod model;
pub mod seed;
pub mod spawns;

mod generator;
mod grid;

pub use generator::LevelGenerator;
pub use grid::{ENEMY_SAFE_DISTANCE, HAZARD_SAFE_DISTANCE};
pub use model::{CollapsibleFloor, Door, EnemySpawn, GeneratedLevel, HazardLayout, Key, Trap};
pub use seed::{MazeRng, derive_level_seed};

use crate::content::LevelDescriptor;
use crate::error::MazeError;

pub fn generate_level(
    run_seed: u64,
    descriptor: &LevelDescriptor,
    attempt: u32,
) -> Result<GeneratedLevel, MazeError> {
    LevelGenerator::new(derive_level_seed(run_seed, descriptor.id, attempt)).generate(descriptor)
}
