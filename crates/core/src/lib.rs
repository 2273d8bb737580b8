pub mod autopilot;
pub mod campaign;
pub mod content;
pub mod error;
pub mod grid;
pub mod mapgen;
pub mod progress;
pub mod sim;
pub mod types;

pub use autopilot::Autopilot;
pub use campaign::Campaign;
pub use content::{CAMPAIGN, LevelDescriptor, find_level};
pub use error::{MazeError, StoreError};
pub use grid::Grid;
pub use mapgen::{GeneratedLevel, LevelGenerator, generate_level};
pub use progress::{KeyValueStore, MemoryStore, PROGRESS_KEY, ProgressRecord};
pub use sim::{LevelSimulation, SimConfig, SimEvent, TickInput};
pub use types::*;
