//! Headless driver that steers the player along the shortest route to the exit.
//! It only produces `TickInput`; the simulation still owns every rule.

use crate::sim::{LevelSimulation, TickInput};
use crate::types::{LevelStatus, Pos};

/// Fraction of a tile within which an axis counts as aligned.
const DEADZONE_RATIO: f32 = 0.1;

#[derive(Clone, Debug, Default)]
pub struct Autopilot {
    route: Vec<Pos>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining waypoints, the player's current cell first.
    pub fn route(&self) -> &[Pos] {
        &self.route
    }

    /// Input for the next tick. Replans whenever the player leaves the route,
    /// e.g. after knockback. Idle when the level is over or no route exists.
    pub fn steer(&mut self, sim: &LevelSimulation) -> TickInput {
        if sim.status() != LevelStatus::Active {
            return TickInput::default();
        }

        let here = sim.cell_of(sim.player().pos);
        match self.route.iter().position(|&pos| pos == here) {
            Some(index) => {
                self.route.drain(..index);
            }
            None => {
                self.route = sim.grid().shortest_path(here, sim.grid().exit()).unwrap_or_default();
            }
        }

        let Some(&target) = self.route.get(1).or(self.route.first()) else {
            return TickInput::default();
        };

        let delta = sim.cell_center(target) - sim.player().pos;
        let deadzone = sim.tile_size() * DEADZONE_RATIO;
        TickInput {
            move_x: axis(delta.x, deadzone),
            move_y: axis(delta.y, deadzone),
            ..TickInput::default()
        }
    }
}

fn axis(delta: f32, deadzone: f32) -> i8 {
    if delta > deadzone {
        1
    } else if delta < -deadzone {
        -1
    } else {
        0
    }
}
