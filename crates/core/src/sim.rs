//! Authoritative state of one level attempt and the rules that advance it per tick.

mod collisions;
mod config;
mod entities;
mod movement;
mod rating;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

use std::f64::consts::TAU;
use std::mem;

use log::info;

use crate::content::LevelDescriptor;
use crate::grid::Grid;
use crate::mapgen::seed::{SIMULATION_STREAM, mix_seed_stream};
use crate::mapgen::{CollapsibleFloor, Door, GeneratedLevel, Key, MazeRng, Trap};
use crate::types::{LevelStatus, Pos, Vec2};

pub use config::SimConfig;
pub use entities::{Enemy, Player};
pub use rating::{MAX_STARS, clamp_stars, raw_star_rating};

use movement::{Walls, input_direction};

/// Everything the input layer gathered for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// -1 left, 1 right.
    pub move_x: i8,
    /// -1 up, 1 down.
    pub move_y: i8,
    pub sprint: bool,
    pub interact: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageSource {
    Enemy,
    Trap,
    CollapsibleFloor,
}

/// Notable state changes, drained by the presentation layer after each tick.
#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    Damaged { source: DamageSource, health: u32 },
    FloorCollapsed { pos: Pos },
    KeyCollected { id: u32, key_credit: u32 },
    DoorUnlocked { id: u32, key_credit: u32 },
    Completed { raw_stars: u8 },
    Failed,
}

pub struct LevelSimulation {
    descriptor: LevelDescriptor,
    config: SimConfig,
    tile_size: f32,
    grid: Grid,
    player: Player,
    enemies: Vec<Enemy>,
    traps: Vec<Trap>,
    collapsible_floors: Vec<CollapsibleFloor>,
    keys: Vec<Key>,
    doors: Vec<Door>,
    status: LevelStatus,
    elapsed: f32,
    rng: MazeRng,
    events: Vec<SimEvent>,
    /// Player positions visited during the last tick, starting where it began.
    player_trail: Vec<Vec2>,
}

impl LevelSimulation {
    pub fn new(descriptor: &LevelDescriptor, level: GeneratedLevel, config: SimConfig) -> Self {
        let tile_size = config.tile_size(level.grid.width(), level.grid.height());
        let center = |pos: Pos| cell_center(pos, tile_size);

        let player = Player {
            pos: center(level.grid.start()),
            radius: tile_size * config.player_radius_ratio,
            speed: config.player_speed,
            health: config.max_health,
            max_health: config.max_health,
            key_credit: 0,
            invulnerable_until: None,
        };
        let enemies = level
            .enemies
            .iter()
            .map(|spawn| {
                Enemy::from_spawn(spawn, center(spawn.pos), tile_size * config.enemy_radius_ratio)
            })
            .collect();

        Self {
            descriptor: *descriptor,
            config,
            tile_size,
            grid: level.grid,
            player,
            enemies,
            traps: level.traps,
            collapsible_floors: level.collapsible_floors,
            keys: level.keys,
            doors: level.doors,
            status: LevelStatus::Loading,
            elapsed: 0.0,
            rng: MazeRng::seed_from_u64(mix_seed_stream(level.seed, SIMULATION_STREAM)),
            events: Vec::new(),
            player_trail: Vec::new(),
        }
    }

    /// Starts the clock. Only a `Loading` level can begin.
    pub fn begin(&mut self) {
        if self.status == LevelStatus::Loading {
            self.status = LevelStatus::Active;
            info!("level {} started", self.descriptor.id);
        }
    }

    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if self.status != LevelStatus::Active {
            return;
        }

        self.elapsed += dt;
        self.player_trail.clear();
        self.player_trail.push(self.player.pos);
        self.move_player(input, dt);
        if input.interact {
            self.interact();
        }
        self.move_enemies(dt);
        self.resolve_collisions();
        if self.status != LevelStatus::Active {
            return;
        }
        self.check_exit();
    }

    /// Spends one key credit per locked door in reach. Door and key ids are not matched.
    pub fn interact(&mut self) {
        if self.status != LevelStatus::Active {
            return;
        }
        let door_radius = self.tile_size * self.config.door_radius_ratio;
        let reach = self.player.radius + door_radius + self.config.interaction_slack;
        for door in &mut self.doors {
            let door_center = cell_center(door.pos, self.tile_size);
            if self.player.pos.distance(door_center) >= reach {
                continue;
            }
            if door.locked && self.player.key_credit > 0 {
                door.locked = false;
                self.player.key_credit -= 1;
                self.events.push(SimEvent::DoorUnlocked {
                    id: door.id,
                    key_credit: self.player.key_credit,
                });
            }
        }
    }

    /// Legality test for a world point, shared by the player and enemies.
    pub fn can_move_to(&self, point: Vec2) -> bool {
        self.walls().is_passable(point)
    }

    pub fn cell_of(&self, point: Vec2) -> Pos {
        self.walls().cell_of(point)
    }

    pub fn cell_center(&self, pos: Pos) -> Vec2 {
        cell_center(pos, self.tile_size)
    }

    pub fn raw_star_rating(&self) -> Option<u8> {
        (self.status == LevelStatus::Completed).then(|| {
            raw_star_rating(
                self.elapsed_whole_secs(),
                self.descriptor.time_limit_secs,
                self.player.health,
                self.player.max_health,
            )
        })
    }

    /// Cross-checks state that every tick must preserve. Used by fuzzers.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.player.health > self.player.max_health {
            return Err(format!(
                "health {} above max {}",
                self.player.health, self.player.max_health
            ));
        }
        if !self.can_move_to(self.player.pos) {
            return Err(format!("player inside a wall at {:?}", self.cell_of(self.player.pos)));
        }
        if let Some(enemy) = self.enemies.iter().find(|enemy| !self.can_move_to(enemy.pos)) {
            return Err(format!("{:?} inside a wall at {:?}", enemy.kind, self.cell_of(enemy.pos)));
        }
        let collected = self.keys.iter().filter(|key| key.collected).count();
        let unlocked = self.doors.iter().filter(|door| !door.locked).count();
        if collected.checked_sub(unlocked) != Some(self.player.key_credit as usize) {
            return Err(format!(
                "key credit {} but {collected} keys collected and {unlocked} doors unlocked",
                self.player.key_credit
            ));
        }
        if let Some(err) = self.check_player_trail() {
            return Err(err);
        }
        if self.player.health == 0 && self.status != LevelStatus::Failed {
            return Err(format!("no health left but level is {:?}", self.status));
        }
        Ok(())
    }

    /// Every step the player took last tick moved along one axis, by at most half a tile,
    /// onto a passable point.
    fn check_player_trail(&self) -> Option<String> {
        let max_step = self.tile_size * movement::MAX_STEP_RATIO + 0.01;
        self.player_trail.windows(2).find_map(|pair| {
            let step = pair[1] - pair[0];
            if step.x.abs() > max_step || step.y.abs() > max_step {
                Some(format!("player jumped {step:?} in one step from {:?}", pair[0]))
            } else if step.x != 0.0 && step.y != 0.0 {
                Some(format!("player moved diagonally in one step from {:?}", pair[0]))
            } else if !self.can_move_to(pair[1]) {
                Some(format!("player stepped through a wall at {:?}", self.cell_of(pair[1])))
            } else {
                None
            }
        })
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        mem::take(&mut self.events)
    }

    pub fn descriptor(&self) -> &LevelDescriptor {
        &self.descriptor
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn traps(&self) -> &[Trap] {
        &self.traps
    }

    pub fn collapsible_floors(&self) -> &[CollapsibleFloor] {
        &self.collapsible_floors
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed
    }

    /// Level clock as the HUD shows it, in whole seconds.
    pub fn elapsed_whole_secs(&self) -> u32 {
        self.elapsed.max(0.0).floor() as u32
    }

    pub fn health(&self) -> u32 {
        self.player.health
    }

    pub fn key_credit(&self) -> u32 {
        self.player.key_credit
    }

    fn walls(&self) -> Walls<'_> {
        Walls { grid: &self.grid, doors: &self.doors, tile_size: self.tile_size }
    }

    fn move_player(&mut self, input: &TickInput, dt: f32) {
        let direction = input_direction(input.move_x, input.move_y);
        if direction == Vec2::ZERO {
            return;
        }
        let speed = if input.sprint {
            self.player.speed * self.config.sprint_multiplier
        } else {
            self.player.speed
        };
        let walls = Walls { grid: &self.grid, doors: &self.doors, tile_size: self.tile_size };
        let trail = &mut self.player_trail;
        self.player.pos =
            walls.slide_traced(self.player.pos, direction * (speed * dt), |step| trail.push(step));
    }

    fn move_enemies(&mut self, dt: f32) {
        let walls = Walls { grid: &self.grid, doors: &self.doors, tile_size: self.tile_size };
        for enemy in &mut self.enemies {
            if enemy.heading_is_due(self.elapsed, self.config.heading_change_secs) {
                let angle = self.rng.unit_f64() * TAU;
                enemy.heading = Vec2::new(angle.cos() as f32, angle.sin() as f32);
                enemy.heading_changed_at = Some(self.elapsed);
            }
            enemy.pos = walls.slide(enemy.pos, enemy.heading * (enemy.speed * dt));
        }
    }

    fn check_exit(&mut self) {
        let exit_center = cell_center(self.grid.exit(), self.tile_size);
        let exit_radius = self.tile_size * self.config.exit_radius_ratio;
        if self.player.pos.distance(exit_center) < self.player.radius + exit_radius {
            self.status = LevelStatus::Completed;
            let raw_stars = self.raw_star_rating().unwrap_or(0);
            info!(
                "level {} completed in {}s with {} health ({} raw stars)",
                self.descriptor.id,
                self.elapsed_whole_secs(),
                self.player.health,
                raw_stars
            );
            self.events.push(SimEvent::Completed { raw_stars });
        }
    }

    #[cfg(test)]
    fn place_player(&mut self, pos: Vec2) {
        self.player.pos = pos;
    }

    #[cfg(test)]
    fn place_enemy(&mut self, index: usize, pos: Vec2, heading: Vec2) {
        let enemy = &mut self.enemies[index];
        enemy.pos = pos;
        enemy.heading = heading;
        enemy.heading_changed_at = Some(self.elapsed);
    }
}

fn cell_center(pos: Pos, tile_size: f32) -> Vec2 {
    Vec2 { x: (pos.x as f32 + 0.5) * tile_size, y: (pos.y as f32 + 0.5) * tile_size }
}
