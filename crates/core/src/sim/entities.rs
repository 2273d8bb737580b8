//! Runtime actors: the player and wandering enemies in world coordinates.

use crate::content::enemy_stats;
use crate::mapgen::EnemySpawn;
use crate::types::{EnemyKind, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    /// Keys picked up and not yet spent on a door.
    pub key_credit: u32,
    pub invulnerable_until: Option<f32>,
}

impl Player {
    pub fn is_invulnerable(&self, now: f32) -> bool {
        self.invulnerable_until.is_some_and(|until| now < until)
    }

    pub fn has_full_health(&self) -> bool {
        self.health == self.max_health
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hit_points: u32,
    pub heading: Vec2,
    pub heading_changed_at: Option<f32>,
}

impl Enemy {
    pub(super) fn from_spawn(spawn: &EnemySpawn, pos: Vec2, radius: f32) -> Self {
        let stats = enemy_stats(spawn.kind);
        Self {
            kind: spawn.kind,
            pos,
            radius,
            speed: stats.speed,
            hit_points: stats.hit_points,
            heading: spawn.heading,
            heading_changed_at: None,
        }
    }

    pub(super) fn heading_is_due(&self, now: f32, interval: f32) -> bool {
        self.heading_changed_at.is_none_or(|changed_at| now - changed_at > interval)
    }
}
