//! Overlap checks against enemies, hazards and keys, and damage application.

use log::{debug, info};

use super::*;

fn overlaps(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

impl LevelSimulation {
    /// Skipped entirely while the player is invulnerable. Each damage source
    /// re-checks the window, so one tick deals at most one damage.
    pub(super) fn resolve_collisions(&mut self) {
        if self.player.is_invulnerable(self.elapsed) {
            return;
        }

        for index in 0..self.enemies.len() {
            let enemy_pos = self.enemies[index].pos;
            let enemy_radius = self.enemies[index].radius;
            if !overlaps(self.player.pos, self.player.radius, enemy_pos, enemy_radius) {
                continue;
            }
            if !self.take_damage(DamageSource::Enemy) {
                continue;
            }
            if self.status == LevelStatus::Failed {
                return;
            }
            self.knock_back_from(enemy_pos);
        }

        let trap_radius = self.tile_size * self.config.trap_radius_ratio;
        for index in 0..self.traps.len() {
            let trap_center = cell_center(self.traps[index].pos, self.tile_size);
            if overlaps(self.player.pos, self.player.radius, trap_center, trap_radius)
                && self.take_damage(DamageSource::Trap)
                && self.status == LevelStatus::Failed
            {
                return;
            }
        }

        let floor_radius = self.tile_size * self.config.collapsible_floor_radius_ratio;
        for index in 0..self.collapsible_floors.len() {
            let floor = &self.collapsible_floors[index];
            let floor_pos = floor.pos;
            if !floor.active
                || !overlaps(
                    self.player.pos,
                    self.player.radius,
                    cell_center(floor_pos, self.tile_size),
                    floor_radius,
                )
                || self.player.is_invulnerable(self.elapsed)
            {
                continue;
            }
            self.collapsible_floors[index].collapse();
            self.events.push(SimEvent::FloorCollapsed { pos: floor_pos });
            self.take_damage(DamageSource::CollapsibleFloor);
            if self.status == LevelStatus::Failed {
                return;
            }
        }

        let key_radius = self.tile_size * self.config.key_radius_ratio;
        for key in &mut self.keys {
            if key.collected {
                continue;
            }
            let key_center = cell_center(key.pos, self.tile_size);
            if overlaps(self.player.pos, self.player.radius, key_center, key_radius) {
                key.collected = true;
                self.player.key_credit += 1;
                self.events.push(SimEvent::KeyCollected {
                    id: key.id,
                    key_credit: self.player.key_credit,
                });
            }
        }
    }

    /// Returns `false` when the hit was absorbed by the invulnerability window.
    fn take_damage(&mut self, source: DamageSource) -> bool {
        if self.player.is_invulnerable(self.elapsed) {
            return false;
        }

        self.player.health = self.player.health.saturating_sub(1);
        self.player.invulnerable_until = Some(self.elapsed + self.config.invulnerability_secs);
        self.events.push(SimEvent::Damaged { source, health: self.player.health });
        debug!("player hit by {source:?}, health now {}", self.player.health);

        if self.player.health == 0 {
            self.status = LevelStatus::Failed;
            self.events.push(SimEvent::Failed);
            info!(
                "level {} failed after {}s",
                self.descriptor.id,
                self.elapsed_whole_secs()
            );
        }
        true
    }

    fn knock_back_from(&mut self, enemy_pos: Vec2) {
        let normal = (self.player.pos - enemy_pos).normalized_or(Vec2::RIGHT);
        let push = normal * self.config.knockback_distance;
        let walls = Walls { grid: &self.grid, doors: &self.doors, tile_size: self.tile_size };
        let trail = &mut self.player_trail;
        self.player.pos = walls.slide_traced(self.player.pos, push, |step| trail.push(step));
    }
}
