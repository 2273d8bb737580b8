//! Tunable physics constants for a level attempt.

/// Radii are fractions of the tile size; distances and speeds are world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    /// Side of the square world the grid is fitted into.
    pub world_extent: f32,
    pub player_radius_ratio: f32,
    pub enemy_radius_ratio: f32,
    pub trap_radius_ratio: f32,
    pub key_radius_ratio: f32,
    pub door_radius_ratio: f32,
    pub collapsible_floor_radius_ratio: f32,
    pub exit_radius_ratio: f32,
    pub player_speed: f32,
    pub sprint_multiplier: f32,
    pub max_health: u32,
    pub invulnerability_secs: f32,
    pub knockback_distance: f32,
    pub interaction_slack: f32,
    pub heading_change_secs: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_extent: 1200.0,
            player_radius_ratio: 0.25,
            enemy_radius_ratio: 0.4,
            trap_radius_ratio: 0.35,
            key_radius_ratio: 0.25,
            door_radius_ratio: 0.5,
            collapsible_floor_radius_ratio: 0.5,
            exit_radius_ratio: 0.5,
            player_speed: 300.0,
            sprint_multiplier: 1.5,
            max_health: 5,
            invulnerability_secs: 1.5,
            knockback_distance: 40.0,
            interaction_slack: 20.0,
            heading_change_secs: 3.0,
        }
    }
}

impl SimConfig {
    pub fn tile_size(&self, width: usize, height: usize) -> f32 {
        (self.world_extent / width as f32).min(self.world_extent / height as f32)
    }
}
