//! Public data models for generated levels: hazards, enemy spawns, keys and doors.

use std::mem;

use xxhash_rust::xxh3::xxh3_64;

use crate::grid::Grid;
use crate::types::{CellKind, EnemyKind, Pos, TrapKind, Vec2};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trap {
    pub pos: Pos,
    pub kind: TrapKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollapsibleFloor {
    pub pos: Pos,
    pub active: bool,
}

impl CollapsibleFloor {
    /// First contact deactivates the floor. Returns whether this call did so.
    pub fn collapse(&mut self) -> bool {
        mem::replace(&mut self.active, false)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HazardLayout {
    pub traps: Vec<Trap>,
    pub collapsible_floors: Vec<CollapsibleFloor>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub pos: Pos,
    pub heading: Vec2,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    pub id: u32,
    pub pos: Pos,
    pub collected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Door {
    pub id: u32,
    pub pos: Pos,
    pub locked: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedLevel {
    pub level_id: u32,
    pub seed: u64,
    pub grid: Grid,
    pub traps: Vec<Trap>,
    pub collapsible_floors: Vec<CollapsibleFloor>,
    pub enemies: Vec<EnemySpawn>,
    pub keys: Vec<Key>,
    pub doors: Vec<Door>,
}

impl GeneratedLevel {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        for row in self.grid.rows() {
            for cell in row {
                bytes.push(match cell {
                    CellKind::Wall => 0,
                    CellKind::Open => 1,
                    CellKind::Start => 2,
                    CellKind::Exit => 3,
                    CellKind::CollapsibleFloor => 4,
                });
            }
        }

        bytes.extend((self.traps.len() as u32).to_le_bytes());
        for trap in &self.traps {
            push_pos(&mut bytes, trap.pos);
        }

        bytes.extend((self.enemies.len() as u32).to_le_bytes());
        for enemy in &self.enemies {
            bytes.push(match enemy.kind {
                EnemyKind::Patrol => 0,
                EnemyKind::Flyer => 1,
                EnemyKind::Boss => 2,
            });
            push_pos(&mut bytes, enemy.pos);
        }

        bytes.extend((self.keys.len() as u32).to_le_bytes());
        for key in &self.keys {
            bytes.extend(key.id.to_le_bytes());
            push_pos(&mut bytes, key.pos);
        }

        bytes.extend((self.doors.len() as u32).to_le_bytes());
        for door in &self.doors {
            bytes.extend(door.id.to_le_bytes());
            push_pos(&mut bytes, door.pos);
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_pos(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.x.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_is_one_shot() {
        let mut floor = CollapsibleFloor { pos: Pos::new(3, 3), active: true };
        assert!(floor.collapse());
        assert!(!floor.collapse());
        assert!(!floor.active);
    }
}
