use crate::types::{EnemyKind, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelDescriptor {
    pub id: u32,
    pub name: &'static str,
    pub grid_size: usize,
    pub enemies: usize,
    /// Drives trap and collapsible-floor density.
    pub difficulty: u32,
    pub keys: usize,
    pub time_limit_secs: Option<u32>,
    pub checkpoint: Option<Pos>,
    pub has_boss: bool,
}

pub const CAMPAIGN_LEN: usize = 10;

pub static CAMPAIGN: [LevelDescriptor; CAMPAIGN_LEN] = [
    level(1, "Tutorial", 11, 0, 0, None, Some(5)),
    level(2, "Easy Path", 15, 1, 1, Some(300), None),
    level(3, "Trap Zone", 17, 1, 1, Some(240), Some(8)),
    level(4, "Button Maze", 19, 2, 1, Some(200), None),
    level(5, "Half Floors", 21, 2, 1, Some(180), Some(10)),
    level(6, "Elevator Trap", 23, 3, 2, Some(160), None),
    level(7, "Night Maze", 25, 3, 2, Some(140), Some(12)),
    level(8, "Puzzle Trap", 27, 4, 2, Some(120), None),
    level(9, "Before Boss", 29, 4, 3, Some(100), Some(14)),
    LevelDescriptor {
        has_boss: true,
        ..level(10, "Final Boss", 31, 5, 3, Some(90), None)
    },
];

const fn level(
    id: u32,
    name: &'static str,
    grid_size: usize,
    enemies: usize,
    keys: usize,
    time_limit_secs: Option<u32>,
    checkpoint_at: Option<i32>,
) -> LevelDescriptor {
    let checkpoint = match checkpoint_at {
        Some(at) => Some(Pos { y: at, x: at }),
        None => None,
    };
    LevelDescriptor {
        id,
        name,
        grid_size,
        enemies,
        difficulty: id,
        keys,
        time_limit_secs,
        checkpoint,
        has_boss: false,
    }
}

pub fn find_level(id: u32) -> Option<&'static LevelDescriptor> {
    CAMPAIGN.iter().find(|level| level.id == id)
}

pub struct EnemyStats {
    pub hit_points: u32,
    /// World units per second.
    pub speed: f32,
}

pub fn enemy_stats(kind: EnemyKind) -> EnemyStats {
    match kind {
        EnemyKind::Patrol => EnemyStats { hit_points: 1, speed: 30.0 },
        EnemyKind::Flyer => EnemyStats { hit_points: 1, speed: 50.0 },
        EnemyKind::Boss => EnemyStats { hit_points: 3, speed: 30.0 },
    }
}
