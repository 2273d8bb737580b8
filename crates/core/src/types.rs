use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Straight-line distance in cells, the metric used for placement exclusion zones.
    pub fn euclidean(self, other: Pos) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellKind {
    Wall,
    Open,
    Start,
    Exit,
    CollapsibleFloor,
}

impl CellKind {
    pub fn is_walkable(self) -> bool {
        self != CellKind::Wall
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnemyKind {
    #[default]
    Patrol,
    Flyer,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrapKind {
    Spike,
}

/// Continuous world-space vector. Grid cells are `tile_size` units wide.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const RIGHT: Vec2 = Vec2 { x: 1.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    pub fn normalized_or(self, fallback: Vec2) -> Vec2 {
        let length = self.length();
        if length > 0.0 { self * (1.0 / length) } else { fallback }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2 { x: self.x * rhs, y: self.y * rhs }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelStatus {
    Loading,
    Active,
    Completed,
    Failed,
}

impl LevelStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, LevelStatus::Completed | LevelStatus::Failed)
    }
}
