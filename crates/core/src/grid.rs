//! Row-major cell grid shared by generation and simulation.

use std::collections::VecDeque;

use crate::types::{CellKind, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, cell: CellKind) -> Self {
        Self { width, height, cells: vec![cell; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Pos {
        Pos { y: 1, x: 1 }
    }

    pub fn exit(&self) -> Pos {
        Pos { y: self.height as i32 - 2, x: self.width as i32 - 2 }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-bounds positions read as `Wall`.
    pub fn cell_at(&self, pos: Pos) -> CellKind {
        if !self.in_bounds(pos) {
            return CellKind::Wall;
        }
        self.cells[self.index(pos)]
    }

    pub fn set_cell(&mut self, pos: Pos, cell: CellKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.width)
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }

    pub fn positions_of(&self, cell: CellKind) -> Vec<Pos> {
        self.positions().filter(|&pos| self.cell_at(pos) == cell).collect()
    }

    pub fn count(&self, cell: CellKind) -> usize {
        self.cells.iter().filter(|&&candidate| candidate == cell).count()
    }

    /// Breadth-first walk over walkable cells. Returns `None` if `goal` is unreachable.
    pub fn shortest_path(&self, from: Pos, goal: Pos) -> Option<Vec<Pos>> {
        if !self.cell_at(from).is_walkable() || !self.cell_at(goal).is_walkable() {
            return None;
        }

        let mut came_from = vec![None; self.cells.len()];
        let mut seen = vec![false; self.cells.len()];
        let mut open = VecDeque::from([from]);
        seen[self.index(from)] = true;

        while let Some(pos) = open.pop_front() {
            if pos == goal {
                let mut path = vec![pos];
                let mut cursor = pos;
                while let Some(previous) = came_from[self.index(cursor)] {
                    path.push(previous);
                    cursor = previous;
                }
                path.reverse();
                return Some(path);
            }
            for next in pos.neighbors() {
                if !self.cell_at(next).is_walkable() {
                    continue;
                }
                let idx = self.index(next);
                if seen[idx] {
                    continue;
                }
                seen[idx] = true;
                came_from[idx] = Some(pos);
                open.push_back(next);
            }
        }

        None
    }

    pub fn reachable_from(&self, from: Pos) -> usize {
        if !self.cell_at(from).is_walkable() {
            return 0;
        }
        let mut seen = vec![false; self.cells.len()];
        let mut open = VecDeque::from([from]);
        seen[self.index(from)] = true;
        let mut reached = 0;
        while let Some(pos) = open.pop_front() {
            reached += 1;
            for next in pos.neighbors() {
                if self.cell_at(next).is_walkable() && !seen[self.index(next)] {
                    seen[self.index(next)] = true;
                    open.push_back(next);
                }
            }
        }
        reached
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_walkable()).count()
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
