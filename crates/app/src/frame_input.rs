//! Keyboard input collection for one frame, independent of any windowing backend.

use maze_core::TickInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Shift,
    E,
    Escape,
    R,
    N,
    M,
}

/// Held keys drive movement; pressed keys are edge-triggered actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub move_x: i8,
    pub move_y: i8,
    pub sprint: bool,
    pub interact: bool,
    pub pause: bool,
    pub retry: bool,
    pub next_level: bool,
    pub menu: bool,
}

impl FrameInput {
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_x: self.move_x,
            move_y: self.move_y,
            sprint: self.sprint,
            interact: self.interact,
        }
    }
}

impl From<TickInput> for FrameInput {
    fn from(input: TickInput) -> Self {
        Self {
            move_x: input.move_x,
            move_y: input.move_y,
            sprint: input.sprint,
            interact: input.interact,
            ..Self::default()
        }
    }
}

/// Right wins over left and down over up when both are held.
pub fn capture_frame_input(held: &[Key], pressed: &[Key]) -> FrameInput {
    let is_held = |keys: [Key; 2]| keys.iter().any(|key| held.contains(key));

    let mut move_x = 0;
    if is_held([Key::Left, Key::A]) {
        move_x = -1;
    }
    if is_held([Key::Right, Key::D]) {
        move_x = 1;
    }
    let mut move_y = 0;
    if is_held([Key::Up, Key::W]) {
        move_y = -1;
    }
    if is_held([Key::Down, Key::S]) {
        move_y = 1;
    }

    FrameInput {
        move_x,
        move_y,
        sprint: held.contains(&Key::Shift),
        interact: pressed.contains(&Key::E),
        pause: pressed.contains(&Key::Escape),
        retry: pressed.contains(&Key::R),
        next_level: pressed.contains(&Key::N),
        menu: pressed.contains(&Key::M),
    }
}
