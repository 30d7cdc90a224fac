//! Keyboard state as the core sees it. The host decides how keys are read.

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Space,
    Backspace,
    Escape,
}

pub trait Controls {
    /// Key is currently held.
    fn is_down(&self, key: Key) -> bool;
    /// Key went down during this frame.
    fn was_pressed(&self, key: Key) -> bool;
    /// Printable characters typed during this frame, in order.
    fn typed(&self) -> Vec<char>;
}

/// Fixed snapshot of one frame's input. Used by tests and replays.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pub held: HashSet<Key>,
    pub pressed: HashSet<Key>,
    pub typed: Vec<char>,
}

impl FrameInput {
    pub fn none() -> Self {
        FrameInput::default()
    }

    pub fn holding(keys: &[Key]) -> Self {
        FrameInput {
            held: keys.iter().copied().collect(),
            ..FrameInput::default()
        }
    }

    pub fn pressing(key: Key) -> Self {
        FrameInput {
            held: [key].into_iter().collect(),
            pressed: [key].into_iter().collect(),
            ..FrameInput::default()
        }
    }

    pub fn typing(text: &str) -> Self {
        FrameInput {
            typed: text.chars().collect(),
            ..FrameInput::default()
        }
    }
}

impl Controls for FrameInput {
    fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn typed(&self) -> Vec<char> {
        self.typed.clone()
    }
}
