//! Keyboard input mapping
//!
//! Arrow keys and WASD both steer. The intent is rebuilt from the whole
//! pressed set on every change, so opposite keys cancel and releasing one of
//! two held keys falls back to the other.

use std::collections::HashSet;

use crate::sim::MoveIntent;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
}

impl Key {
    /// Map a browser/winit style key name to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowDown" | "Down" => Some(Key::Down),
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            "w" | "W" => Some(Key::W),
            "a" | "A" => Some(Key::A),
            "s" | "S" => Some(Key::S),
            "d" | "D" => Some(Key::D),
            _ => None,
        }
    }
}

/// Tracks held keys and the resulting intent
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    pressed: HashSet<Key>,
    intent: MoveIntent,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) -> MoveIntent {
        self.pressed.insert(key);
        self.recompute()
    }

    pub fn key_up(&mut self, key: Key) -> MoveIntent {
        self.pressed.remove(&key);
        self.recompute()
    }

    /// Drop every held key (focus lost)
    pub fn release_all(&mut self) -> MoveIntent {
        self.pressed.clear();
        self.recompute()
    }

    pub fn intent(&self) -> MoveIntent {
        self.intent
    }

    fn recompute(&mut self) -> MoveIntent {
        let held = |a: Key, b: Key| (self.pressed.contains(&a) || self.pressed.contains(&b)) as i8;
        self.intent = MoveIntent::new(
            held(Key::Right, Key::D) - held(Key::Left, Key::A),
            held(Key::Down, Key::S) - held(Key::Up, Key::W),
        );
        self.intent
    }
}
