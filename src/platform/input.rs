//! Keyboard input to simulation intents
//!
//! Host key events arrive whenever they like; they are queued here and handed
//! to the next tick as one [`TickInput`]. Auto-repeat keydowns are collapsed
//! so holding a key produces a single start intent.

use std::collections::HashSet;

pub use crate::sim::Intent;
use crate::sim::TickInput;

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
}

impl GameKey {
    /// Default bindings, by DOM `KeyboardEvent.key` / `code` names
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" | "a" | "A" => Some(GameKey::RotateLeft),
            "ArrowRight" | "Right" | "d" | "D" => Some(GameKey::RotateRight),
            "ArrowUp" | "Up" | "w" | "W" => Some(GameKey::Thrust),
            " " | "Space" | "Spacebar" => Some(GameKey::Fire),
            _ => None,
        }
    }

    fn intent(self, pressed: bool) -> Intent {
        match (self, pressed) {
            (GameKey::RotateLeft, true) => Intent::RotateLeftStart,
            (GameKey::RotateLeft, false) => Intent::RotateLeftStop,
            (GameKey::RotateRight, true) => Intent::RotateRightStart,
            (GameKey::RotateRight, false) => Intent::RotateRightStop,
            (GameKey::Thrust, true) => Intent::ThrustStart,
            (GameKey::Thrust, false) => Intent::ThrustStop,
            (GameKey::Fire, true) => Intent::Fire,
            (GameKey::Fire, false) => Intent::ReleaseFire,
        }
    }
}

/// Pending intents between ticks
#[derive(Debug, Default)]
pub struct InputState {
    pending: Vec<Intent>,
    held: HashSet<GameKey>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key edge. Repeated presses of a held key are dropped.
    pub fn key(&mut self, key: GameKey, pressed: bool) {
        let changed = if pressed {
            self.held.insert(key)
        } else {
            self.held.remove(&key)
        };
        if changed {
            self.pending.push(key.intent(pressed));
        }
    }

    /// Record a key edge by name; returns false for unbound keys
    pub fn key_name(&mut self, name: &str, pressed: bool) -> bool {
        match GameKey::from_key_name(name) {
            Some(key) => {
                self.key(key, pressed);
                true
            }
            None => false,
        }
    }

    /// Queue a raw intent (scripted or replayed input)
    pub fn push(&mut self, intent: Intent) {
        self.pending.push(intent);
    }

    pub fn is_held(&self, key: GameKey) -> bool {
        self.held.contains(&key)
    }

    /// Drain everything queued since the last tick
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            intents: std::mem::take(&mut self.pending),
        }
    }

    /// Forget held keys (focus lost); releases are queued so nothing sticks
    pub fn release_all(&mut self) {
        let mut held: Vec<GameKey> = self.held.drain().collect();
        held.sort_by_key(|key| *key as u8);
        for key in held {
            self.pending.push(key.intent(false));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        assert_eq!(GameKey::from_key_name("ArrowLeft"), Some(GameKey::RotateLeft));
        assert_eq!(GameKey::from_key_name(" "), Some(GameKey::Fire));
        assert_eq!(GameKey::from_key_name("ArrowUp"), Some(GameKey::Thrust));
        assert_eq!(GameKey::from_key_name("Escape"), None);
    }

    #[test]
    fn test_autorepeat_collapsed() {
        let mut input = InputState::new();
        input.key(GameKey::Fire, true);
        input.key(GameKey::Fire, true);
        input.key(GameKey::Fire, true);
        input.key(GameKey::Fire, false);

        let tick = input.take_tick_input();
        assert_eq!(tick.intents, vec![Intent::Fire, Intent::ReleaseFire]);
        assert!(input.take_tick_input().is_empty());
    }

    #[test]
    fn test_key_names_and_unbound() {
        let mut input = InputState::new();
        assert!(input.key_name("ArrowRight", true));
        assert!(!input.key_name("q", true));
        assert!(input.is_held(GameKey::RotateRight));
        assert_eq!(input.take_tick_input().intents, vec![Intent::RotateRightStart]);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        input.key(GameKey::Thrust, true);
        input.key(GameKey::RotateLeft, true);
        input.take_tick_input();

        input.release_all();
        let tick = input.take_tick_input();
        assert_eq!(tick.intents, vec![Intent::RotateLeftStop, Intent::ThrustStop]);
        assert!(!input.is_held(GameKey::Thrust));
    }
}
