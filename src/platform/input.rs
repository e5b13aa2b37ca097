//! Keyboard state
//!
//! Held keys drive the vehicle every tick; a few keys map to single-press
//! actions that fire on the key-down transition only.

use std::collections::HashSet;

use crate::sim::InputIntent;

/// One-shot actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Horn,
    Startup,
    ReturnToHub,
    ToggleFullscreen,
    ToggleMute,
}

impl KeyAction {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "h" => Some(KeyAction::Horn),
            "e" => Some(KeyAction::Startup),
            "escape" => Some(KeyAction::ReturnToHub),
            "f" => Some(KeyAction::ToggleFullscreen),
            "m" => Some(KeyAction::ToggleMute),
            _ => None,
        }
    }
}

/// Held keys, matched case-insensitively by `KeyboardEvent.key` name
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns the bound action on the first press only;
    /// auto-repeat returns `None`.
    pub fn key_down(&mut self, key: &str) -> Option<KeyAction> {
        let key = key.to_lowercase();
        let action = KeyAction::from_key(&key);
        if self.held.insert(key) { action } else { None }
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&key.to_lowercase());
    }

    /// Release everything (focus lost)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(&key.to_lowercase())
    }

    /// Driving intent from arrows and WASD
    pub fn intent(&self) -> InputIntent {
        let any = |keys: &[&str]| keys.iter().any(|k| self.held.contains(*k));
        InputIntent {
            turn_left: any(&["arrowleft", "a"]),
            turn_right: any(&["arrowright", "d"]),
            forward: any(&["arrowup", "w"]),
            backward: any(&["arrowdown", "s"]),
        }
    }
}
