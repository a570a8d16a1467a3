use std::collections::HashSet;

use glam::Vec2;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Identifier for a physical keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Named(NamedKey),
    Character(char),
    Digit(u8),
}

/// Friendly names for the non-character keys the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedKey {
    Space,
    Escape,
}

/// Identifier for a mouse button (left button is zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MouseButton(u8);

impl MouseButton {
    pub const LEFT: Self = Self(0);

    pub fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

/// Snapshot of the currently held keys, mouse buttons, and cursor position.
///
/// The event loop writes into it as events arrive; the camera reads it once
/// per frame. Edge detection (was this key already down?) is what lets the
/// command keys fire once per press instead of autorepeating.
#[derive(Debug, Default)]
pub struct InputState {
    keys: RwLock<HashSet<KeyCode>>,
    mouse_buttons: RwLock<HashSet<MouseButton>>,
    mouse_position: RwLock<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key press; returns `true` when the key was not already
    /// held (a fresh press rather than a repeat).
    pub fn set_key_down(&self, key: KeyCode) -> bool {
        self.keys.write().insert(key)
    }

    pub fn set_key_up(&self, key: KeyCode) {
        self.keys.write().remove(&key);
    }

    pub fn set_mouse_button_down(&self, button: MouseButton) {
        self.mouse_buttons.write().insert(button);
    }

    pub fn set_mouse_button_up(&self, button: MouseButton) {
        self.mouse_buttons.write().remove(&button);
    }

    pub fn set_mouse_position(&self, position: Vec2) {
        *self.mouse_position.write() = position;
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.read().contains(&key)
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.read().contains(&button)
    }

    pub fn mouse_position(&self) -> Vec2 {
        *self.mouse_position.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_press_reports_freshness_once() {
        let state = InputState::new();
        let key = KeyCode::Character('T');
        assert!(state.set_key_down(key));
        assert!(!state.set_key_down(key), "repeat press is not fresh");
        state.set_key_up(key);
        assert!(state.set_key_down(key));
    }

    #[test]
    fn tracks_mouse_buttons_and_cursor() {
        let state = InputState::new();
        assert!(!state.is_mouse_button_down(MouseButton::LEFT));
        state.set_mouse_button_down(MouseButton::LEFT);
        assert!(state.is_mouse_button_down(MouseButton::LEFT));
        state.set_mouse_button_up(MouseButton::LEFT);
        assert!(!state.is_mouse_button_down(MouseButton::LEFT));

        state.set_mouse_position(Vec2::new(12.0, 34.0));
        assert_eq!(state.mouse_position(), Vec2::new(12.0, 34.0));
    }
}
