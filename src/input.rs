//! Input events and key bindings
//!
//! Keys are identified by their DOM-style code strings ("ArrowLeft", "Space",
//! "KeyP", ...). The host translates whatever its windowing layer produces
//! into these codes; the core only cares about the semantic actions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Discrete event delivered by the host once per occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close / OS quit signal
    QuitRequested,
    KeyDown(String),
    KeyUp(String),
}

/// Semantic actions recognized by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Pause,
    Confirm,
    Quit,
}

/// Mapping from key codes to actions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub jump: Vec<String>,
    pub pause: Vec<String>,
    pub confirm: Vec<String>,
    pub quit: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn codes(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            move_left: codes(&["ArrowLeft", "KeyA"]),
            move_right: codes(&["ArrowRight", "KeyD"]),
            jump: codes(&["Space", "ArrowUp", "KeyW"]),
            pause: codes(&["KeyP"]),
            confirm: codes(&["Enter"]),
            quit: codes(&["Escape"]),
        }
    }
}

impl KeyBindings {
    /// Resolve a key code to its action, if bound
    pub fn action_for(&self, code: &str) -> Option<Action> {
        let table = [
            (&self.move_left, Action::MoveLeft),
            (&self.move_right, Action::MoveRight),
            (&self.jump, Action::Jump),
            (&self.pause, Action::Pause),
            (&self.confirm, Action::Confirm),
            (&self.quit, Action::Quit),
        ];
        table
            .iter()
            .find(|(codes, _)| codes.iter().any(|c| c == code))
            .map(|(_, action)| *action)
    }

    pub fn is_quit(&self, code: &str) -> bool {
        self.quit.iter().any(|c| c == code)
    }
}

/// Keys currently held down, polled once per tick
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys_down: HashSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track press/release events. Returns true when the event was a fresh press.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown(code) => self.keys_down.insert(code.clone()),
            InputEvent::KeyUp(code) => {
                self.keys_down.remove(code);
                false
            }
            InputEvent::QuitRequested => false,
        }
    }

    pub fn press(&mut self, code: &str) {
        self.keys_down.insert(code.to_string());
    }

    pub fn release(&mut self, code: &str) {
        self.keys_down.remove(code);
    }

    pub fn clear(&mut self) {
        self.keys_down.clear();
    }

    /// True if any key bound to `action` is held
    pub fn action_held(&self, bindings: &KeyBindings, action: Action) -> bool {
        self.keys_down
            .iter()
            .any(|code| bindings.action_for(code) == Some(action))
    }

    /// Horizontal intent in {-1, 0, +1}; opposing keys cancel out
    pub fn horizontal(&self, bindings: &KeyBindings) -> f32 {
        let left = self.action_held(bindings, Action::MoveLeft);
        let right = self.action_held(bindings, Action::MoveRight);
        match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_resolve() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.action_for("ArrowLeft"), Some(Action::MoveLeft));
        assert_eq!(bindings.action_for("Space"), Some(Action::Jump));
        assert_eq!(bindings.action_for("KeyP"), Some(Action::Pause));
        assert_eq!(bindings.action_for("Escape"), Some(Action::Quit));
        assert_eq!(bindings.action_for("F13"), None);
        assert!(bindings.is_quit("Escape"));
    }

    #[test]
    fn test_horizontal_cancels() {
        let bindings = KeyBindings::default();
        let mut held = HeldKeys::new();
        assert_eq!(held.horizontal(&bindings), 0.0);

        held.press("ArrowLeft");
        assert_eq!(held.horizontal(&bindings), -1.0);

        held.press("KeyD");
        assert_eq!(held.horizontal(&bindings), 0.0);

        held.release("ArrowLeft");
        assert_eq!(held.horizontal(&bindings), 1.0);
    }

    #[test]
    fn test_apply_reports_fresh_press_only() {
        let mut held = HeldKeys::new();
        assert!(held.apply(&InputEvent::KeyDown("Space".into())));
        // Auto-repeat from the OS is not a fresh press
        assert!(!held.apply(&InputEvent::KeyDown("Space".into())));
        assert!(!held.apply(&InputEvent::KeyUp("Space".into())));
        assert!(!held.action_held(&KeyBindings::default(), Action::Jump));
    }
}
