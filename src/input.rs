//! Keyboard and on-screen button state
//!
//! DOM listeners press/release `KeyboardEvent.code` strings; once per frame
//! the host snapshots the held set into a `DriveInput`.

use std::collections::HashSet;

use crate::sim::DriveInput;

/// Pseudo-code sent by the on-screen nitro button
const BUTTON_SHIFT: &str = "Shift";

/// Key codes that scroll the page unless the host suppresses them
const SCROLL_KEYS: [&str; 5] = ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "Space"];

/// Currently held key codes
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    held: HashSet<String>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    fn canonical(code: &str) -> &str {
        if code == BUTTON_SHIFT { "ShiftLeft" } else { code }
    }

    pub fn press(&mut self, code: &str) {
        self.held.insert(Self::canonical(code).to_string());
    }

    pub fn release(&mut self, code: &str) {
        self.held.remove(Self::canonical(code));
    }

    /// Drop everything (e.g. window lost focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    fn any_held(&self, codes: &[&str]) -> bool {
        codes.iter().any(|c| self.is_held(c))
    }

    /// Snapshot the held keys as drive intents
    pub fn intents(&self) -> DriveInput {
        DriveInput {
            accelerate: self.any_held(&["KeyW", "ArrowUp"]),
            brake: self.any_held(&["KeyS", "ArrowDown"]),
            steer_left: self.any_held(&["KeyA", "ArrowLeft"]),
            steer_right: self.any_held(&["KeyD", "ArrowRight"]),
            handbrake: self.is_held("Space"),
            boost: self.any_held(&["ShiftLeft", "ShiftRight"]),
        }
    }
}

/// Whether the host should `preventDefault()` on this key
pub fn prevents_default(code: &str) -> bool {
    SCROLL_KEYS.contains(&code)
}
