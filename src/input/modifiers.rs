//! Held-modifier bookkeeping for the hook thread.
//!
//! Global hooks only report individual key edges, so the left and right
//! variants of each modifier are tracked separately: releasing LeftCtrl while
//! RightCtrl is still down keeps Ctrl held.

use std::collections::HashSet;

use super::keys::{KeyCode, Modifier, Modifiers, Side};

#[derive(Debug, Default)]
pub struct ModifierTracker {
    held: HashSet<(Modifier, Side)>,
}

impl ModifierTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key edge and returns the modifier set after it.
    pub fn apply(&mut self, key: KeyCode, down: bool) -> Modifiers {
        if let KeyCode::Mod(modifier, side) = key {
            if down {
                self.held.insert((modifier, side));
            } else {
                self.held.remove(&(modifier, side));
            }
        }
        self.current()
    }

    pub fn current(&self) -> Modifiers {
        let mut modifiers = Modifiers::NONE;
        for (modifier, _) in &self.held {
            modifiers.set(*modifier, true);
        }
        modifiers
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}
