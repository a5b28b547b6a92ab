//! Key-to-action map, editable from a preset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format
/// (`"ArrowDown"`, `"PageUp"`, `"Space"`, ...). An action may be bound to
/// several keys.
pub struct KeybindingOptions {
    /// Maps action → key strings (e.g. `step_forward` → `["ArrowDown",
    /// "PageDown"]`).
    pub bindings: BTreeMap<KeyAction, Vec<String>>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = BTreeMap::from([
            (
                KeyAction::StepForward,
                vec!["ArrowDown".into(), "PageDown".into()],
            ),
            (KeyAction::StepBack, vec!["ArrowUp".into(), "PageUp".into()]),
            (KeyAction::JumpToStart, vec!["Home".into()]),
            (KeyAction::JumpToEnd, vec!["End".into()]),
            (KeyAction::TogglePause, vec!["Space".into()]),
            (KeyAction::Reset, vec!["Escape".into()]),
            (KeyAction::ToggleTextPanel, vec!["KeyT".into()]),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action bound to a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| k == key))
            .map(|(action, _)| *action)
    }

    /// Bind `key` to `action`, removing it from any other action first.
    pub fn bind(&mut self, action: KeyAction, key: &str) {
        for keys in self.bindings.values_mut() {
            keys.retain(|k| k != key);
        }
        self.bindings.entry(action).or_default().push(key.to_owned());
    }
}
