use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "BindingTable", into = "BindingTable")]
/// Configurable keyboard bindings mapping actions to key codes.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyR"`, `"ArrowRight"`, `"Escape"`, etc.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `TourNext` → `"ArrowRight"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action).
    key_to_action: HashMap<String, KeyAction>,
}

/// Serialized form: only the forward map. Deserializing through this type
/// rebuilds the reverse map, so lookups work right after a TOML load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct BindingTable {
    bindings: HashMap<KeyAction, String>,
}

impl From<BindingTable> for KeybindingOptions {
    fn from(table: BindingTable) -> Self {
        let mut opts = Self::default();
        // Partial tables override individual defaults.
        opts.bindings.extend(table.bindings);
        opts.rebuild_reverse_map();
        opts
    }
}

impl From<KeybindingOptions> for BindingTable {
    fn from(opts: KeybindingOptions) -> Self {
        Self {
            bindings: opts.bindings,
        }
    }
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::ToggleAutoRotate, "KeyR".into()),
            (KeyAction::ToggleFullscreen, "KeyF".into()),
            (KeyAction::TakeScreenshot, "KeyP".into()),
            (KeyAction::Cancel, "Escape".into()),
            (KeyAction::TourNext, "ArrowRight".into()),
            (KeyAction::TourPrev, "ArrowLeft".into()),
            (KeyAction::ToggleMeasuring, "KeyM".into()),
            (KeyAction::BeginPlacement, "KeyA".into()),
            (KeyAction::ResetView, "KeyQ".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    ///
    /// When several actions share a key, the one declared first in
    /// [`KeyAction`] keeps it and the others are unreachable.
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for action in KeyAction::ALL {
            let Some(key) = self.bindings.get(&action) else {
                continue;
            };
            if let Some(owner) = self.key_to_action.get(key) {
                log::warn!(
                    "key {key} is bound to both {owner:?} and {action:?}; \
                     keeping {owner:?}"
                );
                continue;
            }
            let _ = self.key_to_action.insert(key.clone(), action);
        }
    }

    /// Bind `action` to `key`, replacing its previous key.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let _ = self.bindings.insert(action, key.into());
        self.rebuild_reverse_map();
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_every_action() {
        let opts = KeybindingOptions::default();
        for action in KeyAction::ALL {
            let key = &opts.bindings[&action];
            assert_eq!(opts.lookup(key), Some(action));
        }
    }

    #[test]
    fn shared_key_goes_to_first_declared_action() {
        let opts: KeybindingOptions = toml::from_str(
            r#"
            [bindings]
            reset_view = "KeyR"
            "#,
        )
        .unwrap();
        assert_eq!(opts.lookup("KeyR"), Some(KeyAction::ToggleAutoRotate));
        assert_eq!(opts.lookup("KeyQ"), None);
    }

    #[test]
    fn rebinding_frees_the_old_key() {
        let mut opts = KeybindingOptions::default();
        opts.bind(KeyAction::ToggleAutoRotate, "KeyT");
        opts.bind(KeyAction::ResetView, "KeyR");
        assert_eq!(opts.lookup("KeyR"), Some(KeyAction::ResetView));
        assert_eq!(opts.lookup("KeyT"), Some(KeyAction::ToggleAutoRotate));
    }
}
