// Shortcuts KeyInfo Type
// A parsed combination: trigger key, modifier set and event phase

use std::fmt;

use crate::action::EventAction;
use crate::key::CanonicalKey;
use crate::modifier::{Modifier, ModifierSet};

/// Canonical form of a combination string such as `"ctrl+shift+s"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyInfo {
    /// The key that triggers the binding
    pub key: CanonicalKey,
    /// Modifiers that must be held
    pub modifiers: ModifierSet,
    /// Event phase the binding listens on
    pub action: EventAction,
}

impl KeyInfo {
    pub fn new(key: CanonicalKey, modifiers: ModifierSet, action: EventAction) -> Self {
        Self {
            key,
            modifiers,
            action,
        }
    }

    /// True when the trigger key is itself a modifier name or empty, as
    /// produced by strings like `"ctrl"`, `"ctrl+shift"` or `""`.
    ///
    /// Such bindings are valid but only fire when the modifier key itself
    /// is pressed.
    pub fn is_degenerate(&self) -> bool {
        self.key.is_empty() || Modifier::is_modifier_name(self.key.as_str())
    }
}

impl fmt::Display for KeyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{} ({})", self.key, self.action)
        } else {
            write!(f, "{}+{} ({})", self.modifiers, self.key, self.action)
        }
    }
}
