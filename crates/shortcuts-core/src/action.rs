// Shortcuts Event Action
// The keyboard event phase a binding listens on, and default phase selection

use serde::Deserialize;
use strum_macros::{Display, EnumIter, EnumString};

use crate::key::KeyTables;
use crate::modifier::ModifierSet;

/// Which keyboard event phase a binding listens on.
///
/// Parses from the short names (`press`, `down`, `up`) and from the DOM
/// event names (`keypress`, `keydown`, `keyup`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    #[strum(to_string = "press", serialize = "keypress")]
    #[serde(alias = "keypress")]
    Press,
    #[strum(to_string = "down", serialize = "keydown")]
    #[serde(alias = "keydown")]
    Down,
    #[strum(to_string = "up", serialize = "keyup")]
    #[serde(alias = "keyup")]
    Up,
}

impl EventAction {
    /// Returns true for the press phase, the only one that carries the
    /// printed character
    pub fn is_press(self) -> bool {
        matches!(self, EventAction::Press)
    }

    /// Name of the DOM event this action corresponds to
    pub fn event_name(self) -> &'static str {
        match self {
            EventAction::Press => "keypress",
            EventAction::Down => "keydown",
            EventAction::Up => "keyup",
        }
    }
}

/// Pick the event phase a binding should be evaluated against.
///
/// Without an explicit action, keys that never produce a press event
/// (arrows, function keys, navigation keys) default to `Down` and
/// everything else to `Press`. A `Press` binding that carries any modifier
/// is moved to `Down`, since press events are unreliable while modifiers
/// are held.
pub fn select_action(
    tables: &KeyTables,
    key: &str,
    modifiers: ModifierSet,
    explicit: Option<EventAction>,
) -> EventAction {
    let action = explicit.unwrap_or_else(|| {
        if tables.has_reverse(key) {
            EventAction::Down
        } else {
            EventAction::Press
        }
    });

    if action == EventAction::Press && !modifiers.is_empty() {
        EventAction::Down
    } else {
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::Modifier;
    use crate::platform::Platform;
    use std::str::FromStr;

    fn tables() -> KeyTables {
        KeyTables::new(&Platform::new("Win32"))
    }

    #[test]
    fn test_action_names() {
        assert_eq!(EventAction::Press.to_string(), "press");
        assert_eq!(EventAction::Down.to_string(), "down");
        assert_eq!(EventAction::Up.event_name(), "keyup");
        assert!(EventAction::Press.is_press());
        assert!(!EventAction::Down.is_press());
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!(EventAction::from_str("press"), Ok(EventAction::Press));
        assert_eq!(EventAction::from_str("keydown"), Ok(EventAction::Down));
        assert_eq!(EventAction::from_str("up"), Ok(EventAction::Up));
        assert!(EventAction::from_str("hold").is_err());
    }

    #[test]
    fn test_default_action_for_plain_keys() {
        let tables = tables();
        assert_eq!(select_action(&tables, "a", ModifierSet::NONE, None), EventAction::Press);
        assert_eq!(select_action(&tables, "1", ModifierSet::NONE, None), EventAction::Press);
        assert_eq!(select_action(&tables, "*", ModifierSet::NONE, None), EventAction::Press);
    }

    #[test]
    fn test_default_action_for_named_keys() {
        let tables = tables();
        for key in ["esc", "left", "up", "f1", "f20", "space", "enter", "del"] {
            assert_eq!(
                select_action(&tables, key, ModifierSet::NONE, None),
                EventAction::Down,
                "{} should default to down",
                key
            );
        }
    }

    #[test]
    fn test_modifiers_force_down() {
        let tables = tables();
        let ctrl = ModifierSet::NONE.with(Modifier::Ctrl);
        assert_eq!(select_action(&tables, "s", ctrl, None), EventAction::Down);
        assert_eq!(
            select_action(&tables, "s", ctrl, Some(EventAction::Press)),
            EventAction::Down
        );
        let shift = ModifierSet::NONE.with(Modifier::Shift);
        assert_eq!(select_action(&tables, "@", shift, None), EventAction::Down);
    }

    #[test]
    fn test_explicit_action_is_honored() {
        let tables = tables();
        let ctrl = ModifierSet::NONE.with(Modifier::Ctrl);
        assert_eq!(
            select_action(&tables, "esc", ModifierSet::NONE, Some(EventAction::Up)),
            EventAction::Up
        );
        assert_eq!(
            select_action(&tables, "s", ctrl, Some(EventAction::Up)),
            EventAction::Up
        );
        assert_eq!(
            select_action(&tables, "a", ModifierSet::NONE, Some(EventAction::Press)),
            EventAction::Press
        );
    }
}
