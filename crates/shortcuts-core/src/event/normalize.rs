// Shortcuts Event Normalizer
// Translates raw keyboard events into canonical key + modifier set + phase

use crate::action::EventAction;
use crate::key::{CanonicalKey, KeyTables};
use crate::modifier::{Modifier, ModifierSet};

/// A keyboard event as delivered by the host.
///
/// `key` is the host's key identifier: the printed character for press
/// events, a name such as `"Escape"` or `"ArrowLeft"` for named keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub action: EventAction,
    pub key: String,
    pub shift_key: bool,
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
}

impl RawKeyEvent {
    /// Create an event with no modifiers held
    pub fn new(action: EventAction, key: impl Into<String>) -> Self {
        Self {
            action,
            key: key.into(),
            shift_key: false,
            ctrl_key: false,
            alt_key: false,
            meta_key: false,
        }
    }

    pub fn press(key: impl Into<String>) -> Self {
        Self::new(EventAction::Press, key)
    }

    pub fn down(key: impl Into<String>) -> Self {
        Self::new(EventAction::Down, key)
    }

    pub fn up(key: impl Into<String>) -> Self {
        Self::new(EventAction::Up, key)
    }

    /// Set the flag for one held modifier
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        match modifier {
            Modifier::Shift => self.shift_key = true,
            Modifier::Ctrl => self.ctrl_key = true,
            Modifier::Alt => self.alt_key = true,
            Modifier::Meta => self.meta_key = true,
        }
        self
    }

    /// Set the flags for every modifier in `modifiers`
    pub fn with_modifiers(self, modifiers: ModifierSet) -> Self {
        modifiers
            .iter()
            .fold(self, |event, modifier| event.with_modifier(modifier))
    }

    /// Modifier set read straight from the event flags
    pub fn modifiers(&self) -> ModifierSet {
        ModifierSet::from_flags(self.shift_key, self.ctrl_key, self.alt_key, self.meta_key)
    }
}

/// A raw event expressed in the same vocabulary as parsed combinations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub key: CanonicalKey,
    pub modifiers: ModifierSet,
    pub action: EventAction,
}

/// Canonical character for a raw event.
///
/// Press events already carry the printed character, so the tables are only
/// consulted for down/up events: named keys first, then keypad operators,
/// then a lowercased pass-through.
pub fn character_from_event(tables: &KeyTables, event: &RawKeyEvent) -> CanonicalKey {
    if !event.action.is_press() {
        if let Some(name) = tables.special(&event.key) {
            return CanonicalKey::new(name);
        }

        if let Some(name) = tables.keycode(&event.key) {
            return CanonicalKey::new(name);
        }
    }

    CanonicalKey::new(&event.key)
}

/// Normalize a raw event. Returns `None` when the event carries no usable
/// character.
pub fn normalize(tables: &KeyTables, event: &RawKeyEvent) -> Option<NormalizedEvent> {
    let key = character_from_event(tables, event);
    if key.is_empty() {
        return None;
    }

    Some(NormalizedEvent {
        key,
        modifiers: event.modifiers(),
        action: event.action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    fn tables() -> KeyTables {
        KeyTables::new(&Platform::new("Linux x86_64"))
    }

    #[test]
    fn test_press_lowercases_directly() {
        let tables = tables();
        let event = RawKeyEvent::press("A").with_modifier(Modifier::Shift);
        let normalized = normalize(&tables, &event).unwrap();
        assert_eq!(normalized.key, "a");
        assert_eq!(normalized.modifiers, ModifierSet::NONE.with(Modifier::Shift));
        assert_eq!(normalized.action, EventAction::Press);
    }

    #[test]
    fn test_press_skips_special_table() {
        // A press event for "Escape" is not expected, but must not be mapped to "esc"
        let normalized = normalize(&tables(), &RawKeyEvent::press("Escape")).unwrap();
        assert_eq!(normalized.key, "escape");

        let normalized = normalize(&tables(), &RawKeyEvent::press("Multiply")).unwrap();
        assert_eq!(normalized.key, "multiply");
    }

    #[test]
    fn test_down_uses_special_table() {
        let tables = tables();
        let cases = [
            ("Escape", "esc"),
            ("ArrowLeft", "left"),
            ("Left", "left"),
            (" ", "space"),
            ("F5", "f5"),
            ("F20", "f20"),
            ("Delete", "del"),
            ("OS", "meta"),
            ("0", "0"),
        ];
        for (raw, expected) in cases {
            let normalized = normalize(&tables, &RawKeyEvent::down(raw)).unwrap();
            assert_eq!(normalized.key, expected, "raw key {:?}", raw);
            let normalized = normalize(&tables, &RawKeyEvent::up(raw)).unwrap();
            assert_eq!(normalized.key, expected, "raw key {:?} on up", raw);
        }
    }

    #[test]
    fn test_down_uses_keycode_table() {
        let tables = tables();
        assert_eq!(normalize(&tables, &RawKeyEvent::down("Multiply")).unwrap().key, "*");
        assert_eq!(normalize(&tables, &RawKeyEvent::down("Subtract")).unwrap().key, "-");
        assert_eq!(normalize(&tables, &RawKeyEvent::down("Decimal")).unwrap().key, ".");
    }

    #[test]
    fn test_down_falls_back_to_lowercase() {
        let tables = tables();
        assert_eq!(normalize(&tables, &RawKeyEvent::down("S")).unwrap().key, "s");
        assert_eq!(normalize(&tables, &RawKeyEvent::down("@")).unwrap().key, "@");
    }

    #[test]
    fn test_modifiers_come_from_flags() {
        let tables = tables();
        let event = RawKeyEvent::down("Escape")
            .with_modifier(Modifier::Ctrl)
            .with_modifier(Modifier::Meta);
        let normalized = normalize(&tables, &event).unwrap();
        assert_eq!(
            normalized.modifiers,
            [Modifier::Meta, Modifier::Ctrl].into_iter().collect::<ModifierSet>()
        );
    }

    #[test]
    fn test_empty_key_is_dropped() {
        assert!(normalize(&tables(), &RawKeyEvent::down("")).is_none());
        assert!(normalize(&tables(), &RawKeyEvent::press("")).is_none());
    }

    #[test]
    fn test_with_modifiers_round_trip() {
        let set: ModifierSet = [Modifier::Shift, Modifier::Alt].into_iter().collect();
        let event = RawKeyEvent::up("x").with_modifiers(set);
        assert!(event.shift_key && event.alt_key);
        assert!(!event.ctrl_key && !event.meta_key);
        assert_eq!(event.modifiers(), set);
    }
}
