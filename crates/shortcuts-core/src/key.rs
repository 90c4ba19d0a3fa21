// Shortcuts Key Tables
// Canonical key names and the lookup tables that translate raw key identifiers into them

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use crate::platform::Platform;

/// A lowercase token identifying a physical or logical key (`"a"`, `"f5"`, `"esc"`, `"*"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Create a canonical key, lowercasing the input
    pub fn new(name: impl AsRef<str>) -> Self {
        CanonicalKey(name.as_ref().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<str> for CanonicalKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CanonicalKey {
    fn from(name: &str) -> Self {
        CanonicalKey::new(name)
    }
}

impl PartialEq<str> for CanonicalKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named keys that never produce a press event, keyed by raw identifier.
///
/// Function keys and digits are appended when the tables are built.
const SPECIAL_KEYS: &[(&str, &str)] = &[
    ("Backspace", "backspace"),
    ("Tab", "tab"),
    ("Enter", "enter"),
    ("Shift", "shift"),
    ("Control", "ctrl"),
    ("Alt", "alt"),
    ("CapsLock", "capslock"),
    ("Escape", "esc"),
    (" ", "space"),
    ("PageUp", "pageup"),
    ("PageDown", "pagedown"),
    ("End", "end"),
    ("Home", "home"),
    ("ArrowLeft", "left"),
    ("ArrowUp", "up"),
    ("ArrowRight", "right"),
    ("ArrowDown", "down"),
    ("Left", "left"),
    ("Up", "up"),
    ("Right", "right"),
    ("Down", "down"),
    ("Insert", "ins"),
    ("Delete", "del"),
    ("Meta", "meta"),
    ("OS", "meta"),
];

/// Numeric keypad operators as reported on down/up events
const KEYCODE_KEYS: &[(&str, &str)] = &[
    ("Multiply", "*"),
    ("*", "*"),
    ("Add", "+"),
    ("+", "+"),
    ("Subtract", "-"),
    ("-", "-"),
    ("Decimal", "."),
    (".", "."),
    ("Divide", "/"),
    ("/", "/"),
];

/// Characters that need shift on a US layout, mapped to the unshifted key
/// that produces them.
pub const SHIFT_KEYS: &[(&str, &str)] = &[
    ("~", "`"),
    ("!", "1"),
    ("@", "2"),
    ("#", "3"),
    ("$", "4"),
    ("%", "5"),
    ("^", "6"),
    ("&", "7"),
    ("*", "8"),
    ("(", "9"),
    (")", "0"),
    ("_", "-"),
    ("+", "="),
    (":", ";"),
    ("\"", "'"),
    ("<", ","),
    (">", "."),
    ("?", "/"),
    ("|", "\\"),
];

/// Human-friendly synonyms. `mod` is platform dependent and added at build time.
const ALIASES: &[(&str, &str)] = &[
    ("option", "alt"),
    ("command", "meta"),
    ("return", "enter"),
    ("escape", "esc"),
    ("plus", "+"),
    ("os", "meta"),
];

/// Highest function key with a canonical name
pub const MAX_FUNCTION_KEY: u8 = 20;

/// Read-only lookup tables shared by the parser, the normalizer and the
/// action selector. Built once per service.
#[derive(Debug, Clone)]
pub struct KeyTables {
    special: HashMap<String, String>,
    keycodes: HashMap<&'static str, &'static str>,
    shift: HashMap<&'static str, &'static str>,
    unshift: HashMap<&'static str, &'static str>,
    aliases: HashMap<&'static str, &'static str>,
    reverse: HashMap<String, String>,
}

impl KeyTables {
    /// Build the tables, resolving the `mod` alias for `platform`
    pub fn new(platform: &Platform) -> Self {
        let mut special: HashMap<String, String> = SPECIAL_KEYS
            .iter()
            .map(|(raw, name)| (raw.to_string(), name.to_string()))
            .collect();

        for n in 1..=MAX_FUNCTION_KEY {
            special.insert(format!("F{}", n), format!("f{}", n));
        }

        // Digits stay strings so numpad 0 on a down event is a real key
        for n in 0..10 {
            special.insert(n.to_string(), n.to_string());
        }

        // Built in table order so the later raw name wins when two share a
        // canonical name (`Left` over `ArrowLeft`, `OS` over `Meta`).
        // Numeric entries are left out: press events already carry the digit
        let reverse = SPECIAL_KEYS
            .iter()
            .map(|&(raw, name)| (raw.to_string(), name.to_string()))
            .chain((1..=MAX_FUNCTION_KEY).map(|n| (format!("F{}", n), format!("f{}", n))))
            .filter(|(_, name)| name.parse::<i64>().is_err())
            .map(|(raw, name)| (name, raw))
            .collect();

        let shift: HashMap<_, _> = SHIFT_KEYS.iter().copied().collect();
        let unshift = SHIFT_KEYS
            .iter()
            .map(|&(shifted, base)| (base, shifted))
            .collect();

        let mut aliases: HashMap<_, _> = ALIASES.iter().copied().collect();
        aliases.insert("mod", platform.mod_key().into());

        Self {
            special,
            keycodes: KEYCODE_KEYS.iter().copied().collect(),
            shift,
            unshift,
            aliases,
            reverse,
        }
    }

    /// Canonical name of a named key (arrows, function keys, digits, ...)
    pub fn special(&self, raw: &str) -> Option<&str> {
        self.special.get(raw).map(String::as_str)
    }

    /// Canonical name of a numeric keypad operator
    pub fn keycode(&self, raw: &str) -> Option<&str> {
        self.keycodes.get(raw).copied()
    }

    /// Resolve a synonym such as `option` or `mod`
    pub fn alias(&self, token: &str) -> Option<&str> {
        self.aliases.get(token).copied()
    }

    /// True if `ch` needs shift on a US layout
    pub fn is_shifted(&self, ch: &str) -> bool {
        self.shift.contains_key(ch)
    }

    /// Unshifted key that produces the shifted character `ch` (`"@"` -> `"2"`)
    pub fn shift_root(&self, ch: &str) -> Option<&str> {
        self.shift.get(ch).copied()
    }

    /// Character produced by `base` with shift held (`"2"` -> `"@"`)
    pub fn shifted(&self, base: &str) -> Option<&str> {
        self.unshift.get(base).copied()
    }

    /// Raw identifier for a canonical name that has no press equivalent
    pub fn reverse(&self, name: &str) -> Option<&str> {
        self.reverse.get(name).map(String::as_str)
    }

    pub fn has_reverse(&self, name: &str) -> bool {
        self.reverse.contains_key(name)
    }
}
