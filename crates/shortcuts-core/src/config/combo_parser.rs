// Shortcuts Config API - Combination String Parser
// Parses combination strings like "ctrl+shift+s" into a canonical KeyInfo

use crate::action::{select_action, EventAction};
use crate::combo::KeyInfo;
use crate::key::{CanonicalKey, KeyTables};
use crate::modifier::{Modifier, ModifierSet};

/// Split a sanitized combination string into tokens.
///
/// The lone string `"+"` is the plus key. Inside a longer string `"++"`
/// means "join, then the plus key", so `"ctrl++"` yields `["ctrl", "plus"]`.
pub fn split_combination(exp: &str) -> Vec<String> {
    if exp == "+" {
        return vec!["+".to_string()];
    }

    exp.replace("++", "+plus")
        .split('+')
        .map(str::to_string)
        .collect()
}

/// Parse a combination string into its canonical form.
///
/// Never fails: whitespace is stripped, tokens are lowercased and resolved
/// through the alias table, and the last token becomes the trigger key.
/// A string made only of modifiers produces a binding on the modifier key
/// itself.
///
/// # Arguments
/// * `tables` - Key tables the combination is resolved against
/// * `exp` - The combination string, e.g. `"mod+s"`
/// * `action` - Explicit event phase, or `None` to let the selector pick
///
/// # Examples
/// ```
/// use shortcuts_core::config::parse_combo_string;
/// use shortcuts_core::{EventAction, KeyTables, Modifier, Platform};
///
/// let tables = KeyTables::new(&Platform::new("Win32"));
/// let info = parse_combo_string(&tables, "shift+2", None);
/// assert_eq!(info.key, "@");
/// assert!(info.modifiers.contains(Modifier::Shift));
/// assert_eq!(info.action, EventAction::Down);
/// ```
pub fn parse_combo_string(tables: &KeyTables, exp: &str, action: Option<EventAction>) -> KeyInfo {
    let sanitized: String = exp
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let tokens = split_combination(&sanitized);

    // Checked on the raw tokens: an explicit shift means the trigger was
    // written as its unshifted key (`shift+2`)
    let shift_in_sequence = tokens.iter().any(|t| t == "shift");

    let mut modifiers = ModifierSet::new();
    let mut last = String::new();

    for token in &tokens {
        let resolved = tables.alias(token).unwrap_or(token.as_str());

        // Events carry the printed character, so the token itself stays;
        // only the implied shift is recorded
        if tables.is_shifted(resolved) {
            modifiers.insert(Modifier::Shift);
        }

        if let Some(modifier) = Modifier::from_name(resolved) {
            modifiers.insert(modifier);
        }

        last = resolved.to_string();
    }

    if shift_in_sequence {
        if let Some(shifted) = tables.shifted(&last) {
            last = shifted.to_string();
        }
    }

    let action = select_action(tables, &last, modifiers, action);
    KeyInfo::new(CanonicalKey::new(last), modifiers, action)
}
