// Shortcuts Scripted Events
// `--fire` specs: ACTION:KEY[:MOD,MOD] describing one raw keyboard event

use std::fmt;
use std::str::FromStr;

use shortcuts_core::{EventAction, Modifier, ModifierSet, RawKeyEvent};

/// One scripted keyboard event, e.g. `down:Escape` or `down:@:shift`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireSpec {
    pub action: EventAction,
    pub key: String,
    pub modifiers: ModifierSet,
}

impl FireSpec {
    /// The raw event this spec describes
    pub fn to_event(&self) -> RawKeyEvent {
        RawKeyEvent::new(self.action, self.key.clone()).with_modifiers(self.modifiers)
    }
}

/// Parse a comma separated modifier list. None unless every item is a modifier.
fn parse_modifiers(list: &str) -> Option<ModifierSet> {
    if list.is_empty() {
        return None;
    }
    list.split(',')
        .map(|name| Modifier::from_name(&name.trim().to_ascii_lowercase()))
        .collect()
}

impl FromStr for FireSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (action, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("expected ACTION:KEY[:MODS], got '{}'", s))?;

        let action = action
            .to_ascii_lowercase()
            .parse::<EventAction>()
            .map_err(|_| format!("unknown action '{}' (use press, down or up)", action))?;

        // The key itself may be ':' so the trailing part only counts as a
        // modifier list when every item names a modifier
        let (key, modifiers) = match rest.rsplit_once(':') {
            Some((key, mods)) if !key.is_empty() => match parse_modifiers(mods) {
                Some(modifiers) => (key, modifiers),
                None => (rest, ModifierSet::NONE),
            },
            _ => (rest, ModifierSet::NONE),
        };

        if key.is_empty() {
            return Err(format!("missing key in '{}'", s));
        }

        Ok(Self {
            action,
            key: key.to_string(),
            modifiers,
        })
    }
}

impl fmt::Display for FireSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action, self.key)?;
        if !self.modifiers.is_empty() {
            let names: Vec<&'static str> = self.modifiers.iter().map(<&'static str>::from).collect();
            write!(f, ":{}", names.join(","))?;
        }
        Ok(())
    }
}
