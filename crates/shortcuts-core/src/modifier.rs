// Shortcuts Modifier System
// Represents the modifier keys held during a combination (Shift, Ctrl, Alt, Meta)

use smallvec::SmallVec;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A keyboard modifier.
///
/// The string forms are the canonical names used in combination strings
/// and by the event normalizer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
    Meta,
}

impl Modifier {
    /// Check if a canonical token names a modifier
    pub fn is_modifier_name(token: &str) -> bool {
        Self::from_name(token).is_some()
    }

    /// Get a modifier from its canonical (lowercase) name
    pub fn from_name(token: &str) -> Option<Modifier> {
        token.parse().ok()
    }

    const fn bit(self) -> u8 {
        match self {
            Modifier::Shift => 0b0001,
            Modifier::Ctrl => 0b0010,
            Modifier::Alt => 0b0100,
            Modifier::Meta => 0b1000,
        }
    }
}

/// Unordered, deduplicated set of modifiers.
///
/// Stored as a bitmask so equality is set equality no matter in which order
/// the modifiers were added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet {
    bits: u8,
}

impl ModifierSet {
    /// The empty set
    pub const NONE: ModifierSet = ModifierSet { bits: 0 };

    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from the four modifier flags of a raw event
    pub fn from_flags(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut set = Self::new();
        if shift {
            set.insert(Modifier::Shift);
        }
        if alt {
            set.insert(Modifier::Alt);
        }
        if ctrl {
            set.insert(Modifier::Ctrl);
        }
        if meta {
            set.insert(Modifier::Meta);
        }
        set
    }

    /// Add a modifier. Returns false if it was already present.
    pub fn insert(&mut self, modifier: Modifier) -> bool {
        let present = self.contains(modifier);
        self.bits |= modifier.bit();
        !present
    }

    /// Remove a modifier. Returns true if it was present.
    pub fn remove(&mut self, modifier: Modifier) -> bool {
        let present = self.contains(modifier);
        self.bits &= !modifier.bit();
        present
    }

    /// Return a copy of this set with `modifier` added
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.bits & modifier.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate in canonical order (shift, ctrl, alt, meta)
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::iter().filter(move |m| self.contains(*m))
    }

    /// Snapshot of the members in canonical order
    pub fn to_vec(&self) -> SmallVec<[Modifier; 4]> {
        self.iter().collect()
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = Self::new();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

impl Extend<Modifier> for ModifierSet {
    fn extend<I: IntoIterator<Item = Modifier>>(&mut self, iter: I) {
        for modifier in iter {
            self.insert(modifier);
        }
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: SmallVec<[&'static str; 4]> = self.iter().map(<&'static str>::from).collect();
        write!(f, "{}", parts.join("+"))
    }
}

/// Order-independent comparison of two modifier lists.
///
/// Duplicates collapse, so `[ctrl, ctrl]` matches `[ctrl]`.
pub fn modifiers_match(m1: &[Modifier], m2: &[Modifier]) -> bool {
    m1.iter().copied().collect::<ModifierSet>() == m2.iter().copied().collect::<ModifierSet>()
}
