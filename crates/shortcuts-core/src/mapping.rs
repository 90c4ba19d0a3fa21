// Shortcuts Binding Registry
// Canonical key -> ordered binding records

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use crate::action::EventAction;
use crate::key::CanonicalKey;
use crate::modifier::ModifierSet;

/// Zero-argument procedure run when a binding fires
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// One registered binding for a key. Never mutated after creation.
#[derive(Clone)]
pub struct BindingRecord {
    modifiers: ModifierSet,
    action: EventAction,
    callback: Callback,
}

impl BindingRecord {
    pub fn new(modifiers: ModifierSet, action: EventAction, callback: Callback) -> Self {
        Self {
            modifiers,
            action,
            callback,
        }
    }

    pub fn modifiers(&self) -> ModifierSet {
        self.modifiers
    }

    pub fn action(&self) -> EventAction {
        self.action
    }

    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    /// True if this record fires for `modifiers` on `action`
    pub fn matches(&self, modifiers: ModifierSet, action: EventAction) -> bool {
        self.action == action && self.modifiers == modifiers
    }
}

impl fmt::Debug for BindingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRecord")
            .field("modifiers", &self.modifiers)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

type Records = SmallVec<[BindingRecord; 2]>;

/// Bindings grouped by trigger key.
///
/// Records for a key keep insertion order, which is the tie-break when
/// duplicate bindings exist.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: IndexMap<CanonicalKey, Records>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for `key`
    pub fn add(&mut self, key: CanonicalKey, record: BindingRecord) {
        self.bindings.entry(key).or_default().push(record);
    }

    /// Remove the first record for `key` whose modifier set equals
    /// `modifiers`, whatever its action.
    ///
    /// Returns the removed record; at most one is removed per call.
    pub fn remove_one_matching(
        &mut self,
        key: &str,
        modifiers: ModifierSet,
    ) -> Option<BindingRecord> {
        let records = self.bindings.get_mut(key)?;
        let index = records.iter().position(|r| r.modifiers == modifiers)?;
        let removed = records.remove(index);

        if records.is_empty() {
            self.bindings.shift_remove(key);
        }

        Some(removed)
    }

    /// First record for `key` that fires for `modifiers` on `action`
    pub fn find_match(
        &self,
        key: &str,
        modifiers: ModifierSet,
        action: EventAction,
    ) -> Option<&BindingRecord> {
        self.bindings
            .get(key)?
            .iter()
            .find(|r| r.matches(modifiers, action))
    }

    /// All records for `key`, in insertion order
    pub fn records(&self, key: &str) -> &[BindingRecord] {
        self.bindings.get(key).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Iterate every (key, record) pair; keys in first-bound order
    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalKey, &BindingRecord)> {
        self.bindings
            .iter()
            .flat_map(|(key, records)| records.iter().map(move |r| (key, r)))
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.bindings.values().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Drop every binding
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}
