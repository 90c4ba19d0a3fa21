// Shortcuts Core Library
// Keyboard shortcut parsing, event normalization and dispatch

pub mod action;
pub mod combo;
pub mod config;
pub mod event;
pub mod key;
pub mod mapping;
pub mod modifier;
pub mod platform;
pub mod service;

pub use action::{select_action, EventAction};
pub use combo::KeyInfo;
pub use config::{parse_combo_string, split_combination, BindingEntry, Config, ConfigError};
pub use event::{
    character_from_event, normalize, EventBus, EventSource, KeyEventHandler, NormalizedEvent,
    RawKeyEvent,
};
pub use key::{CanonicalKey, KeyTables, MAX_FUNCTION_KEY, SHIFT_KEYS};
pub use mapping::{BindingRecord, BindingRegistry, Callback};
pub use modifier::{modifiers_match, Modifier, ModifierSet};
pub use platform::Platform;
pub use service::{DirectContext, ExecutionContext, ShortcutService};
