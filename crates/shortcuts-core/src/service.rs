// Shortcuts Service
// Public bind/unbind API and the dispatcher that fires callbacks for incoming events

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use strum::IntoEnumIterator;

use crate::action::EventAction;
use crate::combo::KeyInfo;
use crate::config::combo_parser::parse_combo_string;
use crate::event::{normalize, EventSource, RawKeyEvent};
use crate::key::KeyTables;
use crate::mapping::{BindingRecord, BindingRegistry, Callback};
use crate::platform::Platform;

/// Execution context callbacks are run in.
///
/// Event listeners run outside the host UI framework's update cycle; the
/// host supplies a context that re-enters it so that state changed by a
/// callback is picked up.
pub trait ExecutionContext: Send + Sync {
    fn run(&self, callback: &dyn Fn());
}

/// Runs callbacks directly on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectContext;

impl ExecutionContext for DirectContext {
    fn run(&self, callback: &dyn Fn()) {
        callback()
    }
}

impl<F> ExecutionContext for F
where
    F: Fn(&dyn Fn()) + Send + Sync,
{
    fn run(&self, callback: &dyn Fn()) {
        self(callback)
    }
}

/// State shared between the service handle and its event listeners
struct Dispatcher {
    tables: KeyTables,
    registry: RwLock<BindingRegistry>,
    context: Box<dyn ExecutionContext>,
}

impl Dispatcher {
    fn handle_event(&self, event: &RawKeyEvent) -> bool {
        let Some(normalized) = normalize(&self.tables, event) else {
            log::trace!("Dropped {} event without a usable key", event.action);
            return false;
        };

        log::trace!(
            "Normalized {} event {:?} -> {} [{}]",
            normalized.action,
            event.key,
            normalized.key,
            normalized.modifiers
        );

        // Clone the callback out so the lock is released before it runs;
        // callbacks may bind or unbind
        let callback: Option<Callback> = self
            .registry
            .read()
            .find_match(
                normalized.key.as_str(),
                normalized.modifiers,
                normalized.action,
            )
            .map(|record| record.callback().clone());

        match callback {
            Some(callback) => {
                log::debug!(
                    "Firing binding for {} [{}] on {}",
                    normalized.key,
                    normalized.modifiers,
                    normalized.action
                );
                self.context.run(&*callback);
                true
            }
            None => {
                log::trace!("No binding for {} [{}]", normalized.key, normalized.modifiers);
                false
            }
        }
    }
}

/// Keyboard shortcut service.
///
/// Subscribes once to the press, down and up streams of an [`EventSource`]
/// at construction and fires at most one callback per event. Cloning the
/// service yields another handle to the same bindings.
#[derive(Clone)]
pub struct ShortcutService {
    inner: Arc<Dispatcher>,
}

impl ShortcutService {
    /// Create a service that runs callbacks directly
    pub fn new<S>(source: &mut S, platform: &Platform) -> Self
    where
        S: EventSource + ?Sized,
    {
        Self::with_context(source, platform, DirectContext)
    }

    /// Create a service that runs callbacks through `context`
    pub fn with_context<S, C>(source: &mut S, platform: &Platform, context: C) -> Self
    where
        S: EventSource + ?Sized,
        C: ExecutionContext + 'static,
    {
        let inner = Arc::new(Dispatcher {
            tables: KeyTables::new(platform),
            registry: RwLock::new(BindingRegistry::new()),
            context: Box::new(context),
        });

        for action in EventAction::iter() {
            let dispatcher = Arc::clone(&inner);
            source.add_event_listener(
                action,
                Box::new(move |event: &RawKeyEvent| {
                    dispatcher.handle_event(event);
                }),
            );
        }

        log::debug!("Shortcut service listening (platform: {})", platform);
        Self { inner }
    }

    /// Parse a combination the way `bind` and `unbind` do
    pub fn key_info(&self, combination: &str, action: Option<EventAction>) -> KeyInfo {
        parse_combo_string(&self.inner.tables, combination, action)
    }

    /// Register `callback` for `combination`.
    ///
    /// Never fails: malformed combinations bind to a degenerate key.
    pub fn bind<F>(&self, combination: &str, callback: F, action: Option<EventAction>)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let info = self.key_info(combination, action);
        if info.is_degenerate() {
            log::warn!(
                "Combination {:?} has no trigger key besides modifiers; bound as {}",
                combination,
                info
            );
        }
        log::debug!("Bind {:?} as {}", combination, info);

        let record = BindingRecord::new(info.modifiers, info.action, Arc::new(callback));
        self.inner.registry.write().add(info.key, record);
    }

    /// Remove one binding for `combination`.
    ///
    /// The first binding for the key with equal modifiers goes, whatever its
    /// action. No-op when nothing matches.
    pub fn unbind(&self, combination: &str, action: Option<EventAction>) {
        let info = self.key_info(combination, action);
        let removed = self
            .inner
            .registry
            .write()
            .remove_one_matching(info.key.as_str(), info.modifiers);

        match removed {
            Some(record) => log::debug!("Unbind {:?} ({} binding removed)", combination, record.action()),
            None => log::debug!("Unbind {:?}: nothing bound as {}", combination, info),
        }
    }

    /// Run the dispatch path for one event. Returns true if a callback fired.
    pub fn handle_event(&self, event: &RawKeyEvent) -> bool {
        self.inner.handle_event(event)
    }

    /// Number of registered bindings
    pub fn binding_count(&self) -> usize {
        self.inner.registry.read().len()
    }

    /// Parsed form of every registered binding, in bind order
    pub fn bindings(&self) -> Vec<KeyInfo> {
        self.inner
            .registry
            .read()
            .iter()
            .map(|(key, record)| KeyInfo::new(key.clone(), record.modifiers(), record.action()))
            .collect()
    }
}

impl fmt::Debug for ShortcutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutService")
            .field("bindings", &self.binding_count())
            .finish_non_exhaustive()
    }
}
