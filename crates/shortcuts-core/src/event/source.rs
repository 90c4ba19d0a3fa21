// Shortcuts Event Source
// The host-side stream of keyboard events the dispatcher subscribes to

use smallvec::SmallVec;

use crate::action::EventAction;
use crate::event::normalize::RawKeyEvent;

/// Listener invoked for every event of the phase it was registered for
pub type KeyEventHandler = Box<dyn Fn(&RawKeyEvent) + Send + Sync>;

/// Anything that can deliver keyboard events by phase.
///
/// A browser document, a terminal reader, or an in-process [`EventBus`].
pub trait EventSource {
    /// Register `handler` for events of `action`
    fn add_event_listener(&mut self, action: EventAction, handler: KeyEventHandler);
}

/// Minimal in-process event source.
///
/// Events are delivered synchronously, in listener registration order, to
/// the listeners of the event's own phase.
#[derive(Default)]
pub struct EventBus {
    listeners: SmallVec<[(EventAction, KeyEventHandler); 3]>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener for its phase.
    ///
    /// Returns the number of listeners that received it.
    pub fn dispatch(&self, event: &RawKeyEvent) -> usize {
        let mut delivered = 0;
        for (action, handler) in &self.listeners {
            if *action == event.action {
                handler(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of listeners registered for `action`
    pub fn listener_count(&self, action: EventAction) -> usize {
        self.listeners.iter().filter(|(a, _)| *a == action).count()
    }
}

impl EventSource for EventBus {
    fn add_event_listener(&mut self, action: EventAction, handler: KeyEventHandler) {
        log::trace!("Listener added for {} events", action.event_name());
        self.listeners.push((action, handler));
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
