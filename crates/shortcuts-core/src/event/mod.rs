// Shortcuts Event Handling
// Raw keyboard events, their normalization, and the sources that deliver them

pub mod normalize;
pub mod source;

pub use normalize::{character_from_event, normalize, NormalizedEvent, RawKeyEvent};
pub use source::{EventBus, EventSource, KeyEventHandler};
