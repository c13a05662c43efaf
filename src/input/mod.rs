//! Input handling: pointer event types and the processor that turns raw
//! events into chart pointer actions.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into pointer actions.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::{InputProcessor, PointerAction};
