//! Input handling: event types, the command vocabulary, and the input
//! processor that converts raw window/page events into commands.

/// Session command vocabulary.
pub mod command;
/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions.
pub mod keyboard;
/// Converts raw events into commands.
pub mod processor;

pub use command::CityCommand;
pub use event::{InputEvent, UiButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
