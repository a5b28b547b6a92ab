//! Converts raw platform events into session commands.
//!
//! The `InputProcessor` owns the key-binding map and is the only thing
//! that sits between raw window/page events and the camera controller's
//! [`apply`](crate::camera::controller::CameraMotionController::apply)
//! method.

use super::command::CityCommand;
use super::event::{InputEvent, UiButton};
use super::keyboard::KeyAction;
use crate::options::KeybindingOptions;

/// Converts raw input events into [`CityCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input_processor.handle_event(&event) {
///     session.execute(cmd, now);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self { key_bindings }
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeybindingOptions {
        &mut self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<CityCommand> {
        self.key_bindings.lookup(key).map(KeyAction::to_command)
    }

    /// Process a raw input event and return zero or one commands.
    #[must_use]
    pub fn handle_event(&self, event: &InputEvent) -> Option<CityCommand> {
        match event {
            InputEvent::Wheel { delta_y } => {
                Some(CityCommand::Scroll { delta: *delta_y })
            }
            InputEvent::Key(key) => self.handle_key_press(key),
            InputEvent::Button(button) => Some(Self::button_command(*button)),
        }
    }

    fn button_command(button: UiButton) -> CityCommand {
        match button {
            UiButton::ToggleMotion => CityCommand::TogglePause,
            UiButton::ResetCamera => CityCommand::Reset,
            UiButton::ToggleTextPanel => CityCommand::ToggleTextPanel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_becomes_scroll_command() {
        let input = InputProcessor::new();
        assert_eq!(
            input.handle_event(&InputEvent::Wheel { delta_y: -300.0 }),
            Some(CityCommand::Scroll { delta: -300.0 })
        );
    }

    #[test]
    fn default_keys_map_to_travel_commands() {
        let input = InputProcessor::new();
        let cases = [
            ("ArrowDown", CityCommand::StepForward),
            ("PageDown", CityCommand::StepForward),
            ("ArrowUp", CityCommand::StepBack),
            ("PageUp", CityCommand::StepBack),
            ("Home", CityCommand::JumpToStart),
            ("End", CityCommand::JumpToEnd),
            ("Space", CityCommand::TogglePause),
            ("Escape", CityCommand::Reset),
        ];
        for (key, expected) in cases {
            assert_eq!(
                input.handle_event(&InputEvent::Key(key.to_owned())),
                Some(expected),
                "key {key}"
            );
        }
        assert_eq!(input.handle_key_press("KeyQ"), None);
    }

    #[test]
    fn buttons_map_to_commands() {
        let input = InputProcessor::new();
        assert_eq!(
            input.handle_event(&InputEvent::Button(UiButton::ToggleMotion)),
            Some(CityCommand::TogglePause)
        );
        assert_eq!(
            input.handle_event(&InputEvent::Button(UiButton::ResetCamera)),
            Some(CityCommand::Reset)
        );
        assert_eq!(
            input.handle_event(&InputEvent::Button(UiButton::ToggleTextPanel)),
            Some(CityCommand::ToggleTextPanel)
        );
    }

    #[test]
    fn custom_bindings_take_effect() {
        let mut input = InputProcessor::new();
        input.key_bindings_mut().bind(KeyAction::StepForward, "KeyS");
        assert_eq!(
            input.handle_key_press("KeyS"),
            Some(CityCommand::StepForward)
        );
    }
}
