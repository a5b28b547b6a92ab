//! Bindable key actions and their mapping onto session commands.

use serde::{Deserialize, Serialize};

use super::command::CityCommand;

/// Travel actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// step_forward = ["ArrowDown", "PageDown"]
/// toggle_pause = ["Space"]
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Move one step further into the city.
    StepForward,
    /// Move one step back toward the start.
    StepBack,
    /// Jump to the start of the corridor.
    JumpToStart,
    /// Jump to the end of the travel range.
    JumpToEnd,
    /// Pause or resume ambient motion.
    TogglePause,
    /// Snap the camera back to the start.
    Reset,
    /// Show or hide the text alternative panel.
    ToggleTextPanel,
}

impl KeyAction {
    /// Convert to the corresponding parameterless [`CityCommand`].
    #[must_use]
    pub fn to_command(self) -> CityCommand {
        match self {
            Self::StepForward => CityCommand::StepForward,
            Self::StepBack => CityCommand::StepBack,
            Self::JumpToStart => CityCommand::JumpToStart,
            Self::JumpToEnd => CityCommand::JumpToEnd,
            Self::TogglePause => CityCommand::TogglePause,
            Self::Reset => CityCommand::Reset,
            Self::ToggleTextPanel => CityCommand::ToggleTextPanel,
        }
    }
}
