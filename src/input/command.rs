//! The session's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by the wheel, a key
//! press, or an on-screen button, is represented as a `CityCommand`.
//! The camera controller never cares *how* a command was triggered.

/// A discrete or parameterized operation on the travel state.
///
/// ```ignore
/// controller.apply(CityCommand::Scroll { delta: 120.0 });
/// controller.apply(CityCommand::TogglePause);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CityCommand {
    // ── Travel ──────────────────────────────────────────────────────
    /// Advance by a wheel event of magnitude `|delta|`.
    Scroll {
        /// Raw wheel delta; the sign is ignored.
        delta: f32,
    },
    /// Move one key step further into the city.
    StepForward,
    /// Move one key step back toward the start.
    StepBack,
    /// Set the travel target to the start of the corridor.
    JumpToStart,
    /// Set the travel target to the end of the travel range.
    JumpToEnd,

    // ── Playback ────────────────────────────────────────────────────
    /// Pause or resume ambient drift and travel input.
    TogglePause,
    /// Snap both current and target position back to the start.
    Reset,

    // ── Page chrome ─────────────────────────────────────────────────
    /// Show or hide the text alternative of the billboards.
    ToggleTextPanel,
}

impl CityCommand {
    /// Whether the command still applies while motion is paused.
    #[must_use]
    pub fn allowed_while_paused(self) -> bool {
        matches!(self, Self::TogglePause | Self::Reset | Self::ToggleTextPanel)
    }
}
