//! Page chrome around the 3D view.
//!
//! The controller and the scroll energy are pure state; this module pushes
//! that state to whatever the host uses for its controls. A host
//! implements [`UiSurface`] and overrides only the methods for elements it
//! actually has: every method defaults to a no-op, so a missing element is
//! skipped on its own without affecting the others.

use crate::camera::{CameraMotionController, ScrollEnergy};

/// Label of the motion button while running.
pub const PAUSE_LABEL: &str = "Pause Animation";
/// Label of the motion button while paused.
pub const RESUME_LABEL: &str = "Resume Animation";
/// Label of the text-panel button while the panel is hidden.
pub const SHOW_TEXT_LABEL: &str = "Show Text Version";
/// Label of the text-panel button while the panel is shown.
pub const HIDE_TEXT_LABEL: &str = "Hide Text Version";

/// Host-side controls that mirror session state.
pub trait UiSurface {
    /// Speed indicator fill (`0..=100`) and its rounded ARIA value.
    fn set_speed_indicator(&mut self, _percentage: f32, _aria_value: u8) {}

    /// Motion toggle label and pressed state (`true` while paused).
    fn set_motion_button(&mut self, _label: &str, _pressed: bool) {}

    /// Text-panel toggle label and expanded state.
    fn set_text_panel(&mut self, _label: &str, _expanded: bool) {}
}

/// A host without any controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUi;

impl UiSurface for NoUi {}

/// UI-only state that has no bearing on travel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    /// Whether the text alternative panel is shown.
    pub text_panel_expanded: bool,
}

impl UiState {
    /// Flip the text panel. Returns the new expanded flag.
    pub fn toggle_text_panel(&mut self) -> bool {
        self.text_panel_expanded = !self.text_panel_expanded;
        self.text_panel_expanded
    }
}

/// Motion button label for a pause state.
#[must_use]
pub fn motion_label(paused: bool) -> &'static str {
    if paused {
        RESUME_LABEL
    } else {
        PAUSE_LABEL
    }
}

/// Text-panel button label for an expanded state.
#[must_use]
pub fn text_panel_label(expanded: bool) -> &'static str {
    if expanded {
        HIDE_TEXT_LABEL
    } else {
        SHOW_TEXT_LABEL
    }
}

/// Push the pause state to the motion button.
pub fn sync_motion(ui: &mut dyn UiSurface, paused: bool) {
    ui.set_motion_button(motion_label(paused), paused);
}

/// Push the scroll energy to the speed indicator.
pub fn sync_speed(ui: &mut dyn UiSurface, energy: &ScrollEnergy) {
    ui.set_speed_indicator(energy.percentage(), energy.aria_value());
}

/// Push the text panel state to its toggle.
pub fn sync_text_panel(ui: &mut dyn UiSurface, expanded: bool) {
    ui.set_text_panel(text_panel_label(expanded), expanded);
}

/// Push everything, used once at session start.
pub fn sync_all(
    ui: &mut dyn UiSurface,
    controller: &CameraMotionController,
    energy: &ScrollEnergy,
    state: UiState,
) {
    sync_motion(ui, controller.is_paused());
    sync_speed(ui, energy);
    sync_text_panel(ui, state.text_panel_expanded);
}
