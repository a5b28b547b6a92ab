/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`CityCommand`](super::CityCommand) values.
///
/// # Example
///
/// ```ignore
/// let cmd = input_processor.handle_event(&InputEvent::Wheel { delta_y: 120.0 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Scroll wheel moved. Only the magnitude matters.
    Wheel {
        /// Vertical scroll amount in pixels (DOM `deltaY` convention).
        delta_y: f32,
    },
    /// Key pressed, identified by its `KeyCode` debug name (`"ArrowDown"`,
    /// `"Space"`, ...).
    Key(String),
    /// On-screen control activated.
    Button(UiButton),
}

/// On-screen controls that accompany the 3D view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiButton {
    /// Pause / resume the ambient drift.
    ToggleMotion,
    /// Return the camera to the start of the corridor.
    ResetCamera,
    /// Show / hide the text alternative of the billboards.
    ToggleTextPanel,
}

/// Pixels per wheel "line" when a platform reports line deltas.
pub const PIXELS_PER_LINE: f32 = 100.0;

#[cfg(feature = "viewer")]
impl From<winit::event::MouseScrollDelta> for InputEvent {
    fn from(delta: winit::event::MouseScrollDelta) -> Self {
        let delta_y = match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => {
                -y * PIXELS_PER_LINE
            }
            #[allow(clippy::cast_possible_truncation)]
            winit::event::MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
        };
        Self::Wheel { delta_y }
    }
}
