//! Damped scroll-driven travel along the corridor.
//!
//! The controller owns only scalar state: where the camera is along the
//! travel axis (`current`), where it is heading (`target`), and whether
//! ambient motion is paused. Commands move the target; every frame
//! [`tick`](CameraMotionController::tick) drifts the target (when
//! running) and closes a fixed fraction of the current-to-target gap.
//! The controller never touches a visual object; it writes into the
//! shared [`Camera`] through
//! [`update_camera`](CameraMotionController::update_camera).

use glam::Vec3;

use super::core::Camera;
use crate::input::CityCommand;
use crate::options::{CameraOptions, MotionOptions, Options};

/// Whether ambient drift and travel input are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionState {
    /// Drift and travel input are active.
    #[default]
    Running,
    /// Only pause/reset commands are honored; the camera still glides to
    /// the last target.
    Paused,
}

/// Clamped range of valid travel positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelBounds {
    /// Deepest reachable position (negative).
    pub min: f32,
    /// Start of the corridor.
    pub max: f32,
}

impl TravelBounds {
    /// Bounds `[min, 0]`. Non-finite or positive `min` collapses to 0.
    #[must_use]
    pub fn new(min: f32) -> Self {
        let min = if min.is_finite() { min.min(0.0) } else { 0.0 };
        Self { min, max: 0.0 }
    }

    /// Clamp a position into the bounds.
    #[must_use]
    pub fn clamp(&self, position: f32) -> f32 {
        if position.is_nan() {
            return self.max;
        }
        position.clamp(self.min, self.max)
    }

    /// Whether `position` lies inside the bounds.
    #[must_use]
    pub fn contains(&self, position: f32) -> bool {
        (self.min..=self.max).contains(&position)
    }
}

/// Scalar travel state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Interpolated displacement along the travel axis.
    pub current: f32,
    /// Displacement the camera is easing toward. Always within bounds.
    pub target: f32,
    /// Running or paused.
    pub motion: MotionState,
}

/// What a command did to the travel state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandEffect {
    /// Command had no effect (paused, or not a travel command).
    Ignored,
    /// The travel target moved.
    Moved,
    /// A wheel event moved the target with the given scroll speed.
    Scrolled {
        /// Scroll speed derived from the wheel delta.
        speed: f32,
    },
    /// Pause state flipped.
    PauseToggled {
        /// New pause state.
        paused: bool,
    },
    /// Current and target position snapped to the start.
    Reset,
    /// Text alternative panel shown or hidden. Produced by the session;
    /// the controller itself ignores the command.
    TextPanelToggled {
        /// New expanded state.
        expanded: bool,
    },
}

/// Converts commands into a travel target and eases toward it each frame.
#[derive(Debug, Clone)]
pub struct CameraMotionController {
    state: CameraState,
    bounds: TravelBounds,
    motion: MotionOptions,
}

impl CameraMotionController {
    /// Create a controller at the start of the corridor.
    #[must_use]
    pub fn new(motion: MotionOptions, bounds: TravelBounds, paused: bool) -> Self {
        let motion_state = if paused {
            MotionState::Paused
        } else {
            MotionState::Running
        };
        Self {
            state: CameraState {
                current: 0.0,
                target: 0.0,
                motion: motion_state,
            },
            bounds,
            motion,
        }
    }

    /// Create a controller from session options. Reduced motion boots the
    /// controller paused.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::new(
            options.motion.clone(),
            TravelBounds::new(options.city.travel_min()),
            options.accessibility.reduced_motion,
        )
    }

    /// Snapshot of the scalar state.
    #[must_use]
    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Interpolated travel position.
    #[must_use]
    pub fn current(&self) -> f32 {
        self.state.current
    }

    /// Travel target.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.state.target
    }

    /// Whether ambient motion is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.motion == MotionState::Paused
    }

    /// Travel bounds.
    #[must_use]
    pub fn bounds(&self) -> TravelBounds {
        self.bounds
    }

    /// Scroll speed produced by a wheel delta:
    /// `min(|delta| * sensitivity, max_scroll_speed)`.
    #[must_use]
    pub fn scroll_speed(&self, delta: f32) -> f32 {
        (delta.abs() * self.motion.wheel_sensitivity)
            .min(self.motion.max_scroll_speed)
    }

    /// Apply a command. Travel commands are ignored while paused;
    /// pause and reset always apply.
    pub fn apply(&mut self, command: CityCommand) -> CommandEffect {
        if self.is_paused() && !command.allowed_while_paused() {
            return CommandEffect::Ignored;
        }

        match command {
            CityCommand::Scroll { delta } => {
                let speed = self.scroll_speed(delta);
                let step = (self.motion.base_speed + speed) * self.motion.wheel_gain;
                self.set_target(self.state.target - step);
                CommandEffect::Scrolled { speed }
            }
            CityCommand::StepForward => {
                self.set_target(self.state.target - self.motion.key_step);
                CommandEffect::Moved
            }
            CityCommand::StepBack => {
                self.set_target(self.state.target + self.motion.key_step);
                CommandEffect::Moved
            }
            CityCommand::JumpToStart => {
                self.set_target(self.bounds.max);
                CommandEffect::Moved
            }
            CityCommand::JumpToEnd => {
                self.set_target(self.bounds.min);
                CommandEffect::Moved
            }
            CityCommand::TogglePause => CommandEffect::PauseToggled {
                paused: self.toggle_pause(),
            },
            CityCommand::Reset => {
                self.reset();
                CommandEffect::Reset
            }
            CityCommand::ToggleTextPanel => CommandEffect::Ignored,
        }
    }

    /// Flip between running and paused. Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> bool {
        self.state.motion = match self.state.motion {
            MotionState::Running => MotionState::Paused,
            MotionState::Paused => MotionState::Running,
        };
        self.is_paused()
    }

    /// Snap current and target back to the start without interpolation.
    pub fn reset(&mut self) {
        self.state.target = self.bounds.max;
        self.state.current = self.bounds.max;
    }

    /// Advance one frame: drift the target while running, then close a
    /// `damping` fraction of the gap. Convergence continues while paused.
    pub fn tick(&mut self) {
        if self.state.motion == MotionState::Running {
            let drift = self.motion.base_speed * self.motion.drift_factor;
            self.set_target(self.state.target - drift);
        }
        let gap = self.state.target - self.state.current;
        self.state.current += gap * self.motion.damping;
    }

    /// Write the current travel position into the shared camera.
    pub fn update_camera(&self, camera: &mut Camera, options: &CameraOptions) {
        camera.eye = Vec3::new(0.0, options.eye_height, self.state.current);
        camera.target = Vec3::new(
            0.0,
            options.eye_height,
            self.state.current - options.look_ahead,
        );
    }

    fn set_target(&mut self, target: f32) {
        self.state.target = self.bounds.clamp(target);
    }
}
