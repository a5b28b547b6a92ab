//! Travel speed, damping, and wheel sensitivity.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::clamp_field;
use crate::error::CityError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
/// Travel speed, damping, and input sensitivity.
pub struct MotionOptions {
    /// Base travel speed. Scales ambient drift and every wheel step.
    #[schemars(title = "Base Speed", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub base_speed: f32,
    /// Fraction of the current-to-target gap closed each frame.
    #[schemars(title = "Damping", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping: f32,
    /// Distance moved by one arrow/page key press.
    #[schemars(title = "Key Step", range(min = 1.0, max = 100.0), extend("step" = 1.0))]
    pub key_step: f32,
    /// Scroll speed gained per unit of wheel delta.
    #[schemars(skip)]
    pub wheel_sensitivity: f32,
    /// Upper bound on scroll speed from a single wheel event.
    #[schemars(skip)]
    pub max_scroll_speed: f32,
    /// Multiplier applied to `base_speed + scroll_speed` per wheel event.
    #[schemars(skip)]
    pub wheel_gain: f32,
    /// Fraction of `base_speed` drifted per frame while running.
    #[schemars(skip)]
    pub drift_factor: f32,
    /// Milliseconds after the last wheel event before scroll energy drops
    /// to zero.
    #[schemars(skip)]
    pub energy_decay_ms: u64,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            base_speed: 0.5,
            damping: 0.05,
            key_step: 20.0,
            wheel_sensitivity: 0.02,
            max_scroll_speed: 5.0,
            wheel_gain: 2.0,
            drift_factor: 0.1,
            energy_decay_ms: 150,
        }
    }
}

impl MotionOptions {
    /// Clamp damping into `0.01..=1` so the follow gap always shrinks,
    /// and keep speeds and gains non-negative.
    pub(super) fn validate(&mut self) -> Result<(), CityError> {
        clamp_field("motion.damping", &mut self.damping, 0.01, 1.0)?;
        for (name, value) in [
            ("motion.base_speed", &mut self.base_speed),
            ("motion.key_step", &mut self.key_step),
            ("motion.wheel_sensitivity", &mut self.wheel_sensitivity),
            ("motion.max_scroll_speed", &mut self.max_scroll_speed),
            ("motion.wheel_gain", &mut self.wheel_gain),
            ("motion.drift_factor", &mut self.drift_factor),
        ] {
            clamp_field(name, value, 0.0, f32::MAX)?;
        }
        Ok(())
    }
}
