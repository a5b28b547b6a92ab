//! Perspective projection and eye placement.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::clamp_field;
use crate::error::CityError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and framing parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 30.0, max = 110.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Eye height above the road.
    #[schemars(title = "Eye Height", range(min = 1.0, max = 30.0), extend("step" = 0.5))]
    pub eye_height: f32,
    /// Distance ahead of the eye (along the corridor) that the camera looks
    /// at.
    #[schemars(skip)]
    pub look_ahead: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            eye_height: 5.0,
            look_ahead: 100.0,
        }
    }
}

impl CameraOptions {
    pub(super) fn validate(&mut self) -> Result<(), CityError> {
        clamp_field("camera.fovy", &mut self.fovy, 1.0, 179.0)?;
        clamp_field("camera.znear", &mut self.znear, 1e-3, f32::MAX)?;
        clamp_field("camera.zfar", &mut self.zfar, 0.0, f32::MAX)?;
        clamp_field("camera.eye_height", &mut self.eye_height, 0.0, f32::MAX)?;
        clamp_field("camera.look_ahead", &mut self.look_ahead, 1e-3, f32::MAX)?;
        if self.zfar <= self.znear {
            return Err(CityError::OptionsParse(format!(
                "camera.zfar ({}) must exceed camera.znear ({})",
                self.zfar, self.znear
            )));
        }
        Ok(())
    }
}
