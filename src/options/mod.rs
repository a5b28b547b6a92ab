//! Centralized scene, motion, and accessibility options with TOML preset
//! support.
//!
//! All tweakable settings (camera framing, travel speed and damping, city
//! size, billboard layout, atmosphere, accessibility, keybindings) are
//! consolidated here. Options serialize to/from TOML so a preset can be
//! passed to the viewer on the command line.

mod accessibility;
mod atmosphere;
mod billboard;
mod camera;
mod city;
mod keybindings;
mod motion;

use std::path::Path;

pub use accessibility::AccessibilityOptions;
pub use atmosphere::AtmosphereOptions;
pub use billboard::BillboardOptions;
pub use camera::CameraOptions;
pub use city::CityOptions;
pub use keybindings::KeybindingOptions;
pub use motion::MotionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CityError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[motion]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and framing.
    pub camera: CameraOptions,
    /// Travel speed, damping, and input sensitivity.
    pub motion: MotionOptions,
    /// Corridor dimensions.
    pub city: CityOptions,
    /// Billboard texture layout and font.
    #[schemars(skip)]
    pub billboard: BillboardOptions,
    /// Sky, fog, and global lighting.
    pub atmosphere: AtmosphereOptions,
    /// Accessibility preferences.
    pub accessibility: AccessibilityOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults;
    /// out-of-range values are clamped (see [`Options::validate`]).
    pub fn from_toml(content: &str) -> Result<Self, CityError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| CityError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CityError> {
        let content = std::fs::read_to_string(path).map_err(CityError::Io)?;
        Self::from_toml(&content)
    }

    /// Write the JSON Schema to a file (pretty-printed).
    pub fn save_schema(path: &Path) -> Result<(), CityError> {
        let content = serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| CityError::OptionsParse(e.to_string()))?;
        std::fs::write(path, content).map_err(CityError::Io)
    }

    /// Bring every numeric option into its usable range.
    ///
    /// Values outside a range are clamped with a warning. Non-finite
    /// values, an empty corridor, an empty billboard texture, and a
    /// clipping range with `zfar <= znear` are rejected.
    pub fn validate(&mut self) -> Result<(), CityError> {
        self.camera.validate()?;
        self.motion.validate()?;
        self.city.validate()?;
        self.billboard.validate()?;
        Ok(())
    }
}

/// Clamp `value` into `min..=max`, warning when it moves.
fn clamp_field(
    name: &str,
    value: &mut f32,
    min: f32,
    max: f32,
) -> Result<(), CityError> {
    if !value.is_finite() {
        return Err(CityError::OptionsParse(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    let clamped = value.clamp(min, max);
    if clamped != *value {
        log::warn!("{name} = {value} is out of range, using {clamped}");
        *value = clamped;
    }
    Ok(())
}
