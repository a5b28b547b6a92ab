//! Night sky, fog, and global light colors.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::hex_rgb;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Atmosphere", inline)]
#[serde(default)]
/// Sky, fog, and global lighting.
pub struct AtmosphereOptions {
    /// Clear color behind everything (sRGB).
    #[schemars(skip)]
    pub background: [f32; 3],
    /// Fog color (sRGB).
    #[schemars(skip)]
    pub fog_color: [f32; 3],
    /// Distance where fog starts.
    #[schemars(title = "Fog Near", range(min = 0.0, max = 500.0), extend("step" = 5.0))]
    pub fog_near: f32,
    /// Distance where fog is fully opaque.
    #[schemars(title = "Fog Far", range(min = 10.0, max = 1000.0), extend("step" = 10.0))]
    pub fog_far: f32,
    /// Ambient light color (sRGB).
    #[schemars(skip)]
    pub ambient_color: [f32; 3],
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub ambient_intensity: f32,
    /// Moonlight color (sRGB).
    #[schemars(skip)]
    pub moon_color: [f32; 3],
    /// Moonlight intensity.
    #[schemars(title = "Moonlight", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub moon_intensity: f32,
    /// Moonlight position; the light shines from here toward the origin.
    #[schemars(skip)]
    pub moon_position: [f32; 3],
    /// Spacing between street lights on each side of the road.
    #[schemars(title = "Street Light Spacing", range(min = 20.0, max = 200.0), extend("step" = 5.0))]
    pub street_light_spacing: f32,
}

impl Default for AtmosphereOptions {
    fn default() -> Self {
        Self {
            background: hex_rgb(0x0a0a1a),
            fog_color: hex_rgb(0x0a0a1a),
            fog_near: 50.0,
            fog_far: 300.0,
            ambient_color: hex_rgb(0x404060),
            ambient_intensity: 0.6,
            moon_color: hex_rgb(0x8888ff),
            moon_intensity: 0.4,
            moon_position: [50.0, 100.0, 50.0],
            street_light_spacing: 60.0,
        }
    }
}
