//! Billboard texture layout, text sizes, and font selection.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::clamp_field;
use crate::error::CityError;

/// Billboard texture layout and font selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BillboardOptions {
    /// Texture width in pixels.
    pub texture_width: u32,
    /// Texture height in pixels.
    pub texture_height: u32,
    /// Title font size in pixels.
    pub title_px: f32,
    /// Body font size in pixels.
    pub body_px: f32,
    /// Top edge of the title.
    pub title_top: f32,
    /// Top edge of the first body line.
    pub body_top: f32,
    /// Vertical distance between body lines.
    pub line_height: f32,
    /// Horizontal padding on each side of the wrapped body.
    pub padding: f32,
    /// World-space width of the billboard screen. Height follows the
    /// texture aspect ratio.
    pub screen_width: f32,
    /// TTF/OTF file used for billboard text. Well-known system fonts are
    /// tried when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for BillboardOptions {
    fn default() -> Self {
        Self {
            texture_width: 512,
            texture_height: 320,
            title_px: 42.0,
            body_px: 24.0,
            title_top: 30.0,
            body_top: 100.0,
            line_height: 32.0,
            padding: 30.0,
            screen_width: 10.0,
            font_path: None,
        }
    }
}

impl BillboardOptions {
    /// Maximum measured width of a wrapped body line.
    #[must_use]
    pub fn body_max_width(&self) -> f32 {
        self.texture_width as f32 - 2.0 * self.padding
    }

    /// World-space screen height matching the texture aspect ratio.
    #[must_use]
    pub fn screen_height(&self) -> f32 {
        if self.texture_width == 0 {
            return 0.0;
        }
        self.screen_width * self.texture_height as f32
            / self.texture_width as f32
    }

    pub(super) fn validate(&mut self) -> Result<(), CityError> {
        if self.texture_width == 0 || self.texture_height == 0 {
            return Err(CityError::OptionsParse(format!(
                "billboard texture must have an area, got {}x{}",
                self.texture_width, self.texture_height
            )));
        }
        let half_width = self.texture_width as f32 / 2.0;
        clamp_field("billboard.title_px", &mut self.title_px, 1.0, f32::MAX)?;
        clamp_field("billboard.body_px", &mut self.body_px, 1.0, f32::MAX)?;
        clamp_field("billboard.title_top", &mut self.title_top, f32::MIN, f32::MAX)?;
        clamp_field("billboard.body_top", &mut self.body_top, f32::MIN, f32::MAX)?;
        clamp_field("billboard.line_height", &mut self.line_height, 0.0, f32::MAX)?;
        clamp_field("billboard.padding", &mut self.padding, 0.0, half_width)?;
        clamp_field("billboard.screen_width", &mut self.screen_width, 1e-3, f32::MAX)
    }
}
