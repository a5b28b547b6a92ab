//! Corridor length and travel limits.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::clamp_field;
use crate::error::CityError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "City", inline)]
#[serde(default)]
/// Corridor dimensions.
pub struct CityOptions {
    /// Length of the corridor along -Z.
    #[schemars(title = "City Length", range(min = 100.0, max = 5000.0), extend("step" = 50.0))]
    pub length: f32,
    /// Distance short of the corridor end where travel stops.
    #[schemars(skip)]
    pub travel_margin: f32,
}

impl Default for CityOptions {
    fn default() -> Self {
        Self {
            length: 600.0,
            travel_margin: 50.0,
        }
    }
}

impl CityOptions {
    /// Lowest reachable travel position: `-(length) + margin`.
    #[must_use]
    pub fn travel_min(&self) -> f32 {
        (-self.length + self.travel_margin).min(0.0)
    }

    pub(super) fn validate(&mut self) -> Result<(), CityError> {
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(CityError::OptionsParse(format!(
                "city.length must be positive, got {}",
                self.length
            )));
        }
        clamp_field("city.travel_margin", &mut self.travel_margin, 0.0, self.length)
    }
}
