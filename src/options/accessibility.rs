//! Reduced-motion preference.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[schemars(title = "Accessibility", inline)]
#[serde(default)]
/// Accessibility preferences read at session start.
pub struct AccessibilityOptions {
    /// Start with motion paused (host "prefers reduced motion").
    #[schemars(title = "Reduce Motion")]
    pub reduced_motion: bool,
}
