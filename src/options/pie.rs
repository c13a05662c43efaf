use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Pie Chart", inline)]
#[serde(default)]
/// Pie chart viewport and arc parameters.
pub struct PieOptions {
    /// Viewport width in pixels.
    #[schemars(title = "Width", range(min = 1.0))]
    pub width: f64,
    /// Viewport height in pixels.
    #[schemars(title = "Height", range(min = 1.0))]
    pub height: f64,
    /// Transition length in milliseconds.
    #[schemars(title = "Duration (ms)", range(max = 10000), extend("step" = 50))]
    pub duration_ms: u64,
    /// Radius of the empty middle.
    #[schemars(title = "Inner Spacing", range(min = 0.0))]
    pub inner_spacing: f64,
    /// Gap between the outer edge and the viewport.
    #[schemars(title = "Outer Spacing", range(min = 0.0))]
    pub outer_spacing: f64,
}

impl Default for PieOptions {
    fn default() -> Self {
        Self {
            width: 250.0,
            height: 250.0,
            duration_ms: 1000,
            inner_spacing: 0.0,
            outer_spacing: 1.0,
        }
    }
}
