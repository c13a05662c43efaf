use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Bubble Chart", inline)]
#[serde(default)]
/// Bubble chart viewport and packing parameters.
pub struct BubbleOptions {
    /// Viewport width in pixels.
    #[schemars(title = "Width", range(min = 1.0))]
    pub width: f64,
    /// Viewport height in pixels.
    #[schemars(title = "Height", range(min = 1.0))]
    pub height: f64,
    /// Transition length in milliseconds.
    #[schemars(title = "Duration (ms)", range(max = 10000), extend("step" = 50))]
    pub duration_ms: u64,
    /// Gap between circles.
    #[schemars(title = "Padding", range(min = 0.0, max = 50.0), extend("step" = 1.0))]
    pub padding: f64,
    /// Font size labels are measured at before fitting.
    #[schemars(skip)]
    pub base_font_size: f64,
}

impl Default for BubbleOptions {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            duration_ms: 1000,
            padding: 5.0,
            base_font_size: 24.0,
        }
    }
}
