use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::layout::BarGeometry;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Segmented Bar Chart", inline)]
#[serde(default)]
/// Segmented bar chart metrics and choreography timing.
pub struct BarsOptions {
    /// Chart width in pixels.
    #[schemars(title = "Width", range(min = 1.0))]
    pub width: f64,
    /// Length of one full navigation or data change, in milliseconds.
    #[schemars(title = "Duration (ms)", range(max = 10000), extend("step" = 50))]
    pub duration_ms: u64,
    /// Height of one bar.
    #[schemars(title = "Bar Height", range(min = 1.0, max = 100.0))]
    pub bar_height: f64,
    /// Gap between rows.
    #[schemars(title = "Bar Spacing", range(min = 0.0, max = 50.0))]
    pub bar_spacing: f64,
    /// Space above the first row.
    #[schemars(title = "Top Offset", range(min = 0.0))]
    pub top_offset: f64,
    /// Space right of the longest bar.
    #[schemars(title = "Right Offset", range(min = 0.0))]
    pub right_offset: f64,
    /// Phases of a drill-down.
    #[schemars(skip)]
    pub down_cycles: u32,
    /// Phases of a drill-up.
    #[schemars(skip)]
    pub up_cycles: u32,
    /// Length of a width change, in milliseconds.
    #[schemars(skip)]
    pub resize_ms: u64,
    /// Estimated width of one tick label character.
    #[schemars(skip)]
    pub label_char_width: f64,
    /// Font size captions and breadcrumbs are measured at.
    #[schemars(skip)]
    pub label_font_size: f64,
    /// Gap before the first breadcrumb.
    #[schemars(skip)]
    pub breadcrumb_lead: f64,
    /// Gap between breadcrumbs.
    #[schemars(skip)]
    pub breadcrumb_gap: f64,
    /// Baseline of the breadcrumb trail.
    #[schemars(skip)]
    pub breadcrumb_y: f64,
}

impl Default for BarsOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            duration_ms: 2500,
            bar_height: 20.0,
            bar_spacing: 5.0,
            top_offset: 40.0,
            right_offset: 0.0,
            down_cycles: 3,
            up_cycles: 3,
            resize_ms: 100,
            label_char_width: 7.0,
            label_font_size: 12.0,
            breadcrumb_lead: 28.0,
            breadcrumb_gap: 15.0,
            breadcrumb_y: 10.0,
        }
    }
}

impl BarsOptions {
    /// Bar metrics before fitting to data.
    #[must_use]
    pub fn geometry(&self) -> BarGeometry {
        BarGeometry {
            width: self.width,
            bar_height: self.bar_height,
            spacing: self.bar_spacing,
            top_offset: self.top_offset,
            right_offset: self.right_offset,
            offset_left: 0.0,
            height: 0.0,
        }
    }
}
