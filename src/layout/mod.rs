//! Layout: items to positioned geometry for a viewport.
//!
//! - [`pack`] places bubbles.
//! - [`pie`] assigns wedge angles.
//! - [`bars`], [`ticks`] and [`hierarchy`] serve the segmented bar chart.
//! - [`label`] fits bubble captions.

pub mod bars;
pub mod hierarchy;
pub mod label;
pub mod pack;
pub mod pie;
pub mod ticks;

pub use bars::BarGeometry;
pub use hierarchy::{Hierarchy, HierarchyNode, NodeId};
pub use pack::{pack, Circle};
pub use ticks::{calc_ticks, TickAxis};

use crate::geometry::{BubbleNode, WedgeNode};
use crate::item::Item;
use crate::util::color::Color;
use crate::util::text::TextMeasure;

/// Bubble layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleLayout {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Gap between circles.
    pub padding: f64,
    /// Font size labels are measured at.
    pub base_font_size: f64,
}

/// Resting bubble geometry for a flat item list, one node per item in
/// input order.
#[must_use]
pub fn layout_bubbles<M: TextMeasure + ?Sized>(
    items: &[Item],
    params: &BubbleLayout,
    measure: &M,
) -> Vec<BubbleNode> {
    let values: Vec<f64> = items.iter().map(Item::value).collect();
    let circles = pack(&values, params.width, params.height, params.padding);
    items
        .iter()
        .zip(circles)
        .map(|(item, circle)| {
            let show_image = item.image_path.is_some();
            BubbleNode {
                caption: item.caption.clone(),
                color: item.color.unwrap_or(Color::BLACK),
                x: circle.x,
                y: circle.y,
                r: circle.r,
                value: item.value(),
                font_size: label::fit_font_size(
                    measure,
                    &item.caption,
                    circle.r,
                    show_image,
                    params.base_font_size,
                ),
                image_path: item.image_path.clone(),
                show_image,
                deleted: false,
            }
        })
        .collect()
}

/// Resting wedges for a flat item list over the full circle.
#[must_use]
pub fn layout_wedges(items: &[Item]) -> Vec<WedgeNode> {
    let mut wedges: Vec<WedgeNode> = items
        .iter()
        .map(|item| {
            let value = item.value();
            WedgeNode {
                caption: item.caption.clone(),
                color: item.color.unwrap_or(Color::BLACK),
                value,
                start_angle: 0.0,
                end_angle: 0.0,
                display_value: value,
                deleted: false,
            }
        })
        .collect();
    pie::assign_angles(&mut wedges, pie::FULL_SWEEP);
    wedges
}
