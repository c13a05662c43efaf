//! Bubble label fitting.

use crate::util::text::TextMeasure;

/// Font size the label box is measured at.
pub const BASE_FONT_SIZE: f64 = 24.0;

/// Font size that fits `caption` inside a circle of radius `r`.
///
/// The label may use the diameter minus a 10 % margin on each side (only
/// when the circle is not vanishingly small), shrunk by another 40 % when an
/// image shares the circle, and its height is capped at `3r/8`.
#[must_use]
pub fn fit_font_size<M: TextMeasure + ?Sized>(
    measure: &M,
    caption: &str,
    r: f64,
    show_image: bool,
    base_font_size: f64,
) -> f64 {
    let text = measure.measure(caption, base_font_size);
    if text.width <= 0.0 || text.height <= 0.0 || r <= 0.0 {
        return 0.0;
    }
    let mut max_width = r * 2.0;
    if max_width > r * 0.05 {
        max_width -= r * 0.2;
    }
    if show_image {
        max_width -= max_width * 0.4;
    }
    let mut scale = max_width / text.width;
    let max_height = r * 3.0 / 8.0;
    if text.height * scale > max_height {
        scale = max_height / text.height;
    }
    base_font_size * scale
}
