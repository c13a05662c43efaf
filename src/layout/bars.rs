//! Row and scale geometry of the segmented bar chart.

use super::hierarchy::Hierarchy;
use crate::util::text::TextMeasure;

/// Vertical offset from a row's top to its label baseline, beyond half the
/// bar height.
pub const LABEL_BASELINE_SHIFT: f64 = 4.0;

/// Chart-wide bar metrics. `offset_left` and `height` are derived from the
/// data by [`BarGeometry::fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    /// Chart width.
    pub width: f64,
    /// Height of one bar.
    pub bar_height: f64,
    /// Gap between rows, and between labels and bars.
    pub spacing: f64,
    /// Space above the first row (holds the axis and breadcrumbs).
    pub top_offset: f64,
    /// Space right of the longest bar.
    pub right_offset: f64,
    /// Bar origin: widest caption plus spacing.
    pub offset_left: f64,
    /// Chart height for the largest sibling list.
    pub height: f64,
}

impl Default for BarGeometry {
    fn default() -> Self {
        Self {
            width: 800.0,
            bar_height: 20.0,
            spacing: 5.0,
            top_offset: 40.0,
            right_offset: 0.0,
            offset_left: 0.0,
            height: 0.0,
        }
    }
}

impl BarGeometry {
    /// Derive `height` and `offset_left` from the hierarchy: enough rows for
    /// the largest sibling list, and room left of the bars for the widest
    /// caption at `font_size`.
    pub fn fit<M: TextMeasure + ?Sized>(
        &mut self,
        hierarchy: &Hierarchy,
        measure: &M,
        font_size: f64,
    ) {
        let rows = hierarchy.max_sibling_count();
        self.height = self.top_offset
            + rows as f64 * self.bar_height
            + self.spacing * (rows as f64 + 1.0);
        let widest = hierarchy
            .captions()
            .map(|c| measure.measure(c, font_size).width)
            .fold(0.0, f64::max);
        self.offset_left = widest + self.spacing;
    }

    /// Top edge of row `row`.
    #[must_use]
    pub fn row_y(&self, row: usize) -> f64 {
        self.top_offset + self.spacing + row as f64 * (self.bar_height + self.spacing)
    }

    /// Right edge of caption labels.
    #[must_use]
    pub fn label_x(&self) -> f64 {
        self.offset_left - self.spacing
    }

    /// Caption baseline of row `row`.
    #[must_use]
    pub fn label_y(&self, row: usize) -> f64 {
        self.label_y_at(self.row_y(row))
    }

    /// Caption baseline for a bar whose top edge is `bar_y`.
    #[must_use]
    pub fn label_y_at(&self, bar_y: f64) -> f64 {
        bar_y + self.bar_height / 2.0 + LABEL_BASELINE_SHIFT
    }

    /// Width available to the longest bar.
    #[must_use]
    pub fn available_width(&self) -> f64 {
        self.width - self.offset_left - self.right_offset - 1.0
    }

    /// Pixels per unit value when the largest bar is worth `max_value`.
    /// Zero when there is nothing to scale.
    #[must_use]
    pub fn factor(&self, max_value: f64) -> f64 {
        if max_value > 0.0 && max_value.is_finite() {
            self.available_width() / max_value
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::util::text::ApproxTextMeasure;

    #[test]
    fn fit_uses_deepest_level_and_widest_caption() {
        let items = vec![
            Item::branch(
                "ab",
                vec![
                    Item::leaf("a", 1.0),
                    Item::leaf("b", 1.0),
                    Item::leaf("c", 1.0),
                ],
            ),
            Item::leaf("abcd", 2.0),
        ];
        let h = Hierarchy::build(&items);
        let m = ApproxTextMeasure {
            advance: 0.5,
            line_height: 1.0,
        };
        let mut g = BarGeometry::default();
        g.fit(&h, &m, 10.0);
        assert_eq!(g.height, 40.0 + 3.0 * 20.0 + 5.0 * 4.0);
        assert_eq!(g.offset_left, 20.0 + 5.0);
    }

    #[test]
    fn rows_and_labels() {
        let g = BarGeometry {
            offset_left: 50.0,
            ..BarGeometry::default()
        };
        assert_eq!(g.row_y(0), 45.0);
        assert_eq!(g.row_y(2), 95.0);
        assert_eq!(g.label_x(), 45.0);
        assert_eq!(g.label_y(0), 45.0 + 10.0 + 4.0);
        assert_eq!(g.factor(749.0), 1.0);
        assert_eq!(g.factor(0.0), 0.0);
    }
}
