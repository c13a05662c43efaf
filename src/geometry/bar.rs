//! Bars, axis ticks and breadcrumbs of the segmented bar chart.

use glam::DVec2;
use serde::Serialize;

use crate::animation::{Animatable, TweenValue};
use crate::layout::hierarchy::NodeId;
use crate::util::color::Color;

/// Bar rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BarRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
    /// Fill opacity.
    pub opacity: f64,
}

/// Caption label drawn left of a bar (right-aligned at `x`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BarLabel {
    /// Anchor x (label's right edge).
    pub x: f64,
    /// Text baseline y.
    pub y: f64,
    /// Text opacity.
    pub opacity: f64,
}

/// One visible bar of the segmented bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Hierarchy node the bar shows.
    pub node: NodeId,
    /// Parent node, `None` on the top level.
    pub parent: Option<NodeId>,
    /// Node caption.
    pub caption: String,
    /// Recursive node value.
    pub value: f64,
    /// Fill color.
    pub color: Color,
    /// Bar rectangle.
    pub rect: BarRect,
    /// Caption label.
    pub text: BarLabel,
}

/// Animated attributes of a [`Segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentField {
    /// Bar left edge.
    X,
    /// Bar top edge.
    Y,
    /// Bar width.
    Width,
    /// Bar opacity.
    Opacity,
    /// Label opacity.
    TextOpacity,
}

impl Segment {
    /// Whether `point` lies on the visible part of the bar.
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        let r = &self.rect;
        r.opacity > 0.0
            && r.width > 0.0
            && point.x >= r.x
            && point.x <= r.x + r.width
            && point.y >= r.y
            && point.y <= r.y + r.height
    }
}

impl Animatable for Segment {
    type Field = SegmentField;

    const FIELDS: &'static [SegmentField] = &[
        SegmentField::X,
        SegmentField::Y,
        SegmentField::Width,
        SegmentField::Opacity,
        SegmentField::TextOpacity,
    ];

    fn get(&self, field: SegmentField) -> TweenValue {
        match field {
            SegmentField::X => self.rect.x.into(),
            SegmentField::Y => self.rect.y.into(),
            SegmentField::Width => self.rect.width.into(),
            SegmentField::Opacity => self.rect.opacity.into(),
            SegmentField::TextOpacity => self.text.opacity.into(),
        }
    }

    fn set(&mut self, field: SegmentField, value: TweenValue) {
        let Some(v) = value.as_scalar() else {
            return;
        };
        match field {
            SegmentField::X => self.rect.x = v,
            SegmentField::Y => self.rect.y = v,
            SegmentField::Width => self.rect.width = v,
            SegmentField::Opacity => self.rect.opacity = v,
            SegmentField::TextOpacity => self.text.opacity = v,
        }
    }
}

/// One x-axis tick with its value label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tick {
    /// Value printed at the tick.
    pub value: f64,
    /// Fraction digits used to print `value`.
    pub decimals: usize,
    /// Tick position.
    pub x: f64,
    /// Label opacity.
    pub opacity: f64,
}

/// Animated attributes of a [`Tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickField {
    /// Position.
    X,
    /// Printed value.
    Value,
    /// Opacity.
    Opacity,
}

impl Animatable for Tick {
    type Field = TickField;

    const FIELDS: &'static [TickField] =
        &[TickField::X, TickField::Value, TickField::Opacity];

    fn get(&self, field: TickField) -> TweenValue {
        match field {
            TickField::X => self.x.into(),
            TickField::Value => self.value.into(),
            TickField::Opacity => self.opacity.into(),
        }
    }

    fn set(&mut self, field: TickField, value: TweenValue) {
        let Some(v) = value.as_scalar() else {
            return;
        };
        match field {
            TickField::X => self.x = v,
            TickField::Value => self.value = v,
            TickField::Opacity => self.opacity = v,
        }
    }
}

/// One entry of the drill-down trail above the bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    /// Hierarchy node the entry names.
    pub node: NodeId,
    /// Node caption.
    pub caption: String,
    /// Anchor x (text's right edge).
    pub x: f64,
    /// Text baseline y.
    pub y: f64,
    /// Text color.
    pub color: Color,
    /// Text opacity.
    pub opacity: f64,
}

/// Animated attributes of a [`Breadcrumb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreadcrumbField {
    /// Anchor x.
    X,
    /// Baseline y.
    Y,
    /// Text color.
    Color,
    /// Opacity.
    Opacity,
}

impl Animatable for Breadcrumb {
    type Field = BreadcrumbField;

    const FIELDS: &'static [BreadcrumbField] = &[
        BreadcrumbField::X,
        BreadcrumbField::Y,
        BreadcrumbField::Color,
        BreadcrumbField::Opacity,
    ];

    fn get(&self, field: BreadcrumbField) -> TweenValue {
        match field {
            BreadcrumbField::X => self.x.into(),
            BreadcrumbField::Y => self.y.into(),
            BreadcrumbField::Color => self.color.into(),
            BreadcrumbField::Opacity => self.opacity.into(),
        }
    }

    fn set(&mut self, field: BreadcrumbField, value: TweenValue) {
        match (field, value) {
            (BreadcrumbField::X, TweenValue::Scalar(v)) => self.x = v,
            (BreadcrumbField::Y, TweenValue::Scalar(v)) => self.y = v,
            (BreadcrumbField::Color, TweenValue::Color(c)) => self.color = c,
            (BreadcrumbField::Opacity, TweenValue::Scalar(v)) => {
                self.opacity = v;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> Segment {
        Segment {
            node: 0,
            parent: None,
            caption: "a".to_owned(),
            value: 1.0,
            color: Color::BLACK,
            rect: BarRect {
                x: 10.0,
                y: 20.0,
                width: 100.0,
                height: 20.0,
                opacity: 1.0,
            },
            text: BarLabel::default(),
        }
    }

    #[test]
    fn bar_hit_test() {
        let mut s = segment();
        assert!(s.contains(DVec2::new(50.0, 30.0)));
        assert!(!s.contains(DVec2::new(5.0, 30.0)));
        assert!(!s.contains(DVec2::new(50.0, 41.0)));
        s.rect.opacity = 0.0;
        assert!(!s.contains(DVec2::new(50.0, 30.0)));
    }

    #[test]
    fn segment_fields_round_trip() {
        let mut s = segment();
        s.set(SegmentField::TextOpacity, TweenValue::Scalar(0.5));
        s.set(SegmentField::Width, TweenValue::Color(Color::BLACK));
        assert_eq!(s.get(SegmentField::TextOpacity), TweenValue::Scalar(0.5));
        assert_eq!(s.rect.width, 100.0);
    }
}
