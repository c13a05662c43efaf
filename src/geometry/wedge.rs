//! Annular wedges of the pie chart and the arc they sit on.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::Serialize;

use super::GeometryNode;
use crate::animation::{Animatable, TweenValue};
use crate::util::color::Color;

/// Center and radii shared by every wedge of a pie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcGeometry {
    /// Pie center in viewport pixels.
    pub center: DVec2,
    /// Radius of the empty middle (0 for a full pie).
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
}

impl ArcGeometry {
    /// Arc geometry for a `width × height` viewport: radius is half the
    /// smaller side, shrunk by `outer_spacing`; `inner_spacing` is the hole
    /// radius.
    #[must_use]
    pub fn for_viewport(
        width: f64,
        height: f64,
        inner_spacing: f64,
        outer_spacing: f64,
    ) -> Self {
        let radius = width.min(height) / 2.0;
        Self {
            center: DVec2::new(width / 2.0, height / 2.0),
            inner_radius: inner_spacing.max(0.0),
            outer_radius: (radius - outer_spacing).max(0.0),
        }
    }

    /// Angle of `point` around the center: 0 at twelve o'clock, growing
    /// clockwise, in `[0, 2π)`.
    #[must_use]
    pub fn angle_of(&self, point: DVec2) -> f64 {
        let d = point - self.center;
        d.x.atan2(-d.y).rem_euclid(TAU)
    }
}

/// One slice of the pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WedgeNode {
    /// Item caption.
    pub caption: String,
    /// Fill color.
    pub color: Color,
    /// Animated value driving the angles.
    pub value: f64,
    /// Start angle in radians, clockwise from twelve o'clock.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Value shown in the tooltip; updated immediately, never animated.
    pub display_value: f64,
    /// Tombstone flag.
    pub deleted: bool,
}

/// Animated attributes of a [`WedgeNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WedgeField {
    /// Value.
    Value,
    /// Start angle.
    StartAngle,
    /// End angle.
    EndAngle,
    /// Fill color.
    Color,
}

impl WedgeNode {
    /// Empty black wedge.
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            color: Color::BLACK,
            value: 0.0,
            start_angle: 0.0,
            end_angle: 0.0,
            display_value: 0.0,
            deleted: false,
        }
    }

    /// Angular extent.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether `point` lies inside this wedge of a pie drawn with `arc`.
    #[must_use]
    pub fn contains(&self, point: DVec2, arc: &ArcGeometry) -> bool {
        if self.sweep() <= 0.0 {
            return false;
        }
        let dist = point.distance(arc.center);
        if dist < arc.inner_radius || dist > arc.outer_radius {
            return false;
        }
        let angle = arc.angle_of(point);
        angle >= self.start_angle && angle < self.end_angle
    }
}

impl Animatable for WedgeNode {
    type Field = WedgeField;

    const FIELDS: &'static [WedgeField] = &[
        WedgeField::Value,
        WedgeField::StartAngle,
        WedgeField::EndAngle,
        WedgeField::Color,
    ];

    fn get(&self, field: WedgeField) -> TweenValue {
        match field {
            WedgeField::Value => self.value.into(),
            WedgeField::StartAngle => self.start_angle.into(),
            WedgeField::EndAngle => self.end_angle.into(),
            WedgeField::Color => self.color.into(),
        }
    }

    fn set(&mut self, field: WedgeField, value: TweenValue) {
        match (field, value) {
            (WedgeField::Value, TweenValue::Scalar(v)) => self.value = v,
            (WedgeField::StartAngle, TweenValue::Scalar(v)) => {
                self.start_angle = v;
            }
            (WedgeField::EndAngle, TweenValue::Scalar(v)) => self.end_angle = v,
            (WedgeField::Color, TweenValue::Color(c)) => self.color = c,
            _ => {}
        }
    }
}

impl GeometryNode for WedgeNode {
    fn caption(&self) -> &str {
        &self.caption
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    fn collapse(&mut self) {
        self.value = 0.0;
    }

    fn sync_cosmetic(&mut self, layout: &Self) {
        self.display_value = layout.display_value;
    }

    fn value(&self) -> f64 {
        self.value
    }
}
