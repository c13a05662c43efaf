//! Circles of the bubble chart.

use glam::DVec2;
use serde::Serialize;

use super::GeometryNode;
use crate::animation::{Animatable, TweenValue};
use crate::util::color::Color;

/// A labelled circle of the bubble chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleNode {
    /// Item caption.
    pub caption: String,
    /// Fill color.
    pub color: Color,
    /// Center x in viewport pixels.
    pub x: f64,
    /// Center y in viewport pixels.
    pub y: f64,
    /// Radius in pixels.
    pub r: f64,
    /// Item value.
    pub value: f64,
    /// Label font size fitted to the circle.
    pub font_size: f64,
    /// Image drawn inside the circle.
    pub image_path: Option<String>,
    /// Whether an image is drawn above the label.
    pub show_image: bool,
    /// Tombstone flag.
    pub deleted: bool,
}

/// Animated attributes of a [`BubbleNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BubbleField {
    /// Center x.
    X,
    /// Center y.
    Y,
    /// Radius.
    R,
    /// Value.
    Value,
    /// Label font size.
    FontSize,
    /// Fill color.
    Color,
}

impl BubbleNode {
    /// Zero-sized black bubble at the origin.
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            color: Color::BLACK,
            x: 0.0,
            y: 0.0,
            r: 0.0,
            value: 0.0,
            font_size: 0.0,
            image_path: None,
            show_image: false,
            deleted: false,
        }
    }

    /// Circle center.
    #[must_use]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Whether `point` lies inside the circle.
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        self.r > 0.0 && point.distance_squared(self.center()) <= self.r * self.r
    }
}

impl Animatable for BubbleNode {
    type Field = BubbleField;

    const FIELDS: &'static [BubbleField] = &[
        BubbleField::X,
        BubbleField::Y,
        BubbleField::R,
        BubbleField::Value,
        BubbleField::FontSize,
        BubbleField::Color,
    ];

    fn get(&self, field: BubbleField) -> TweenValue {
        match field {
            BubbleField::X => self.x.into(),
            BubbleField::Y => self.y.into(),
            BubbleField::R => self.r.into(),
            BubbleField::Value => self.value.into(),
            BubbleField::FontSize => self.font_size.into(),
            BubbleField::Color => self.color.into(),
        }
    }

    fn set(&mut self, field: BubbleField, value: TweenValue) {
        match (field, value) {
            (BubbleField::X, TweenValue::Scalar(v)) => self.x = v,
            (BubbleField::Y, TweenValue::Scalar(v)) => self.y = v,
            (BubbleField::R, TweenValue::Scalar(v)) => self.r = v,
            (BubbleField::Value, TweenValue::Scalar(v)) => self.value = v,
            (BubbleField::FontSize, TweenValue::Scalar(v)) => self.font_size = v,
            (BubbleField::Color, TweenValue::Color(c)) => self.color = c,
            _ => {}
        }
    }
}

impl GeometryNode for BubbleNode {
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
        self.r = 0.0;
        self.value = 0.0;
        self.font_size = 0.0;
    }

    fn sync_cosmetic(&mut self, layout: &Self) {
        self.image_path.clone_from(&layout.image_path);
        self.show_image = layout.show_image;
    }

    fn value(&self) -> f64 {
        self.value
    }
}
