//! Centralized interpolation utilities for animation.
//!
//! Every animated attribute is either a scalar or an RGB color. Elements
//! expose their attributes through [`Animatable`] so tracks can read the
//! starting value and write interpolated values without knowing the concrete
//! geometry type.

use std::fmt::Debug;

use crate::util::color::Color;

/// Per-frame interpolation context computed once from the runner, then
/// shared across all tweens of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationContext {
    /// Raw progress (0.0 to 1.0), unmodified from animation timer.
    pub raw_t: f64,
    /// Eased progress. This is the value all interpolation uses.
    pub eased_t: f64,
}

impl InterpolationContext {
    /// Context with raw and eased values.
    #[must_use]
    pub fn simple(raw_t: f64, eased_t: f64) -> Self {
        Self { raw_t, eased_t }
    }

    /// Animation complete (t=1.0).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            raw_t: 1.0,
            eased_t: 1.0,
        }
    }

    /// Linear context (no easing).
    #[must_use]
    pub fn linear(raw_t: f64) -> Self {
        Self::simple(raw_t, raw_t)
    }
}

impl Default for InterpolationContext {
    fn default() -> Self {
        Self::identity()
    }
}

/// A value one animated attribute can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    /// Any numeric attribute (position, size, angle, opacity, value).
    Scalar(f64),
    /// A fill or text color.
    Color(Color),
}

impl TweenValue {
    /// Interpolate toward `end`. Mismatched kinds jump to `end`.
    #[must_use]
    pub fn lerp(self, end: Self, t: f64) -> Self {
        match (self, end) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(lerp_f64(t, a, b)),
            (Self::Color(a), Self::Color(b)) => Self::Color(a.lerp(&b, t)),
            (_, end) => end,
        }
    }

    /// Scalar payload, `None` for colors.
    #[must_use]
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Color(_) => None,
        }
    }

    /// Color payload, `None` for scalars.
    #[must_use]
    pub fn as_color(self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(c),
            Self::Scalar(_) => None,
        }
    }
}

impl From<f64> for TweenValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Color> for TweenValue {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

/// Geometry whose attributes can be driven by tweens.
pub trait Animatable {
    /// Attribute selector.
    type Field: Copy + Eq + Debug + 'static;

    /// Every animated attribute, in a stable order.
    const FIELDS: &'static [Self::Field];

    /// Read an attribute.
    fn get(&self, field: Self::Field) -> TweenValue;

    /// Write an attribute. Values of the wrong kind are ignored.
    fn set(&mut self, field: Self::Field, value: TweenValue);
}

/// Linear interpolation between two scalars.
#[inline]
#[must_use]
pub fn lerp_f64(t: f64, start: f64, end: f64) -> f64 {
    start + (end - start) * t
}
