//! Transition describes how to animate from the current state to a new target.

use web_time::Duration;

use crate::util::easing::EasingFunction;

/// Timing and easing for one animated change.
///
/// Consumers construct transitions via preset constructors:
/// [`snap()`](Self::snap), [`linear()`](Self::linear) or
/// [`smooth()`](Self::smooth), then adjust with the builder methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Debug name, shown in logs.
    pub name: &'static str,
    /// Wall-clock length of the animation.
    pub duration: Duration,
    /// Curve applied to normalized progress.
    pub easing: EasingFunction,
}

impl Transition {
    /// Instant change with no animation.
    #[must_use]
    pub fn snap() -> Self {
        Self {
            name: "snap",
            duration: Duration::ZERO,
            easing: EasingFunction::Linear,
        }
    }

    /// Constant-speed interpolation.
    #[must_use]
    pub fn linear(duration: Duration) -> Self {
        Self {
            name: "linear",
            duration,
            easing: EasingFunction::Linear,
        }
    }

    /// Cubic in-out interpolation, the default for chart updates.
    #[must_use]
    pub fn smooth(duration: Duration) -> Self {
        Self {
            name: "smooth",
            duration,
            easing: EasingFunction::DEFAULT,
        }
    }

    /// Replace the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Replace the debug name.
    #[must_use]
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Same transition over `1 / parts` of the duration, used for the
    /// individual cycles of a multi-phase choreography.
    #[must_use]
    pub fn split(self, parts: u32) -> Self {
        Self {
            duration: self.duration / parts.max(1),
            ..self
        }
    }

    /// Whether this transition completes instantly.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::smooth(Duration::from_millis(1000))
    }
}
