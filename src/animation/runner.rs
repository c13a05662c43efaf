//! Animation runner tracks the timing of a single animation.

use web_time::{Duration, Instant};

use super::interpolation::InterpolationContext;
use super::transition::Transition;

/// Clock for one running transition.
///
/// The runner is created unanchored and starts on the first frame that
/// observes it, so work scheduled between frames never loses its first
/// frame of motion.
#[derive(Debug, Clone)]
pub struct AnimationRunner {
    /// When the animation started; `None` until the first frame.
    start_time: Option<Instant>,
    /// Timing and easing.
    transition: Transition,
}

impl AnimationRunner {
    /// Runner that anchors its start time on the first [`Self::anchor`].
    #[must_use]
    pub fn new(transition: Transition) -> Self {
        Self {
            start_time: None,
            transition,
        }
    }

    /// Create with explicit start time.
    #[must_use]
    pub fn with_start_time(start_time: Instant, transition: Transition) -> Self {
        Self {
            start_time: Some(start_time),
            transition,
        }
    }

    /// Fix the start time if it has not been fixed yet.
    pub fn anchor(&mut self, now: Instant) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Get the total animation duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.transition.duration
    }

    /// Debug name of the transition being run.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.transition.name
    }

    /// Calculate normalized progress (0.0 to 1.0).
    ///
    /// An unanchored runner reports 0, except for instant transitions which
    /// are always complete.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        if self.transition.duration.is_zero() {
            return 1.0;
        }
        let Some(start) = self.start_time else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f64() / self.transition.duration.as_secs_f64()).min(1.0)
    }

    /// Whether the animation has reached completion.
    #[must_use]
    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Interpolation context for the given frame time.
    #[must_use]
    pub fn context(&self, now: Instant) -> InterpolationContext {
        let raw_t = self.progress(now);
        if raw_t >= 1.0 {
            return InterpolationContext::identity();
        }
        InterpolationContext::simple(raw_t, self.transition.easing.evaluate(raw_t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::easing::EasingFunction;

    #[test]
    fn test_runner_progress() {
        let transition = Transition::linear(Duration::from_millis(100));
        let start = Instant::now();
        let runner = AnimationRunner::with_start_time(start, transition);

        assert!((runner.progress(start) - 0.0).abs() < 0.01);

        let mid = start + Duration::from_millis(50);
        assert!((runner.progress(mid) - 0.5).abs() < 0.01);

        let end = start + Duration::from_millis(100);
        assert!((runner.progress(end) - 1.0).abs() < 0.01);

        let past = start + Duration::from_millis(200);
        assert!((runner.progress(past) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_runner_snap() {
        let runner = AnimationRunner::new(Transition::snap());
        assert!(runner.is_complete(Instant::now()));
        assert_eq!(runner.duration(), Duration::ZERO);
    }

    #[test]
    fn test_unanchored_runner_waits() {
        let mut runner =
            AnimationRunner::new(Transition::linear(Duration::from_millis(100)));
        let later = Instant::now() + Duration::from_secs(10);
        assert_eq!(runner.progress(later), 0.0);
        runner.anchor(later);
        runner.anchor(later + Duration::from_secs(1));
        assert!(
            (runner.progress(later + Duration::from_millis(25)) - 0.25).abs()
                < 1e-9
        );
    }

    #[test]
    fn test_context_applies_easing() {
        let start = Instant::now();
        let runner = AnimationRunner::with_start_time(
            start,
            Transition::linear(Duration::from_millis(100))
                .with_easing(EasingFunction::QuadraticIn),
        );
        let ctx = runner.context(start + Duration::from_millis(50));
        assert!((ctx.raw_t - 0.5).abs() < 1e-9);
        assert!((ctx.eased_t - 0.25).abs() < 1e-9);
        let done = runner.context(start + Duration::from_millis(150));
        assert_eq!(done.eased_t, 1.0);
    }
}
