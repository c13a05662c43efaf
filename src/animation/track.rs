//! Tracks: one sub-animation over one element array.
//!
//! A track owns the per-field tweens captured when it was created, a runner
//! for its timing and the epoch it belongs to. Advancing a track writes the
//! interpolated values into the live element array.

use std::fmt::Debug;

use web_time::Instant;

use super::interpolation::{Animatable, TweenValue};
use super::runner::AnimationRunner;
use super::scheduler::Epoch;
use super::transition::Transition;

/// Interpolation of one attribute of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldTween<F> {
    /// Index into the element array.
    pub index: usize,
    /// Attribute being driven.
    pub field: F,
    /// Value at progress 0.
    pub from: TweenValue,
    /// Value at progress 1.
    pub to: TweenValue,
}

/// Builder collecting tweens for a track.
#[derive(Debug, Clone)]
pub struct TweenSet<F> {
    tweens: Vec<FieldTween<F>>,
}

impl<F: Copy + Eq + Debug> TweenSet<F> {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { tweens: Vec::new() }
    }

    /// Tween from the element's present value to `to`.
    pub fn toward<G: Animatable<Field = F>>(
        &mut self,
        elems: &[G],
        index: usize,
        field: F,
        to: impl Into<TweenValue>,
    ) -> &mut Self {
        if let Some(elem) = elems.get(index) {
            self.tweens.push(FieldTween {
                index,
                field,
                from: elem.get(field),
                to: to.into(),
            });
        }
        self
    }

    /// Tween between explicit endpoints.
    pub fn span(
        &mut self,
        index: usize,
        field: F,
        from: impl Into<TweenValue>,
        to: impl Into<TweenValue>,
    ) -> &mut Self {
        self.tweens.push(FieldTween {
            index,
            field,
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Tweens for every attribute that differs between paired `current`
    /// and `target` elements.
    #[must_use]
    pub fn between<G: Animatable<Field = F>>(current: &[G], target: &[G]) -> Self {
        let mut set = Self::new();
        for (index, (cur, tgt)) in current.iter().zip(target).enumerate() {
            for &field in G::FIELDS {
                let from = cur.get(field);
                let to = tgt.get(field);
                if from != to {
                    set.tweens.push(FieldTween {
                        index,
                        field,
                        from,
                        to,
                    });
                }
            }
        }
        set
    }

    /// Number of collected tweens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether no tween was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Write every tween's start value into `elems`.
    pub fn apply_start<G: Animatable<Field = F>>(&self, elems: &mut [G]) {
        for tween in &self.tweens {
            if let Some(elem) = elems.get_mut(tween.index) {
                elem.set(tween.field, tween.from);
            }
        }
    }
}

impl<F: Copy + Eq + Debug> Default for TweenSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a track still has frames to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStatus {
    /// Progress is below 1.
    Running,
    /// The final values have been written.
    Complete,
}

/// One running sub-animation, tagged with its epoch.
#[derive(Debug, Clone)]
pub struct Track<F> {
    epoch: Epoch,
    runner: AnimationRunner,
    tweens: Vec<FieldTween<F>>,
}

impl<F: Copy + Eq + Debug> Track<F> {
    /// Track playing `tweens` with `transition` timing.
    #[must_use]
    pub fn new(epoch: Epoch, transition: Transition, tweens: TweenSet<F>) -> Self {
        Self {
            epoch,
            runner: AnimationRunner::new(transition),
            tweens: tweens.tweens,
        }
    }

    /// Epoch the track was created in.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Debug name of the transition.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.runner.name()
    }

    /// Number of tweens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether the track drives nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Write the values for frame time `now` into `elems`.
    ///
    /// The first call anchors the track's start time.
    pub fn advance<G: Animatable<Field = F>>(
        &mut self,
        elems: &mut [G],
        now: Instant,
    ) -> TrackStatus {
        self.runner.anchor(now);
        let ctx = self.runner.context(now);
        let done = ctx.raw_t >= 1.0;
        for tween in &self.tweens {
            if let Some(elem) = elems.get_mut(tween.index) {
                let value = if done {
                    tween.to
                } else {
                    tween.from.lerp(tween.to, ctx.eased_t)
                };
                elem.set(tween.field, value);
            }
        }
        if done {
            TrackStatus::Complete
        } else {
            TrackStatus::Running
        }
    }
}
