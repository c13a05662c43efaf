//! Epoch-tagged, tick-driven animation of chart geometry.
//!
//! - [`Transition`] describes timing and easing.
//! - [`AnimationRunner`] turns wall-clock time into eased progress.
//! - [`Track`] interpolates a set of per-field tweens over one element array.
//! - [`TransitionScheduler`] tags batches of tracks with an [`Epoch`] and
//!   joins their completion.
//! - [`ChartState`] owns the paired current/target arrays.

pub mod interpolation;
pub mod runner;
pub mod scheduler;
pub mod state;
pub mod track;
pub mod transition;

pub use interpolation::{Animatable, InterpolationContext, TweenValue};
pub use runner::AnimationRunner;
pub use scheduler::{Epoch, JoinCounter, PartOutcome, TransitionScheduler};
pub use state::ChartState;
pub use track::{FieldTween, Track, TrackStatus, TweenSet};
pub use transition::Transition;
