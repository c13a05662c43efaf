//! Animation core shared by the single-level charts.

use web_time::Instant;

use crate::animation::{
    ChartState, PartOutcome, Track, TrackStatus, Transition,
    TransitionScheduler, TweenSet,
};
use crate::geometry::GeometryNode;

/// What a frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameOutcome {
    /// Nothing to play.
    Idle,
    /// The transition is still running.
    Running,
    /// The last part completed on this frame.
    Finished,
}

/// Paired geometry plus the single track animating it.
#[derive(Debug)]
pub(crate) struct FlatAnimation<G: GeometryNode> {
    pub(crate) state: ChartState<G>,
    scheduler: TransitionScheduler,
    track: Option<Track<G::Field>>,
    pub(crate) transition: Transition,
}

impl<G: GeometryNode> FlatAnimation<G> {
    pub(crate) fn new(transition: Transition) -> Self {
        Self {
            state: ChartState::new(),
            scheduler: TransitionScheduler::new(),
            track: None,
            transition,
        }
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Freeze `current` where it is. The running track goes stale.
    pub(crate) fn interrupt(&mut self) {
        self.scheduler.interrupt();
    }

    /// Capture tweens from `current` toward `target` and start playing them.
    pub(crate) fn start(&mut self) {
        let tweens = TweenSet::between(self.state.current(), self.state.target());
        let epoch = self.scheduler.begin(1);
        log::debug!(
            "{} transition: {} tween(s) over {} node(s)",
            self.transition.name,
            tweens.len(),
            self.state.len()
        );
        self.track = Some(Track::new(epoch, self.transition, tweens));
    }

    /// Write the frame at `now` into `current`. On the final frame the
    /// tombstones are purged.
    pub(crate) fn tick(&mut self, now: Instant) -> FrameOutcome {
        let Some(track) = self.track.as_mut() else {
            return FrameOutcome::Idle;
        };
        if !self.scheduler.is_current(track.epoch()) {
            log::debug!("dropping stale track of epoch {}", track.epoch().get());
            self.track = None;
            return FrameOutcome::Idle;
        }
        if track.advance(self.state.current_mut(), now) == TrackStatus::Running {
            return FrameOutcome::Running;
        }
        let epoch = track.epoch();
        self.track = None;
        match self.scheduler.finish_part(epoch) {
            PartOutcome::Joined => {
                let purged = self.state.purge_deleted();
                if purged > 0 {
                    log::debug!("purged {purged} tombstone(s)");
                }
                FrameOutcome::Finished
            }
            PartOutcome::Pending => FrameOutcome::Running,
            PartOutcome::Stale => FrameOutcome::Idle,
        }
    }
}
