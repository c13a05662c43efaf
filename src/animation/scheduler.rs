//! Epoch-tagged transition bookkeeping.
//!
//! Every batch of tracks started together shares one epoch. Interrupting or
//! starting a new batch bumps the epoch, after which tracks from older
//! epochs are dropped by their owners without writing. A batch completes
//! when its join counter reaches zero.

/// Transition generation tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct Epoch(u64);

impl Epoch {
    /// Raw generation number.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Count of parallel parts that have not finished yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinCounter {
    remaining: usize,
}

impl JoinCounter {
    /// Counter for `parts` parallel parts.
    #[must_use]
    pub fn new(parts: usize) -> Self {
        Self { remaining: parts }
    }

    /// Parts still running.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Record one finished part. Returns `true` when it was the last one.
    pub fn finish_one(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

/// Result of reporting a finished part to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOutcome {
    /// The part belongs to an interrupted batch and must be discarded.
    Stale,
    /// Other parts of the batch are still running.
    Pending,
    /// The batch is complete.
    Joined,
}

/// Owns the epoch counter and the join counter of the active batch.
#[derive(Debug, Clone, Default)]
pub struct TransitionScheduler {
    epoch: Epoch,
    join: Option<JoinCounter>,
}

impl TransitionScheduler {
    /// Idle scheduler at epoch 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current epoch.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Whether a batch is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.join.is_some()
    }

    /// Parts of the active batch still running.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.join.map_or(0, |j| j.remaining())
    }

    /// Whether `epoch` is the active batch.
    #[must_use]
    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.join.is_some() && epoch == self.epoch
    }

    /// Start a batch of `parts` parallel parts, superseding any running
    /// batch. Returns the epoch to tag the new tracks with.
    pub fn begin(&mut self, parts: usize) -> Epoch {
        if self.join.is_some() {
            log::debug!(
                "epoch {} superseded with {} part(s) outstanding",
                self.epoch.0,
                self.remaining()
            );
        }
        self.epoch = self.epoch.next();
        self.join = Some(JoinCounter::new(parts.max(1)));
        self.epoch
    }

    /// Stop the running batch. Its tracks become stale.
    pub fn interrupt(&mut self) {
        if self.join.take().is_some() {
            log::debug!("epoch {} interrupted", self.epoch.0);
            self.epoch = self.epoch.next();
        }
    }

    /// Report that one part tagged `epoch` has finished.
    pub fn finish_part(&mut self, epoch: Epoch) -> PartOutcome {
        if !self.is_current(epoch) {
            return PartOutcome::Stale;
        }
        let joined = self.join.as_mut().is_some_and(JoinCounter::finish_one);
        if joined {
            self.join = None;
            PartOutcome::Joined
        } else {
            PartOutcome::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_counter_reaches_zero_once() {
        let mut join = JoinCounter::new(2);
        assert!(!join.finish_one());
        assert!(join.finish_one());
        assert_eq!(join.remaining(), 0);
    }

    #[test]
    fn parts_join_in_their_epoch() {
        let mut sched = TransitionScheduler::new();
        let epoch = sched.begin(2);
        assert!(sched.is_active());
        assert_eq!(sched.finish_part(epoch), PartOutcome::Pending);
        assert_eq!(sched.finish_part(epoch), PartOutcome::Joined);
        assert!(!sched.is_active());
        assert_eq!(sched.finish_part(epoch), PartOutcome::Stale);
    }

    #[test]
    fn interrupt_makes_old_parts_stale() {
        let mut sched = TransitionScheduler::new();
        let old = sched.begin(1);
        sched.interrupt();
        assert!(!sched.is_active());
        let new = sched.begin(1);
        assert!(new > old);
        assert_eq!(sched.finish_part(old), PartOutcome::Stale);
        assert_eq!(sched.finish_part(new), PartOutcome::Joined);
    }

    #[test]
    fn begin_supersedes_running_batch() {
        let mut sched = TransitionScheduler::new();
        let first = sched.begin(2);
        let second = sched.begin(1);
        assert_ne!(first, second);
        assert!(!sched.is_current(first));
        assert!(sched.is_current(second));
    }

    #[test]
    fn idle_interrupt_keeps_epoch() {
        let mut sched = TransitionScheduler::new();
        let before = sched.epoch();
        sched.interrupt();
        assert_eq!(sched.epoch(), before);
    }
}
