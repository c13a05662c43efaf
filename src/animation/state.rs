//! Paired current/target geometry owned by one chart.

use crate::geometry::GeometryNode;

/// Parallel `current` (live, written every frame) and `target` (resting)
/// geometry arrays. Index `i` of both arrays always describes the same item.
#[derive(Debug, Clone)]
pub struct ChartState<G> {
    current: Vec<G>,
    target: Vec<G>,
}

impl<G> Default for ChartState<G> {
    fn default() -> Self {
        Self {
            current: Vec::new(),
            target: Vec::new(),
        }
    }
}

impl<G: GeometryNode> ChartState<G> {
    /// Empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Live geometry.
    #[must_use]
    pub fn current(&self) -> &[G] {
        &self.current
    }

    /// Resting geometry.
    #[must_use]
    pub fn target(&self) -> &[G] {
        &self.target
    }

    /// Mutable live geometry.
    pub fn current_mut(&mut self) -> &mut [G] {
        &mut self.current
    }

    /// Mutable resting geometry.
    pub fn target_mut(&mut self) -> &mut [G] {
        &mut self.target
    }

    /// Both arrays at once.
    pub fn split_mut(&mut self) -> (&mut [G], &mut [G]) {
        (&mut self.current, &mut self.target)
    }

    /// Number of pairs, tombstones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether no pairs exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Insert a pair at `index` (clamped to the end).
    pub fn insert_pair(&mut self, index: usize, current: G, target: G) {
        let index = index.min(self.current.len());
        self.current.insert(index, current);
        self.target.insert(index, target);
    }

    /// Index of the first non-deleted pair with `caption`.
    #[must_use]
    pub fn live_index(&self, caption: &str) -> Option<usize> {
        self.current
            .iter()
            .position(|node| !node.is_deleted() && node.caption() == caption)
    }

    /// Tombstone pair `index`: both entries are flagged and the target
    /// collapses to zero size. Current geometry is untouched.
    pub fn tombstone(&mut self, index: usize) {
        if let (Some(cur), Some(tgt)) =
            (self.current.get_mut(index), self.target.get_mut(index))
        {
            cur.mark_deleted();
            tgt.mark_deleted();
            tgt.collapse();
        }
    }

    /// Number of tombstoned pairs.
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.current.iter().filter(|n| n.is_deleted()).count()
    }

    /// Physically remove every tombstoned pair. Returns how many were
    /// removed.
    pub fn purge_deleted(&mut self) -> usize {
        let before = self.current.len();
        let keep: Vec<bool> =
            self.current.iter().map(|n| !n.is_deleted()).collect();
        let mut flags = keep.iter();
        self.current.retain(|_| flags.next().copied().unwrap_or(false));
        let mut flags = keep.iter();
        self.target.retain(|_| flags.next().copied().unwrap_or(false));
        before - self.current.len()
    }

    /// Jump the live geometry to the resting geometry.
    pub fn snap_to_target(&mut self) {
        self.current.clone_from(&self.target);
    }

    /// Drop every pair.
    pub fn clear(&mut self) {
        self.current.clear();
        self.target.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::bubble::BubbleNode;

    fn node(caption: &str, r: f64) -> BubbleNode {
        let mut n = BubbleNode::new(caption);
        n.r = r;
        n.value = r;
        n
    }

    #[test]
    fn tombstone_collapses_target_only() {
        let mut state = ChartState::new();
        state.insert_pair(0, node("a", 3.0), node("a", 3.0));
        state.tombstone(0);
        assert!(state.current()[0].deleted);
        assert_eq!(state.current()[0].r, 3.0);
        assert_eq!(state.target()[0].r, 0.0);
        assert_eq!(state.live_index("a"), None);
        assert_eq!(state.tombstones(), 1);
    }

    #[test]
    fn purge_removes_pairs_together() {
        let mut state = ChartState::new();
        for (i, c) in ["a", "b", "c"].iter().enumerate() {
            state.insert_pair(i, node(c, 1.0), node(c, 2.0));
        }
        state.tombstone(1);
        assert_eq!(state.purge_deleted(), 1);
        assert_eq!(state.len(), 2);
        assert_eq!(state.target().len(), 2);
        assert_eq!(state.current()[1].caption, "c");
        assert_eq!(state.target()[1].caption, "c");
    }

    #[test]
    fn insert_clamps_and_snap_copies() {
        let mut state = ChartState::new();
        state.insert_pair(10, node("a", 0.0), node("a", 5.0));
        assert_eq!(state.live_index("a"), Some(0));
        state.snap_to_target();
        assert_eq!(state.current()[0].r, 5.0);
        state.clear();
        assert!(state.is_empty());
    }
}
