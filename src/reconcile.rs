//! Diff a fresh layout against the paired current/target geometry.
//!
//! Passes run in a fixed order: deletions, insertions, moves (ordered
//! charts only), then the update/sync pass. Deleted entries stay in both
//! arrays as tombstones until the owning transition completes.

use rustc_hash::FxHashSet;

use crate::animation::ChartState;
use crate::geometry::GeometryNode;

/// Captions touched by one reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Captions that gained a new pair.
    pub inserted: Vec<String>,
    /// Captions whose pair was tombstoned.
    pub deleted: Vec<String>,
    /// Captions re-inserted at a new position.
    pub moved: Vec<String>,
    /// Captions that persisted and had their target refreshed.
    pub updated: Vec<String>,
}

impl ReconcileReport {
    /// Whether nothing was inserted, deleted or moved.
    #[must_use]
    pub fn is_structural_noop(&self) -> bool {
        self.inserted.is_empty() && self.deleted.is_empty() && self.moved.is_empty()
    }
}

/// Bring `state` in line with `layout`.
///
/// With `detect_moves`, the live entries must appear in `layout` order:
/// an entry found out of place is tombstoned and a fresh pair is inserted
/// in its slot.
pub fn reconcile<G: GeometryNode>(
    state: &mut ChartState<G>,
    layout: &[G],
    detect_moves: bool,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    // Deletion.
    let wanted: FxHashSet<&str> = layout.iter().map(GeometryNode::caption).collect();
    let stale: Vec<usize> = state
        .current()
        .iter()
        .enumerate()
        .filter(|(_, node)| !node.is_deleted() && !wanted.contains(node.caption()))
        .map(|(i, _)| i)
        .collect();
    for i in stale {
        report.deleted.push(state.current()[i].caption().to_owned());
        state.tombstone(i);
    }

    // Insertion.
    for (idx, node) in layout.iter().enumerate() {
        if state.live_index(node.caption()).is_none() {
            state.insert_pair(idx, collapsed(node), node.clone());
            report.inserted.push(node.caption().to_owned());
        }
    }

    // Moves.
    if detect_moves {
        let mut cur = 0;
        for node in layout {
            while cur < state.len() && state.current()[cur].is_deleted() {
                cur += 1;
            }
            if cur >= state.len() {
                break;
            }
            if state.current()[cur].caption() != node.caption() {
                state.tombstone(cur);
                state.insert_pair(cur, collapsed(node), node.clone());
                if !report.inserted.iter().any(|c| c == node.caption()) {
                    report.moved.push(node.caption().to_owned());
                }
                cur += 1;
            }
            cur += 1;
        }
    }

    // Update/sync.
    for node in layout {
        let Some(i) = state.live_index(node.caption()) else {
            continue;
        };
        let (current, target) = state.split_mut();
        target[i] = node.clone();
        current[i].sync_cosmetic(node);
        if !report.inserted.iter().any(|c| c == node.caption())
            && !report.moved.iter().any(|c| c == node.caption())
        {
            report.updated.push(node.caption().to_owned());
        }
    }

    log::debug!(
        "reconciled {} node(s): +{} -{} ~{} moved {}",
        layout.len(),
        report.inserted.len(),
        report.deleted.len(),
        report.updated.len(),
        report.moved.len()
    );
    report
}

fn collapsed<G: GeometryNode>(node: &G) -> G {
    let mut seed = node.clone();
    seed.collapse();
    seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BubbleNode, WedgeNode};

    fn bubble(caption: &str, r: f64) -> BubbleNode {
        let mut n = BubbleNode::new(caption);
        n.r = r;
        n.value = r;
        n.x = r * 10.0;
        n
    }

    fn wedge(caption: &str, value: f64) -> WedgeNode {
        let mut n = WedgeNode::new(caption);
        n.value = value;
        n
    }

    fn settle<G: GeometryNode>(state: &mut ChartState<G>) {
        state.snap_to_target();
        let _ = state.purge_deleted();
    }

    #[test]
    fn insertion_starts_collapsed_at_target_location() {
        let mut state = ChartState::new();
        let _ = reconcile(&mut state, &[bubble("a", 1.0), bubble("b", 2.0)], false);
        settle(&mut state);
        let report = reconcile(
            &mut state,
            &[bubble("a", 1.0), bubble("b", 2.0), bubble("c", 3.0)],
            false,
        );
        assert_eq!(report.inserted, vec!["c"]);
        assert!(report.deleted.is_empty() && report.moved.is_empty());
        let i = state.live_index("c").unwrap();
        assert_eq!(state.current()[i].r, 0.0);
        assert_eq!(state.current()[i].x, 30.0);
        assert_eq!(state.target()[i].r, 3.0);
    }

    #[test]
    fn deletion_tombstones_until_purged() {
        let mut state = ChartState::new();
        let all = [bubble("a", 1.0), bubble("b", 2.0), bubble("c", 3.0)];
        let _ = reconcile(&mut state, &all, false);
        settle(&mut state);
        let report = reconcile(&mut state, &[bubble("a", 1.0), bubble("c", 3.0)], false);
        assert_eq!(report.deleted, vec!["b"]);
        assert_eq!(state.len(), 3);
        assert!(state.current()[1].deleted);
        assert_eq!(state.current()[1].r, 2.0);
        assert_eq!(state.target()[1].value, 0.0);
        assert_eq!(state.purge_deleted(), 1);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn swap_reports_move() {
        let mut state = ChartState::new();
        let _ = reconcile(
            &mut state,
            &[wedge("a", 1.0), wedge("b", 1.0), wedge("c", 1.0)],
            true,
        );
        settle(&mut state);
        let report = reconcile(
            &mut state,
            &[wedge("b", 1.0), wedge("a", 1.0), wedge("c", 1.0)],
            true,
        );
        assert!(report.moved.contains(&"a".to_owned()) || report.moved.contains(&"b".to_owned()));
        assert!(report.inserted.is_empty());
        let live: Vec<&str> = state
            .current()
            .iter()
            .filter(|n| !n.deleted)
            .map(|n| n.caption.as_str())
            .collect();
        assert_eq!(live, vec!["b", "a", "c"]);
    }

    #[test]
    fn equal_layout_is_a_noop() {
        let mut state = ChartState::new();
        let layout = [wedge("a", 1.0), wedge("b", 2.0)];
        let _ = reconcile(&mut state, &layout, true);
        settle(&mut state);
        let before = state.current().to_vec();
        let report = reconcile(&mut state, &layout, true);
        assert!(report.is_structural_noop());
        assert_eq!(report.updated, vec!["a", "b"]);
        assert_eq!(state.current(), before.as_slice());
    }

    #[test]
    fn reinserting_a_tombstoned_caption_creates_new_pair() {
        let mut state = ChartState::new();
        let _ = reconcile(&mut state, &[bubble("a", 1.0)], false);
        settle(&mut state);
        let _ = reconcile(&mut state, &[], false);
        let report = reconcile(&mut state, &[bubble("a", 4.0)], false);
        assert_eq!(report.inserted, vec!["a"]);
        assert_eq!(state.len(), 2);
        assert_eq!(state.tombstones(), 1);
    }
}
