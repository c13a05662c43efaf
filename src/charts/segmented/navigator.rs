//! Navigation state machine and request queue of the segmented bar chart.

use std::collections::VecDeque;

use crate::item::Item;
use crate::layout::{Hierarchy, NodeId};

/// Phases of a drill-down. Preparation is instant and has no phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownPhase {
    /// Children fade in over the parent's row, the rest shrinks away.
    Reveal,
    /// Children slide to their rows, the breadcrumb joins the trail.
    Reposition,
    /// Widths and ticks rescale to the child level.
    Rescale,
}

/// Phases of a drill-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpPhase {
    /// Widths and ticks rescale to the parent level.
    Rescale,
    /// Children line up end to end on the old parent's row.
    Reposition,
    /// Parent-level bars grow back in, children fade out.
    Reveal,
}

/// Phases of a data replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPhase {
    /// Everything shrinks and fades out.
    Hide,
    /// The new top level grows in.
    Show,
}

/// What the chart is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    /// Accepting clicks.
    #[default]
    Idle,
    /// Descending into `target`.
    AnimatingDown {
        /// Running phase.
        phase: DownPhase,
        /// Node whose children are being shown.
        target: NodeId,
    },
    /// Ascending out of `from`.
    AnimatingUp {
        /// Running phase.
        phase: UpPhase,
        /// Node whose children are being left.
        from: NodeId,
    },
    /// Replacing the data.
    AnimatingDataChange(DataPhase),
    /// Rescaling widths to a new chart width.
    Resizing,
}

impl NavState {
    /// Whether no transition is running.
    #[must_use]
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }
}

/// One level step of a multi-level navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    /// Go to the parent level.
    Up,
    /// Show the children of this node.
    Down(NodeId),
}

/// Steps leading from the level showing the children of `from` to the
/// level showing the children of `to`: ups to the common ancestor, then
/// downs. A leaf destination has no level of its own, so its leg is dropped.
#[must_use]
pub fn plan_route(
    hierarchy: &Hierarchy,
    from: Option<NodeId>,
    to: Option<NodeId>,
) -> VecDeque<Leg> {
    let down_chain = to.map(|id| hierarchy.ancestry(id)).unwrap_or_default();
    let up_chain = from.map(|id| hierarchy.ancestry(id)).unwrap_or_default();
    let common = down_chain
        .iter()
        .zip(&up_chain)
        .take_while(|(a, b)| a == b)
        .count();

    let mut legs: VecDeque<Leg> = (common..up_chain.len()).map(|_| Leg::Up).collect();
    legs.extend(
        down_chain
            .iter()
            .skip(common)
            .filter(|&&id| hierarchy.has_children(id))
            .map(|&id| Leg::Down(id)),
    );
    legs
}

/// Next piece of work to start once the chart is idle.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Request {
    Resize(f64),
    Data(Vec<Item>),
    Leg(Leg),
}

/// Work deferred while a transition runs. A resize goes first, then a data
/// replacement, then navigation legs.
#[derive(Debug, Clone, Default)]
pub(crate) struct Pending {
    pub(crate) resize: Option<f64>,
    pub(crate) data: Option<Vec<Item>>,
    pub(crate) legs: VecDeque<Leg>,
}

impl Pending {
    /// Queue replacement data. The last call wins and outstanding legs are
    /// dropped since they address the old tree.
    pub(crate) fn push_data(&mut self, items: Vec<Item>) {
        if self.data.replace(items).is_some() {
            log::debug!("pending data superseded");
        }
        if !self.legs.is_empty() {
            log::debug!("dropping {} navigation leg(s)", self.legs.len());
            self.legs.clear();
        }
    }

    pub(crate) fn next(&mut self) -> Option<Request> {
        if let Some(width) = self.resize.take() {
            return Some(Request::Resize(width));
        }
        if let Some(items) = self.data.take() {
            self.legs.clear();
            return Some(Request::Data(items));
        }
        self.legs.pop_front().map(Request::Leg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (Vec<Item>, Hierarchy) {
        let items = vec![
            Item::branch(
                "a",
                vec![
                    Item::branch("a1", vec![Item::leaf("a1x", 1.0), Item::leaf("a1y", 2.0)]),
                    Item::leaf("a2", 3.0),
                ],
            ),
            Item::branch("b", vec![Item::leaf("b1", 4.0)]),
        ];
        let h = Hierarchy::build(&items);
        (items, h)
    }

    #[test]
    fn route_from_root_descends() {
        let (_, h) = tree();
        let a1 = h.find_by_path(&["a", "a1"]).unwrap();
        let a = h.find_by_path(&["a"]).unwrap();
        assert_eq!(
            plan_route(&h, None, Some(a1)),
            VecDeque::from(vec![Leg::Down(a), Leg::Down(a1)])
        );
    }

    #[test]
    fn route_between_branches_goes_through_common_ancestor() {
        let (_, h) = tree();
        let a1 = h.find_by_path(&["a", "a1"]).unwrap();
        let b = h.find_by_path(&["b"]).unwrap();
        assert_eq!(
            plan_route(&h, Some(a1), Some(b)),
            VecDeque::from(vec![Leg::Up, Leg::Up, Leg::Down(b)])
        );
        assert_eq!(
            plan_route(&h, Some(a1), None),
            VecDeque::from(vec![Leg::Up, Leg::Up])
        );
    }

    #[test]
    fn leaf_destination_stops_at_its_parent_level() {
        let (_, h) = tree();
        let a = h.find_by_path(&["a"]).unwrap();
        let a2 = h.find_by_path(&["a", "a2"]).unwrap();
        assert_eq!(plan_route(&h, None, Some(a2)), VecDeque::from(vec![Leg::Down(a)]));
        assert!(plan_route(&h, Some(a), Some(a2)).is_empty());
    }

    #[test]
    fn pending_work_runs_resize_then_data_then_legs() {
        let mut p = Pending::default();
        p.legs.push_back(Leg::Up);
        p.resize = Some(640.0);
        assert_eq!(p.next(), Some(Request::Resize(640.0)));
        assert_eq!(p.next(), Some(Request::Leg(Leg::Up)));
        assert_eq!(p.next(), None);

        p.legs.push_back(Leg::Up);
        p.push_data(vec![Item::leaf("x", 1.0)]);
        p.push_data(vec![Item::leaf("y", 1.0)]);
        assert!(p.legs.is_empty());
        assert_eq!(p.next(), Some(Request::Data(vec![Item::leaf("y", 1.0)])));
        assert_eq!(p.next(), None);
    }
}
