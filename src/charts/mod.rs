//! Chart widgets: bubble, pie and segmented bar.
//!
//! Every chart owns its data, its animated geometry and its subscriptions.
//! Hosts feed data and viewport changes in, call [`Chart::tick`] once per
//! frame and draw the geometry the chart exposes.

pub mod bubble;
mod flat;
pub mod pie;
pub mod segmented;

pub use bubble::BubbleChart;
pub use pie::PieChart;
pub use segmented::{NavState, SegmentedBarChart};

use glam::DVec2;
use rustc_hash::FxHashMap;
use web_time::Instant;

use crate::input::{InputEvent, InputProcessor, PointerAction};
use crate::item::Item;
use crate::util::color::Color;
use crate::util::format::NumberFormat;
use crate::util::palette::ColorAllocator;

/// Offset of a tooltip from the cursor.
pub const TOOLTIP_OFFSET: DVec2 = DVec2::new(10.0, 10.0);

/// Item subscription: the original item and the pointer position.
pub type ItemHandler = Box<dyn FnMut(&Item, DVec2)>;

/// Transition-end subscription.
pub type TransitionHandler = Box<dyn FnMut()>;

/// Text and placement of a hover tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// `caption (value)`.
    pub text: String,
    /// Top-left corner, offset from the cursor.
    pub position: DVec2,
}

impl Tooltip {
    /// Tooltip for `caption` with `value` formatted to between
    /// `min_decimals` and `max_decimals` fraction digits.
    #[must_use]
    pub fn new<F: NumberFormat + ?Sized>(
        format: &F,
        caption: &str,
        value: f64,
        min_decimals: usize,
        max_decimals: usize,
        pointer: DVec2,
    ) -> Self {
        Self {
            text: format!(
                "{caption} ({})",
                format.format(value, min_decimals, max_decimals)
            ),
            position: pointer + TOOLTIP_OFFSET,
        }
    }
}

/// Common surface of the three charts.
pub trait Chart {
    /// Advance running animations to frame time `now`. Returns whether
    /// anything is still animating.
    fn tick(&mut self, now: Instant) -> bool;

    /// Whether a transition is in flight.
    fn is_animating(&self) -> bool;

    /// Cursor moved to `point`. Returns the tooltip to show, if any.
    fn pointer_move(&mut self, point: DVec2) -> Option<Tooltip>;

    /// Primary click at `point`.
    fn pointer_click(&mut self, point: DVec2);

    /// Cursor left the chart.
    fn pointer_leave(&mut self);

    /// Dispatch one pointer action.
    fn pointer(&mut self, action: PointerAction) -> Option<Tooltip> {
        match action {
            PointerAction::Hover(point) => self.pointer_move(point),
            PointerAction::Click(point) => {
                self.pointer_click(point);
                None
            }
            PointerAction::Leave => {
                self.pointer_leave();
                None
            }
        }
    }

    /// Run a raw event through `processor` and dispatch the result.
    fn handle_input(
        &mut self,
        processor: &mut InputProcessor,
        event: InputEvent,
    ) -> Option<Tooltip> {
        processor
            .handle_event(event)
            .and_then(|action| self.pointer(action))
    }
}

/// Subscriptions shared by every chart.
#[derive(Default)]
pub(crate) struct ChartEvents {
    clicked: Option<ItemHandler>,
    hovered: Option<ItemHandler>,
    transition_end: Option<TransitionHandler>,
    /// Caption path currently under the cursor.
    hover_key: Option<String>,
}

impl ChartEvents {
    pub(crate) fn set_clicked(&mut self, handler: ItemHandler) {
        self.clicked = Some(handler);
    }

    pub(crate) fn set_hovered(&mut self, handler: ItemHandler) {
        self.hovered = Some(handler);
    }

    pub(crate) fn set_transition_end(&mut self, handler: TransitionHandler) {
        self.transition_end = Some(handler);
    }

    pub(crate) fn click(&mut self, item: &Item, point: DVec2) {
        if let Some(handler) = self.clicked.as_mut() {
            handler(item, point);
        }
    }

    /// Fire the hover handler when the pointer enters a different item.
    pub(crate) fn hover(&mut self, key: &str, item: &Item, point: DVec2) {
        if self.hover_key.as_deref() == Some(key) {
            return;
        }
        self.hover_key = Some(key.to_owned());
        if let Some(handler) = self.hovered.as_mut() {
            handler(item, point);
        }
    }

    pub(crate) fn leave(&mut self) {
        self.hover_key = None;
    }

    pub(crate) fn transition_end(&mut self) {
        if let Some(handler) = self.transition_end.as_mut() {
            handler();
        }
    }
}

impl std::fmt::Debug for ChartEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartEvents")
            .field("clicked", &self.clicked.is_some())
            .field("hovered", &self.hovered.is_some())
            .field("transition_end", &self.transition_end.is_some())
            .field("hover_key", &self.hover_key)
            .finish()
    }
}

/// Colors handed out so far, keyed by caption path. An uncolored item keeps
/// the color it had in the previous snapshot.
#[derive(Debug)]
pub(crate) struct StickyColors {
    allocator: ColorAllocator,
    assigned: FxHashMap<String, Color>,
}

impl StickyColors {
    pub(crate) fn new(seed: Option<u64>) -> Self {
        Self {
            allocator: seed.map_or_else(ColorAllocator::new, ColorAllocator::seeded),
            assigned: FxHashMap::default(),
        }
    }

    /// Fill every missing color in `items`: first from the previous
    /// snapshot, then from the allocator.
    pub(crate) fn apply(&mut self, items: &mut [Item]) {
        let mut fresh = FxHashMap::default();
        self.reuse(items, "", &mut fresh);
        let assigned = self.allocator.allocate(items);
        if assigned > 0 {
            log::debug!("allocated {assigned} color(s)");
        }
        record(items, "", &mut fresh);
        self.assigned = fresh;
    }

    fn reuse(&self, items: &mut [Item], prefix: &str, fresh: &mut FxHashMap<String, Color>) {
        let mut taken: Vec<Color> = items.iter().filter_map(|i| i.color).collect();
        for item in items.iter_mut() {
            let key = path_key(prefix, &item.caption);
            if item.color.is_none() {
                if let Some(&color) = self.assigned.get(&key) {
                    if !taken.contains(&color) {
                        item.color = Some(color);
                        taken.push(color);
                        let _ = fresh.insert(key.clone(), color);
                    }
                }
            }
            if let Some(children) = item.segments_mut() {
                self.reuse(children, &key, fresh);
            }
        }
    }
}

fn record(items: &[Item], prefix: &str, out: &mut FxHashMap<String, Color>) {
    for item in items {
        let key = path_key(prefix, &item.caption);
        if let Some(color) = item.color {
            let _ = out.entry(key.clone()).or_insert(color);
        }
        record(item.segments(), &key, out);
    }
}

fn path_key(prefix: &str, caption: &str) -> String {
    if prefix.is_empty() {
        caption.to_owned()
    } else {
        format!("{prefix}\u{1f}{caption}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::format::DecimalFormat;

    #[test]
    fn tooltip_text_and_offset() {
        let t = Tooltip::new(
            &DecimalFormat::default(),
            "Apples",
            1234.5,
            0,
            3,
            DVec2::new(5.0, 6.0),
        );
        assert_eq!(t.text, "Apples (1,234.5)");
        assert_eq!(t.position, DVec2::new(15.0, 16.0));
    }

    #[test]
    fn sticky_colors_survive_snapshots() {
        let mut colors = StickyColors::new(Some(7));
        let mut first = vec![Item::leaf("a", 1.0), Item::leaf("b", 2.0)];
        colors.apply(&mut first);
        let a = first[0].color;
        assert!(a.is_some());

        let mut second = vec![Item::leaf("c", 1.0), Item::leaf("a", 5.0)];
        colors.apply(&mut second);
        assert_eq!(second[1].color, a);
        assert!(second[0].color.is_some());
    }

    #[test]
    fn explicit_colors_win() {
        let mut colors = StickyColors::new(Some(7));
        let red = Color::rgb(255, 0, 0);
        let mut items = vec![Item::leaf("a", 1.0)];
        colors.apply(&mut items);
        let mut items = vec![Item::leaf("a", 1.0).with_color(red)];
        colors.apply(&mut items);
        assert_eq!(items[0].color, Some(red));
    }

    #[test]
    fn hover_fires_once_per_item() {
        use std::cell::Cell;
        use std::rc::Rc;

        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let mut events = ChartEvents::default();
        events.set_hovered(Box::new(move |_, _| seen.set(seen.get() + 1)));
        let item = Item::leaf("a", 1.0);
        events.hover("a", &item, DVec2::ZERO);
        events.hover("a", &item, DVec2::ONE);
        events.leave();
        events.hover("a", &item, DVec2::ZERO);
        assert_eq!(count.get(), 2);
    }
}
