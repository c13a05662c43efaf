//! Packed-circle chart.

use glam::DVec2;
use web_time::{Duration, Instant};

use super::flat::{FlatAnimation, FrameOutcome};
use super::{Chart, ChartEvents, ItemHandler, StickyColors, Tooltip, TransitionHandler};
use crate::animation::Transition;
use crate::error::ChartError;
use crate::geometry::BubbleNode;
use crate::item::Item;
use crate::layout::{layout_bubbles, BubbleLayout};
use crate::options::Options;
use crate::reconcile::{reconcile, ReconcileReport};
use crate::util::format::NumberFormat;
use crate::util::text::{ApproxTextMeasure, TextMeasure};

/// Bubble chart: one circle per item, area proportional to value.
pub struct BubbleChart {
    /// Items as supplied, before color filling.
    data: Vec<Item>,
    /// Items with every color resolved.
    items: Vec<Item>,
    layout: BubbleLayout,
    anim: FlatAnimation<BubbleNode>,
    colors: StickyColors,
    events: ChartEvents,
    measure: Box<dyn TextMeasure>,
    format: Box<dyn NumberFormat>,
}

impl BubbleChart {
    /// Empty chart configured from `options`.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let bubble = &options.bubble;
        Self {
            data: Vec::new(),
            items: Vec::new(),
            layout: BubbleLayout {
                width: bubble.width,
                height: bubble.height,
                padding: bubble.padding,
                base_font_size: bubble.base_font_size,
            },
            anim: FlatAnimation::new(
                Transition::smooth(Duration::from_millis(bubble.duration_ms))
                    .with_easing(options.animation.easing)
                    .named("bubble"),
            ),
            colors: StickyColors::new(options.animation.color_seed),
            events: ChartEvents::default(),
            measure: Box::new(ApproxTextMeasure::default()),
            format: Box::new(options.format.clone()),
        }
    }

    /// Replace the label measurer.
    #[must_use]
    pub fn with_text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// Replace the tooltip number format.
    #[must_use]
    pub fn with_number_format(mut self, format: impl NumberFormat + 'static) -> Self {
        self.format = Box::new(format);
        self
    }

    /// Subscribe to item clicks.
    pub fn on_item_clicked(&mut self, handler: ItemHandler) {
        self.events.set_clicked(handler);
    }

    /// Subscribe to the pointer entering an item.
    pub fn on_item_hovered(&mut self, handler: ItemHandler) {
        self.events.set_hovered(handler);
    }

    /// Subscribe to transition completion.
    pub fn on_transition_end(&mut self, handler: TransitionHandler) {
        self.events.set_transition_end(handler);
    }

    /// Replace the data. Returns `Ok(false)` when `items` equals the data
    /// already shown.
    pub fn set_data(&mut self, items: Vec<Item>) -> Result<bool, ChartError> {
        Item::validate_all(&items)?;
        if items == self.data {
            return Ok(false);
        }
        let mut colored = items.clone();
        self.colors.apply(&mut colored);
        self.data = items;
        self.items = colored;
        let _ = self.render();
        Ok(true)
    }

    /// Resize the viewport. Returns whether anything changed.
    pub fn set_dimensions(&mut self, width: f64, height: f64) -> bool {
        if self.layout.width == width && self.layout.height == height {
            return false;
        }
        self.layout.width = width;
        self.layout.height = height;
        let _ = self.render();
        true
    }

    /// Change the transition length. Returns whether anything changed.
    pub fn set_animation_duration(&mut self, duration: Duration) -> bool {
        if self.anim.transition.duration == duration {
            return false;
        }
        self.anim.transition.duration = duration;
        let _ = self.render();
        true
    }

    /// Live circles, tombstones included.
    #[must_use]
    pub fn nodes(&self) -> &[BubbleNode] {
        self.anim.state.current()
    }

    /// Resting circles.
    #[must_use]
    pub fn targets(&self) -> &[BubbleNode] {
        self.anim.state.target()
    }

    /// Items as currently shown, colors resolved.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Viewport width and height.
    #[must_use]
    pub fn dimensions(&self) -> (f64, f64) {
        (self.layout.width, self.layout.height)
    }

    /// Item under `point`, if any.
    #[must_use]
    pub fn hit_test(&self, point: DVec2) -> Option<&Item> {
        self.item_index_at(point).map(|i| &self.items[i])
    }

    fn item_index_at(&self, point: DVec2) -> Option<usize> {
        let node = self
            .nodes()
            .iter()
            .rev()
            .find(|n| !n.deleted && n.contains(point))?;
        self.items.iter().position(|item| item.caption == node.caption)
    }

    fn render(&mut self) -> ReconcileReport {
        self.anim.interrupt();
        let layout = layout_bubbles(&self.items, &self.layout, self.measure.as_ref());
        let report = reconcile(&mut self.anim.state, &layout, false);
        self.anim.start();
        report
    }
}

impl Chart for BubbleChart {
    fn tick(&mut self, now: Instant) -> bool {
        match self.anim.tick(now) {
            FrameOutcome::Running => true,
            FrameOutcome::Finished => {
                self.events.transition_end();
                false
            }
            FrameOutcome::Idle => false,
        }
    }

    fn is_animating(&self) -> bool {
        self.anim.is_animating()
    }

    fn pointer_move(&mut self, point: DVec2) -> Option<Tooltip> {
        let Some(i) = self.item_index_at(point) else {
            self.events.leave();
            return None;
        };
        let item = &self.items[i];
        self.events.hover(&item.caption, item, point);
        Some(Tooltip::new(
            self.format.as_ref(),
            &item.caption,
            item.value(),
            0,
            3,
            point,
        ))
    }

    fn pointer_click(&mut self, point: DVec2) {
        if let Some(i) = self.item_index_at(point) {
            self.events.click(&self.items[i], point);
        }
    }

    fn pointer_leave(&mut self) {
        self.events.leave();
    }
}

impl std::fmt::Debug for BubbleChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BubbleChart")
            .field("items", &self.items.len())
            .field("layout", &self.layout)
            .field("animating", &self.anim.is_animating())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn chart() -> BubbleChart {
        let mut options = Options::default();
        options.animation.color_seed = Some(1);
        options.bubble.duration_ms = 100;
        BubbleChart::new(&options)
    }

    fn settle(chart: &mut BubbleChart) {
        let t0 = Instant::now();
        let _ = chart.tick(t0);
        assert!(!chart.tick(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn first_render_grows_from_zero() {
        let mut c = chart();
        assert!(c.set_data(vec![Item::leaf("a", 4.0), Item::leaf("b", 9.0)]).unwrap());
        assert!(c.is_animating());
        assert!(c.nodes().iter().all(|n| n.r == 0.0));
        settle(&mut c);
        assert_eq!(c.nodes(), c.targets());
        assert!(c.nodes().iter().all(|n| n.r > 0.0));
        assert!(c.items().iter().all(|i| i.color.is_some()));
    }

    #[test]
    fn equal_data_is_not_rerendered() {
        let mut c = chart();
        let data = vec![Item::leaf("a", 4.0)];
        assert!(c.set_data(data.clone()).unwrap());
        settle(&mut c);
        assert!(!c.set_data(data).unwrap());
        assert!(!c.is_animating());
        assert!(!c.set_dimensions(500.0, 500.0));
    }

    #[test]
    fn duplicate_captions_are_rejected() {
        let mut c = chart();
        let err = c
            .set_data(vec![Item::leaf("a", 1.0), Item::leaf("a", 2.0)])
            .unwrap_err();
        assert!(matches!(err, ChartError::DuplicateCaption(_)));
        assert!(c.nodes().is_empty());
    }

    #[test]
    fn removed_items_shrink_then_purge() {
        let mut c = chart();
        let _ = c.set_data(vec![Item::leaf("a", 4.0), Item::leaf("b", 9.0)]).unwrap();
        settle(&mut c);
        let _ = c.set_data(vec![Item::leaf("b", 9.0)]).unwrap();
        assert_eq!(c.nodes().len(), 2);
        assert_eq!(c.targets()[0].r, 0.0);
        settle(&mut c);
        assert_eq!(c.nodes().len(), 1);
        assert_eq!(c.nodes()[0].caption, "b");
    }

    #[test]
    fn pointer_routes_to_original_item() {
        let mut c = chart();
        let _ = c.set_data(vec![Item::leaf("only", 4.0)]).unwrap();
        settle(&mut c);

        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicked);
        c.on_item_clicked(Box::new(move |item, _| {
            sink.borrow_mut().push(item.caption.clone());
        }));

        let center = c.nodes()[0].center();
        let tip = c.pointer_move(center).unwrap();
        assert_eq!(tip.text, "only (4)");
        assert_eq!(tip.position, center + DVec2::new(10.0, 10.0));
        c.pointer_click(center);
        c.pointer_click(DVec2::new(-100.0, -100.0));
        assert_eq!(*clicked.borrow(), vec!["only".to_owned()]);
        assert!(c.pointer_move(DVec2::new(-100.0, -100.0)).is_none());
    }

    #[test]
    fn raw_input_reaches_click_handler() {
        use crate::input::{InputEvent, InputProcessor, MouseButton};

        let mut c = chart();
        let _ = c.set_data(vec![Item::leaf("only", 4.0)]).unwrap();
        settle(&mut c);
        let clicks = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&clicks);
        c.on_item_clicked(Box::new(move |_, _| *sink.borrow_mut() += 1));

        let center = c.nodes()[0].center();
        let mut input = InputProcessor::new();
        let moved = InputEvent::CursorMoved {
            x: center.x,
            y: center.y,
        };
        assert!(c.handle_input(&mut input, moved).is_some());
        for pressed in [true, false] {
            let _ = c.handle_input(
                &mut input,
                InputEvent::MouseButton {
                    button: MouseButton::Left,
                    pressed,
                },
            );
        }
        assert_eq!(*clicks.borrow(), 1);
        assert!(c.handle_input(&mut input, InputEvent::CursorLeft).is_none());
    }

    #[test]
    fn transition_end_fires_once() {
        let mut c = chart();
        let fired = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&fired);
        c.on_transition_end(Box::new(move || *sink.borrow_mut() += 1));
        let _ = c.set_data(vec![Item::leaf("a", 1.0)]).unwrap();
        settle(&mut c);
        let _ = c.tick(Instant::now());
        assert_eq!(*fired.borrow(), 1);
    }
}
