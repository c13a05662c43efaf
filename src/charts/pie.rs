//! Pie chart.

use glam::DVec2;
use web_time::{Duration, Instant};

use super::flat::{FlatAnimation, FrameOutcome};
use super::{Chart, ChartEvents, ItemHandler, StickyColors, Tooltip, TransitionHandler};
use crate::animation::Transition;
use crate::error::ChartError;
use crate::geometry::{ArcGeometry, WedgeNode};
use crate::item::Item;
use crate::layout::{layout_wedges, pie};
use crate::options::Options;
use crate::reconcile::{reconcile, ReconcileReport};
use crate::util::format::NumberFormat;

/// Pie chart: wedges in item order, sweep proportional to value.
///
/// Order matters here, so a reordered item is animated out and back in at
/// its new position.
pub struct PieChart {
    data: Vec<Item>,
    items: Vec<Item>,
    width: f64,
    height: f64,
    inner_spacing: f64,
    outer_spacing: f64,
    anim: FlatAnimation<WedgeNode>,
    colors: StickyColors,
    events: ChartEvents,
    format: Box<dyn NumberFormat>,
}

impl PieChart {
    /// Empty chart configured from `options`.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let pie = &options.pie;
        Self {
            data: Vec::new(),
            items: Vec::new(),
            width: pie.width,
            height: pie.height,
            inner_spacing: pie.inner_spacing,
            outer_spacing: pie.outer_spacing,
            anim: FlatAnimation::new(
                Transition::smooth(Duration::from_millis(pie.duration_ms))
                    .with_easing(options.animation.easing)
                    .named("pie"),
            ),
            colors: StickyColors::new(options.animation.color_seed),
            events: ChartEvents::default(),
            format: Box::new(options.format.clone()),
        }
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

    /// Resize the viewport. Only the arc geometry depends on it, so nothing
    /// is re-diffed.
    pub fn set_dimensions(&mut self, width: f64, height: f64) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
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

    /// Center and radii the wedges are drawn with.
    #[must_use]
    pub fn arc(&self) -> ArcGeometry {
        ArcGeometry::for_viewport(
            self.width,
            self.height,
            self.inner_spacing,
            self.outer_spacing,
        )
    }

    /// Live wedges, tombstones included.
    #[must_use]
    pub fn wedges(&self) -> &[WedgeNode] {
        self.anim.state.current()
    }

    /// Resting wedges.
    #[must_use]
    pub fn targets(&self) -> &[WedgeNode] {
        self.anim.state.target()
    }

    /// Items as currently shown, colors resolved.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Item under `point`, if any.
    #[must_use]
    pub fn hit_test(&self, point: DVec2) -> Option<&Item> {
        self.item_index_at(point).map(|i| &self.items[i])
    }

    fn item_index_at(&self, point: DVec2) -> Option<usize> {
        let arc = self.arc();
        let wedge = self
            .wedges()
            .iter()
            .find(|w| !w.deleted && w.contains(point, &arc))?;
        self.items.iter().position(|item| item.caption == wedge.caption)
    }

    /// Diff the new wedges in, then lay both arrays out: the live wedges
    /// over the sweep they covered before the change, the resting wedges
    /// over the full circle.
    fn render(&mut self) -> ReconcileReport {
        self.anim.interrupt();
        let sweep = pie::max_end_angle(self.anim.state.current());
        let layout = layout_wedges(&self.items);
        let report = reconcile(&mut self.anim.state, &layout, true);
        let (current, target) = self.anim.state.split_mut();
        pie::assign_angles(current, sweep);
        pie::assign_angles(target, pie::FULL_SWEEP);
        self.anim.start();
        report
    }
}

impl Chart for PieChart {
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

impl std::fmt::Debug for PieChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PieChart")
            .field("items", &self.items.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("animating", &self.anim.is_animating())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use super::*;

    fn chart() -> PieChart {
        let mut options = Options::default();
        options.animation.color_seed = Some(3);
        options.pie.duration_ms = 100;
        PieChart::new(&options)
    }

    fn settle(chart: &mut PieChart) {
        let t0 = Instant::now();
        let _ = chart.tick(t0);
        assert!(!chart.tick(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn first_render_sweeps_in_from_zero() {
        let mut c = chart();
        let _ = c.set_data(vec![Item::leaf("a", 1.0), Item::leaf("b", 1.0)]).unwrap();
        assert!(c.wedges().iter().all(|w| w.end_angle == 0.0));
        settle(&mut c);
        assert!((c.wedges()[0].end_angle - PI).abs() < 1e-12);
        assert!((c.wedges()[1].end_angle - TAU).abs() < 1e-12);
    }

    #[test]
    fn live_angles_start_from_previous_sweep() {
        let mut c = chart();
        let _ = c.set_data(vec![Item::leaf("a", 1.0), Item::leaf("b", 1.0)]).unwrap();
        let t0 = Instant::now();
        let _ = c.tick(t0);
        let _ = c.tick(t0 + Duration::from_millis(50));
        let before = pie::max_end_angle(c.wedges());
        assert!(before > 0.0 && before < TAU);

        let _ = c
            .set_data(vec![Item::leaf("a", 1.0), Item::leaf("b", 1.0), Item::leaf("c", 2.0)])
            .unwrap();
        let after = pie::max_end_angle(c.wedges());
        assert!((after - before).abs() < 1e-9);
        assert!((pie::max_end_angle(c.targets()) - TAU).abs() < 1e-12);
    }

    #[test]
    fn zero_total_collapses_without_nan() {
        let mut c = chart();
        let _ = c.set_data(vec![Item::leaf("a", 0.0), Item::leaf("b", 0.0)]).unwrap();
        settle(&mut c);
        assert!(c.wedges().iter().all(|w| w.sweep() == 0.0 && !w.end_angle.is_nan()));
    }

    #[test]
    fn hit_test_follows_angles() {
        let mut c = chart();
        let _ = c.set_data(vec![Item::leaf("right", 1.0), Item::leaf("left", 1.0)]).unwrap();
        settle(&mut c);
        let arc = c.arc();
        let right = arc.center + DVec2::new(50.0, 0.0);
        let left = arc.center - DVec2::new(50.0, 0.0);
        assert_eq!(c.hit_test(right).unwrap().caption, "right");
        assert_eq!(c.hit_test(left).unwrap().caption, "left");
        assert!(c.hit_test(arc.center + DVec2::new(500.0, 0.0)).is_none());
    }

    #[test]
    fn resize_only_moves_the_arc() {
        let mut c = chart();
        let _ = c.set_data(vec![Item::leaf("a", 1.0)]).unwrap();
        settle(&mut c);
        assert!(c.set_dimensions(400.0, 300.0));
        assert!(!c.is_animating());
        assert_eq!(c.arc().center, DVec2::new(200.0, 150.0));
        assert_eq!(c.arc().outer_radius, 149.0);
    }
}
