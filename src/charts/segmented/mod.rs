//! Hierarchical bar chart with animated drill-down and drill-up.
//!
//! One level of the item tree is shown at a time: a bar per sibling, an
//! x axis and a breadcrumb trail of the levels above. Clicking a bar with
//! children descends into it, clicking the background ascends. Each level
//! change plays a multi-phase choreography; see [`NavState`] for the phases.
//!
//! Requests that arrive while a choreography is running are deferred: a
//! width change runs first, then the latest data replacement, then any
//! remaining navigation legs.

mod choreography;
pub mod navigator;

use glam::DVec2;
use web_time::{Duration, Instant};

pub use navigator::{DataPhase, DownPhase, Leg, NavState, UpPhase};
use navigator::{plan_route, Pending, Request};

use super::{Chart, ChartEvents, ItemHandler, StickyColors, Tooltip, TransitionHandler};
use crate::animation::{
    Animatable, PartOutcome, Track, TrackStatus, Transition, TransitionScheduler,
    TweenSet,
};
use crate::error::ChartError;
use crate::geometry::{Breadcrumb, BreadcrumbField, Segment, SegmentField, Tick, TickField};
use crate::item::Item;
use crate::layout::{BarGeometry, Hierarchy, NodeId, TickAxis};
use crate::options::{BarsOptions, Options};
use crate::util::easing::EasingFunction;
use crate::util::format::NumberFormat;
use crate::util::text::{ApproxTextMeasure, TextMeasure};

/// Upper bound on phases completed within one frame, reached only with
/// zero-length transitions.
const MAX_PHASES_PER_FRAME: usize = 16;

/// Tick bookkeeping applied when the phase sliding the axis ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TickFinish {
    /// Slid-out ticks to drop from the end.
    surplus: usize,
    /// Label precision to switch to, when it changes only at the end.
    decimals: Option<usize>,
}

/// Segmented (hierarchical) bar chart.
pub struct SegmentedBarChart {
    /// Latest data handed to [`set_data`](Self::set_data), before color
    /// filling.
    data: Vec<Item>,
    /// Items behind the current hierarchy, colors resolved.
    items: Vec<Item>,
    hierarchy: Hierarchy,
    geometry: BarGeometry,
    /// Pixels per unit value at the current level.
    factor: f64,
    axis: TickAxis,
    /// Node whose children are shown, `None` at the top level.
    active: Option<NodeId>,

    segments: Vec<Segment>,
    ticks: Vec<Tick>,
    breadcrumbs: Vec<Breadcrumb>,

    state: NavState,
    scheduler: TransitionScheduler,
    segment_track: Option<Track<SegmentField>>,
    tick_track: Option<Track<TickField>>,
    breadcrumb_track: Option<Track<BreadcrumbField>>,
    tick_finish: Option<TickFinish>,
    pending: Pending,
    /// Data the running replacement will show.
    incoming: Option<Vec<Item>>,

    bars: BarsOptions,
    duration: Duration,
    easing: EasingFunction,
    colors: StickyColors,
    events: ChartEvents,
    measure: Box<dyn TextMeasure>,
    format: Box<dyn NumberFormat>,
}

impl SegmentedBarChart {
    /// Empty chart configured from `options`.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let bars = options.bars.clone();
        Self {
            data: Vec::new(),
            items: Vec::new(),
            hierarchy: Hierarchy::default(),
            geometry: bars.geometry(),
            factor: 0.0,
            axis: TickAxis::default(),
            active: None,
            segments: Vec::new(),
            ticks: Vec::new(),
            breadcrumbs: Vec::new(),
            state: NavState::Idle,
            scheduler: TransitionScheduler::new(),
            segment_track: None,
            tick_track: None,
            breadcrumb_track: None,
            tick_finish: None,
            pending: Pending::default(),
            incoming: None,
            duration: Duration::from_millis(bars.duration_ms),
            bars,
            easing: options.animation.easing,
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

    /// Replace the tick and tooltip number format.
    #[must_use]
    pub fn with_number_format(mut self, format: impl NumberFormat + 'static) -> Self {
        self.format = Box::new(format);
        self
    }

    /// Subscribe to bar clicks.
    pub fn on_item_clicked(&mut self, handler: ItemHandler) {
        self.events.set_clicked(handler);
    }

    /// Subscribe to the pointer entering a bar.
    pub fn on_item_hovered(&mut self, handler: ItemHandler) {
        self.events.set_hovered(handler);
    }

    /// Subscribe to the end of every choreography.
    pub fn on_transition_end(&mut self, handler: TransitionHandler) {
        self.events.set_transition_end(handler);
    }

    /// Replace the data: the current bars fade out and the new top level
    /// grows in. While animating, the request waits for the running
    /// choreography; a later call replaces an earlier waiting one.
    ///
    /// Returns `Ok(false)` when `items` equals the latest data.
    pub fn set_data(&mut self, items: Vec<Item>) -> Result<bool, ChartError> {
        Item::validate_all(&items)?;
        if items == self.data {
            return Ok(false);
        }
        let mut colored = items.clone();
        self.colors.apply(&mut colored);
        self.data = items;
        if self.state.is_idle() {
            self.begin_data_change(colored);
        } else {
            self.pending.push_data(colored);
        }
        Ok(true)
    }

    /// Change the chart width. Bars and ticks rescale over a short phase,
    /// after the running choreography if there is one.
    pub fn set_width(&mut self, width: f64) -> bool {
        let latest = self.pending.resize.unwrap_or(self.geometry.width);
        if latest == width {
            return false;
        }
        if self.state.is_idle() {
            self.begin_resize(width);
        } else {
            self.pending.resize = Some(width);
        }
        true
    }

    /// Change the length of a full choreography. Takes effect with the next
    /// phase.
    pub fn set_animation_duration(&mut self, duration: Duration) -> bool {
        if self.duration == duration {
            return false;
        }
        self.duration = duration;
        true
    }

    /// Descend into `node` as if its bar had been clicked. Ignored unless
    /// idle, `node` is shown at the current level and it has children.
    pub fn click_segment(&mut self, node: NodeId) -> bool {
        self.state.is_idle() && self.begin_down(node)
    }

    /// Ascend one level as if the background had been clicked. Ignored
    /// unless idle and below the top level.
    pub fn click_background(&mut self) -> bool {
        self.state.is_idle() && self.begin_up()
    }

    /// Walk level by level to the children of the node whose item equals
    /// `item`. Ignored while animating or when no such node exists.
    pub fn navigate_to(&mut self, item: &Item) -> bool {
        let Some(node) = self.hierarchy.locate(&self.items, item) else {
            log::debug!("navigate_to: {:?} not found", item.caption);
            return false;
        };
        self.navigate(Some(node))
    }

    /// Like [`navigate_to`](Self::navigate_to), addressing the node by its
    /// caption path. An empty path is the top level.
    pub fn navigate_to_path<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        if path.is_empty() {
            return self.navigate(None);
        }
        let Some(node) = self.hierarchy.find_by_path(path) else {
            log::debug!("navigate_to_path: no node at the given path");
            return false;
        };
        self.navigate(Some(node))
    }

    fn navigate(&mut self, target: Option<NodeId>) -> bool {
        if !self.state.is_idle() || target == self.active {
            return false;
        }
        let legs = plan_route(&self.hierarchy, self.active, target);
        if legs.is_empty() {
            return false;
        }
        log::debug!("navigating with {} leg(s)", legs.len());
        self.pending.legs = legs;
        self.run_next();
        !self.state.is_idle()
    }

    /// Live bars, in drawing order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Live x-axis ticks.
    #[must_use]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Live breadcrumb trail, outermost level first.
    #[must_use]
    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    /// Chart height for the deepest sibling list.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.geometry.height
    }

    /// Chart-wide bar metrics.
    #[must_use]
    pub fn geometry(&self) -> &BarGeometry {
        &self.geometry
    }

    /// Current navigation state.
    #[must_use]
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Node whose children are shown, `None` at the top level.
    #[must_use]
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Tree behind the bars.
    #[must_use]
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Items behind the bars, colors resolved.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Caption labels of the visible breadcrumbs and bars share this
    /// precision with the axis.
    #[must_use]
    pub fn decimals(&self) -> usize {
        self.axis.decimals
    }

    /// Item whose bar is under `point`.
    #[must_use]
    pub fn hit_test(&self, point: DVec2) -> Option<&Item> {
        let segment = self.segment_at(point)?;
        self.hierarchy.item(&self.items, segment.node)
    }

    fn segment_at(&self, point: DVec2) -> Option<&Segment> {
        self.segments.iter().rev().find(|s| s.contains(point))
    }

    /// Transition of one phase of a choreography split into `cycles`.
    fn phase_transition(&self, name: &'static str, cycles: u32) -> Transition {
        Transition::smooth(self.duration)
            .with_easing(self.easing)
            .split(cycles)
            .named(name)
    }

    /// Start a phase made of a segment track plus optional tick and
    /// breadcrumb tracks, joined by the scheduler.
    fn start_phase(
        &mut self,
        state: NavState,
        transition: Transition,
        segments: TweenSet<SegmentField>,
        ticks: Option<TweenSet<TickField>>,
        breadcrumbs: Option<TweenSet<BreadcrumbField>>,
    ) {
        let parts = 1 + usize::from(ticks.is_some()) + usize::from(breadcrumbs.is_some());
        let epoch = self.scheduler.begin(parts);
        segments.apply_start(&mut self.segments);
        self.segment_track = Some(Track::new(epoch, transition, segments));
        self.tick_track = None;
        if let Some(set) = ticks {
            set.apply_start(&mut self.ticks);
            self.tick_track = Some(Track::new(epoch, transition, set));
        }
        self.breadcrumb_track = None;
        if let Some(set) = breadcrumbs {
            set.apply_start(&mut self.breadcrumbs);
            self.breadcrumb_track = Some(Track::new(epoch, transition, set));
        }
        log::debug!("{state:?}: {parts} part(s) over {:?}", transition.duration);
        self.state = state;
    }

    /// Advance to the phase after the one that just joined.
    fn phase_finished(&mut self) {
        if let Some(finish) = self.tick_finish.take() {
            if let Some(decimals) = finish.decimals {
                for tick in &mut self.ticks {
                    tick.decimals = decimals;
                }
            }
            let keep = self.ticks.len().saturating_sub(finish.surplus);
            self.ticks.truncate(keep);
        }
        match self.state {
            NavState::Idle => {}
            NavState::AnimatingDataChange(DataPhase::Hide) => self.show_data(),
            NavState::AnimatingDataChange(DataPhase::Show) | NavState::Resizing => {
                self.operation_complete();
            }
            NavState::AnimatingDown { phase, target } => match phase {
                DownPhase::Reveal => self.down_reposition(target),
                DownPhase::Reposition => self.down_rescale(target),
                DownPhase::Rescale => self.operation_complete(),
            },
            NavState::AnimatingUp { phase, from } => match phase {
                UpPhase::Rescale => self.up_reposition(from),
                UpPhase::Reposition => self.up_reveal(from),
                UpPhase::Reveal => {
                    self.up_finish();
                    self.operation_complete();
                }
            },
        }
    }

    fn operation_complete(&mut self) {
        log::debug!("{:?} complete", self.state);
        self.state = NavState::Idle;
        self.events.transition_end();
        self.run_next();
    }

    /// Start deferred work until something animates or nothing is left.
    fn run_next(&mut self) {
        while self.state.is_idle() {
            let Some(request) = self.pending.next() else {
                return;
            };
            match request {
                Request::Resize(width) => self.begin_resize(width),
                Request::Data(items) => self.begin_data_change(items),
                Request::Leg(Leg::Up) => {
                    let _ = self.begin_up();
                }
                Request::Leg(Leg::Down(node)) => {
                    let _ = self.begin_down(node);
                }
            }
        }
    }
}

/// Advance one track. Returns whether its completion joined the phase.
fn drive<G: Animatable>(
    slot: &mut Option<Track<G::Field>>,
    elems: &mut [G],
    scheduler: &mut TransitionScheduler,
    now: Instant,
) -> bool {
    let Some(track) = slot.as_mut() else {
        return false;
    };
    if !scheduler.is_current(track.epoch()) {
        log::debug!("dropping stale {} track", track.name());
        *slot = None;
        return false;
    }
    if track.advance(elems, now) == TrackStatus::Running {
        return false;
    }
    let epoch = track.epoch();
    *slot = None;
    scheduler.finish_part(epoch) == PartOutcome::Joined
}

impl Chart for SegmentedBarChart {
    fn tick(&mut self, now: Instant) -> bool {
        for _ in 0..MAX_PHASES_PER_FRAME {
            let mut joined =
                drive(&mut self.segment_track, &mut self.segments, &mut self.scheduler, now);
            joined |= drive(&mut self.tick_track, &mut self.ticks, &mut self.scheduler, now);
            joined |= drive(
                &mut self.breadcrumb_track,
                &mut self.breadcrumbs,
                &mut self.scheduler,
                now,
            );
            if !joined {
                break;
            }
            self.phase_finished();
        }
        !self.state.is_idle()
    }

    fn is_animating(&self) -> bool {
        !self.state.is_idle()
    }

    fn pointer_move(&mut self, point: DVec2) -> Option<Tooltip> {
        let Some((node, caption, value)) = self
            .segment_at(point)
            .map(|s| (s.node, s.caption.clone(), s.value))
        else {
            self.events.leave();
            return None;
        };
        let decimals = self.axis.decimals;
        let tooltip = Tooltip::new(
            self.format.as_ref(),
            &caption,
            value,
            decimals,
            decimals,
            point,
        );
        let item = self.hierarchy.item(&self.items, node)?;
        self.events.hover(&node.to_string(), item, point);
        Some(tooltip)
    }

    fn pointer_click(&mut self, point: DVec2) {
        let Some(node) = self.segment_at(point).map(|s| s.node) else {
            let _ = self.click_background();
            return;
        };
        if let Some(item) = self.hierarchy.item(&self.items, node) {
            self.events.click(item, point);
        }
        let _ = self.click_segment(node);
    }

    fn pointer_leave(&mut self) {
        self.events.leave();
    }
}

impl std::fmt::Debug for SegmentedBarChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentedBarChart")
            .field("state", &self.state)
            .field("active", &self.active)
            .field("segments", &self.segments.len())
            .field("ticks", &self.ticks.len())
            .field("breadcrumbs", &self.breadcrumbs.len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn sample() -> Vec<Item> {
        vec![
            Item::branch(
                "fruit",
                vec![
                    Item::leaf("apple", 30.0),
                    Item::branch(
                        "berries",
                        vec![Item::leaf("straw", 10.0), Item::leaf("blue", 40.0)],
                    ),
                ],
            ),
            Item::leaf("bread", 20.0),
        ]
    }

    fn chart() -> SegmentedBarChart {
        let mut options = Options::default();
        options.animation.color_seed = Some(11);
        options.bars.duration_ms = 300;
        options.bars.resize_ms = 30;
        SegmentedBarChart::new(&options)
    }

    /// Tick at 10 ms steps until idle.
    fn settle(chart: &mut SegmentedBarChart) -> usize {
        let t0 = Instant::now();
        let mut frames = 0;
        while chart.tick(t0 + Duration::from_millis(10 * frames as u64)) {
            frames += 1;
            assert!(frames < 10_000, "chart never settled");
        }
        frames
    }

    fn node(chart: &SegmentedBarChart, path: &[&str]) -> NodeId {
        chart.hierarchy().find_by_path(path).unwrap()
    }

    fn captions(chart: &SegmentedBarChart) -> Vec<&str> {
        chart.segments().iter().map(|s| s.caption.as_str()).collect()
    }

    #[test]
    fn first_data_grows_in_top_level() {
        let mut c = chart();
        assert!(c.set_data(sample()).unwrap());
        assert_eq!(c.state(), NavState::AnimatingDataChange(DataPhase::Show));
        assert!(c.segments().iter().all(|s| s.rect.width == 0.0));
        let _ = settle(&mut c);

        assert_eq!(captions(&c), vec!["fruit", "bread"]);
        let g = *c.geometry();
        let fruit = &c.segments()[0];
        assert!((fruit.rect.width - g.available_width()).abs() < 1e-9);
        assert_eq!(fruit.rect.opacity, 1.0);
        assert_eq!(c.segments()[1].rect.y, g.row_y(1));
        assert_eq!(c.height(), g.top_offset + 2.0 * g.bar_height + 3.0 * g.spacing);
        assert!(!c.ticks().is_empty());
        assert!(c.breadcrumbs().is_empty());
    }

    #[test]
    fn drill_down_and_back_up() {
        let mut c = chart();
        let _ = c.set_data(sample()).unwrap();
        let _ = settle(&mut c);

        let fruit = node(&c, &["fruit"]);
        assert!(c.click_segment(fruit));
        assert!(matches!(
            c.state(),
            NavState::AnimatingDown { phase: DownPhase::Reveal, .. }
        ));
        // children are prepared on the parent's row, end to end, hidden
        let row = c.geometry().row_y(0);
        let kids: Vec<&Segment> =
            c.segments().iter().filter(|s| s.parent == Some(fruit)).collect();
        assert_eq!(kids.len(), 2);
        assert!(kids.iter().all(|s| s.rect.y == row && s.rect.opacity == 0.0));
        assert_eq!(kids[1].rect.x, kids[0].rect.x + kids[0].rect.width);
        assert_eq!(c.breadcrumbs().len(), 1);

        let _ = settle(&mut c);
        assert_eq!(c.active(), Some(fruit));
        assert_eq!(captions(&c), vec!["apple", "berries"]);
        let g = *c.geometry();
        let berries = &c.segments()[1];
        assert!((berries.rect.width - g.available_width()).abs() < 1e-9);
        assert_eq!(berries.rect.y, g.row_y(1));
        assert_eq!(berries.text.opacity, 1.0);
        let crumb = &c.breadcrumbs()[0];
        assert_eq!(crumb.caption, "fruit");
        assert_eq!(crumb.y, 10.0);
        assert_eq!(crumb.opacity, 1.0);
        assert_eq!(crumb.color, crate::util::color::Color::BLACK);

        assert!(c.click_background());
        let _ = settle(&mut c);
        assert_eq!(c.active(), None);
        assert_eq!(captions(&c), vec!["fruit", "bread"]);
        assert!(c.breadcrumbs().is_empty());
        assert!(c.segments().iter().all(|s| s.rect.opacity == 1.0));
    }

    #[test]
    fn clicks_are_ignored_while_animating_or_on_leaves() {
        let mut c = chart();
        let _ = c.set_data(sample()).unwrap();
        let fruit = node(&c, &["fruit"]);
        assert!(!c.click_segment(fruit));
        let _ = settle(&mut c);
        assert!(!c.click_segment(node(&c, &["bread"])));
        assert!(!c.click_background());
    }

    #[test]
    fn navigate_to_runs_legs_in_sequence() {
        let mut c = chart();
        let _ = c.set_data(sample()).unwrap();
        let _ = settle(&mut c);

        let ends = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&ends);
        c.on_transition_end(Box::new(move || *sink.borrow_mut() += 1));

        assert!(c.navigate_to_path(&["fruit", "berries"]));
        let _ = settle(&mut c);
        assert_eq!(c.active(), Some(node(&c, &["fruit", "berries"])));
        assert_eq!(captions(&c), vec!["straw", "blue"]);
        assert_eq!(c.breadcrumbs().len(), 2);
        assert_eq!(*ends.borrow(), 2);

        let bread = c.items()[1].clone();
        assert!(c.navigate_to(&bread));
        let _ = settle(&mut c);
        assert_eq!(c.active(), None);
        assert_eq!(captions(&c), vec!["fruit", "bread"]);
        assert_eq!(*ends.borrow(), 4);
    }

    #[test]
    fn data_change_while_animating_is_deferred() {
        let mut c = chart();
        let _ = c.set_data(sample()).unwrap();
        let _ = settle(&mut c);
        assert!(c.click_segment(node(&c, &["fruit"])));
        assert!(c.set_data(vec![Item::leaf("x", 1.0)]).unwrap());
        assert!(c.set_data(vec![Item::leaf("y", 2.0)]).unwrap());
        assert!(matches!(c.state(), NavState::AnimatingDown { .. }));

        let _ = settle(&mut c);
        assert_eq!(captions(&c), vec!["y"]);
        assert_eq!(c.active(), None);
        assert!(c.breadcrumbs().is_empty());
        assert!(!c.set_data(vec![Item::leaf("y", 2.0)]).unwrap());
    }

    #[test]
    fn resize_rescales_widths() {
        let mut c = chart();
        let _ = c.set_data(sample()).unwrap();
        let _ = settle(&mut c);
        assert!(c.set_width(400.0));
        assert_eq!(c.state(), NavState::Resizing);
        let _ = settle(&mut c);
        let g = *c.geometry();
        assert_eq!(g.width, 400.0);
        assert!((c.segments()[0].rect.width - g.available_width()).abs() < 1e-9);
        assert!(!c.set_width(400.0));
    }

    #[test]
    fn resize_waits_for_running_choreography() {
        let mut c = chart();
        let _ = c.set_data(sample()).unwrap();
        assert!(c.set_width(600.0));
        assert_eq!(c.geometry().width, 800.0);
        let _ = settle(&mut c);
        assert_eq!(c.geometry().width, 600.0);
        assert!(c.state().is_idle());
    }

    #[test]
    fn pointer_routes_clicks_and_tooltips() {
        let mut c = chart();
        let _ = c.set_data(sample()).unwrap();
        let _ = settle(&mut c);

        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicked);
        c.on_item_clicked(Box::new(move |item, _| sink.borrow_mut().push(item.caption.clone())));

        let bread = c.segments()[1].rect;
        let inside = DVec2::new(bread.x + 1.0, bread.y + 1.0);
        let tip = c.pointer_move(inside).unwrap();
        assert!(tip.text.starts_with("bread ("));
        c.pointer_click(inside);
        assert_eq!(*clicked.borrow(), vec!["bread".to_owned()]);
        assert!(c.state().is_idle());

        let fruit = c.segments()[0].rect;
        c.pointer_click(DVec2::new(fruit.x + 1.0, fruit.y + 1.0));
        assert!(matches!(c.state(), NavState::AnimatingDown { .. }));
        let _ = settle(&mut c);
        c.pointer_click(DVec2::new(-5.0, -5.0));
        assert!(matches!(c.state(), NavState::AnimatingUp { .. }));
    }
}
