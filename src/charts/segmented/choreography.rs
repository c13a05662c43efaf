//! Phase bodies of the segmented bar chart: what each phase prepares
//! instantly and which tweens it plays.

use web_time::Duration;

use super::{DataPhase, DownPhase, NavState, SegmentedBarChart, TickFinish, UpPhase};
use crate::animation::{Transition, TweenSet};
use crate::geometry::{
    BarLabel, BarRect, Breadcrumb, BreadcrumbField, Segment, SegmentField, TickField,
};
use crate::item::Item;
use crate::layout::ticks::plan_slide;
use crate::layout::{calc_ticks, Hierarchy, NodeId};
use crate::util::color::Color;

impl SegmentedBarChart {
    /// Hidden bar for `id` with its label at `text_y`.
    fn new_segment(&self, id: NodeId, x: f64, y: f64, width: f64, text_y: f64) -> Option<Segment> {
        let node = self.hierarchy.node(id)?;
        Some(Segment {
            node: id,
            parent: node.parent,
            caption: node.caption.clone(),
            value: node.value,
            color: node.color,
            rect: BarRect {
                x,
                y,
                width,
                height: self.geometry.bar_height,
                opacity: 0.0,
            },
            text: BarLabel {
                x: self.geometry.label_x(),
                y: text_y,
                opacity: 0.0,
            },
        })
    }

    /// Recompute the axis for `max_value` and slide the present ticks onto
    /// it. With `early` the label precision switches now, otherwise when
    /// the phase ends.
    fn slide_ticks(&mut self, max_value: f64, early: bool) -> TweenSet<TickField> {
        let old = self.axis;
        let (targets, axis) = calc_ticks(
            &self.geometry,
            max_value,
            self.format.as_ref(),
            self.bars.label_char_width,
        );
        self.axis = axis;
        let slide = plan_slide(
            &mut self.ticks,
            old,
            targets,
            axis,
            self.geometry.offset_left,
        );
        if early {
            for tick in &mut self.ticks {
                tick.decimals = axis.decimals;
            }
        }
        self.tick_finish = Some(TickFinish {
            surplus: slide.surplus,
            decimals: (!early).then_some(axis.decimals),
        });
        TweenSet::between(&self.ticks, &slide.targets)
    }

    /// Fade everything out, then show `items`. With nothing on screen the
    /// new data is shown directly.
    pub(super) fn begin_data_change(&mut self, items: Vec<Item>) {
        self.incoming = Some(items);
        if self.segments.is_empty() {
            self.show_data();
            return;
        }
        let offset_left = self.geometry.offset_left;
        let mut segments = TweenSet::new();
        for i in 0..self.segments.len() {
            let _ = segments
                .toward(&self.segments, i, SegmentField::Width, 0.0)
                .toward(&self.segments, i, SegmentField::Opacity, 0.0)
                .toward(&self.segments, i, SegmentField::TextOpacity, 0.0);
        }
        let mut ticks = TweenSet::new();
        for i in 0..self.ticks.len() {
            let _ = ticks
                .toward(&self.ticks, i, TickField::X, offset_left)
                .toward(&self.ticks, i, TickField::Value, 0.0)
                .toward(&self.ticks, i, TickField::Opacity, 0.0);
        }
        let mut crumbs = TweenSet::new();
        for i in 0..self.breadcrumbs.len() {
            let _ = crumbs.toward(&self.breadcrumbs, i, BreadcrumbField::Opacity, 0.0);
        }
        self.start_phase(
            NavState::AnimatingDataChange(DataPhase::Hide),
            self.phase_transition("hide", 1),
            segments,
            Some(ticks),
            Some(crumbs),
        );
    }

    /// Rebuild the tree from the incoming data and grow its top level in.
    pub(super) fn show_data(&mut self) {
        let Some(items) = self.incoming.take() else {
            self.operation_complete();
            return;
        };
        self.breadcrumbs.clear();
        self.ticks.clear();
        self.tick_finish = None;
        self.active = None;
        self.hierarchy = Hierarchy::build(&items);
        self.items = items;
        self.geometry
            .fit(&self.hierarchy, self.measure.as_ref(), self.bars.label_font_size);
        let max_value = self.hierarchy.max_value(None);
        self.factor = self.geometry.factor(max_value);
        log::debug!(
            "showing {} node(s), {} at the top level",
            self.hierarchy.len(),
            self.hierarchy.children(None).len()
        );

        let offset_left = self.geometry.offset_left;
        self.segments = self
            .hierarchy
            .children(None)
            .iter()
            .enumerate()
            .filter_map(|(row, &id)| {
                let width = self.hierarchy.value(id) * self.factor;
                let text_y = self.geometry.label_y(row);
                self.new_segment(id, offset_left, self.geometry.row_y(row), width, text_y)
            })
            .collect();
        let mut segments = TweenSet::new();
        for (i, segment) in self.segments.iter().enumerate() {
            let _ = segments
                .span(i, SegmentField::Width, 0.0, segment.rect.width)
                .span(i, SegmentField::Opacity, 0.0, 1.0)
                .span(i, SegmentField::TextOpacity, 0.0, 1.0);
        }

        let (targets, axis) = calc_ticks(
            &self.geometry,
            max_value,
            self.format.as_ref(),
            self.bars.label_char_width,
        );
        self.axis = axis;
        let mut ticks = TweenSet::new();
        for (i, tick) in targets.iter().enumerate() {
            let _ = ticks
                .span(i, TickField::X, offset_left, tick.x)
                .span(i, TickField::Value, 0.0, tick.value)
                .span(i, TickField::Opacity, 0.0, tick.opacity);
        }
        self.ticks = targets;

        self.start_phase(
            NavState::AnimatingDataChange(DataPhase::Show),
            self.phase_transition("show", 1),
            segments,
            Some(ticks),
            None,
        );
    }

    /// Rescale bars and ticks to `width`.
    pub(super) fn begin_resize(&mut self, width: f64) {
        log::debug!("resizing from {} to {width}", self.geometry.width);
        self.geometry.width = width;
        let max_value = self.hierarchy.max_value(self.active);
        self.factor = self.geometry.factor(max_value);
        let mut segments = TweenSet::new();
        for (i, segment) in self.segments.iter().enumerate() {
            let _ = segments.toward(
                &self.segments,
                i,
                SegmentField::Width,
                segment.value * self.factor,
            );
        }
        let ticks = self.slide_ticks(max_value, true);
        let transition = Transition::smooth(Duration::from_millis(self.bars.resize_ms))
            .with_easing(self.easing)
            .named("resize");
        self.start_phase(NavState::Resizing, transition, segments, Some(ticks), None);
    }

    /// Prepare the children of `target` end to end over its bar, then fade
    /// them in while the rest of the level shrinks away.
    pub(super) fn begin_down(&mut self, target: NodeId) -> bool {
        if self.hierarchy.parent(target) != self.active || !self.hierarchy.has_children(target) {
            return false;
        }
        let Some(parent) = self.segments.iter().find(|s| s.node == target) else {
            return false;
        };
        let (row_y, label, color) = (parent.rect.y, parent.text, parent.color);
        let caption = parent.caption.clone();
        log::debug!("descending into {caption:?}");

        let mut x = self.geometry.offset_left;
        let children: Vec<Segment> = self
            .hierarchy
            .children(Some(target))
            .iter()
            .enumerate()
            .filter_map(|(row, &id)| {
                let width = self.hierarchy.value(id) * self.factor;
                let segment = self.new_segment(id, x, row_y, width, self.geometry.label_y(row))?;
                x += width;
                Some(segment)
            })
            .collect();
        self.segments.extend(children);
        self.breadcrumbs.push(Breadcrumb {
            node: target,
            caption,
            x: label.x,
            y: label.y,
            color,
            opacity: 0.0,
        });

        let mut segments = TweenSet::new();
        for (i, segment) in self.segments.iter().enumerate() {
            let _ = if segment.parent == Some(target) {
                segments.toward(&self.segments, i, SegmentField::Opacity, 1.0)
            } else if segment.node == target {
                segments
                    .toward(&self.segments, i, SegmentField::Opacity, 0.0)
                    .toward(&self.segments, i, SegmentField::TextOpacity, 0.0)
            } else {
                segments
                    .toward(&self.segments, i, SegmentField::Width, 0.0)
                    .toward(&self.segments, i, SegmentField::TextOpacity, 0.0)
            };
        }
        let mut crumbs = TweenSet::new();
        if let Some(last) = self.breadcrumbs.len().checked_sub(1) {
            let _ = crumbs.toward(&self.breadcrumbs, last, BreadcrumbField::Opacity, 1.0);
        }

        self.start_phase(
            NavState::AnimatingDown {
                phase: DownPhase::Reveal,
                target,
            },
            self.phase_transition("down-reveal", self.bars.down_cycles),
            segments,
            None,
            Some(crumbs),
        );
        true
    }

    /// Drop the old level, slide the children to their rows and move the
    /// new breadcrumb to the end of the trail.
    pub(super) fn down_reposition(&mut self, target: NodeId) {
        self.active = Some(target);
        let active = self.active;
        self.segments.retain(|s| s.parent == active);

        let offset_left = self.geometry.offset_left;
        let mut segments = TweenSet::new();
        for i in 0..self.segments.len() {
            let _ = segments
                .toward(&self.segments, i, SegmentField::X, offset_left)
                .toward(&self.segments, i, SegmentField::Y, self.geometry.row_y(i));
        }

        let font_size = self.bars.label_font_size;
        let trail_end: f64 = self
            .breadcrumbs
            .iter()
            .enumerate()
            .map(|(i, crumb)| {
                let lead = if i == 0 {
                    self.bars.breadcrumb_lead
                } else {
                    self.bars.breadcrumb_gap
                };
                lead + self.measure.measure(&crumb.caption, font_size).width
            })
            .sum();
        let mut crumbs = TweenSet::new();
        if let Some(last) = self.breadcrumbs.len().checked_sub(1) {
            let _ = crumbs
                .toward(&self.breadcrumbs, last, BreadcrumbField::X, trail_end)
                .toward(&self.breadcrumbs, last, BreadcrumbField::Y, self.bars.breadcrumb_y)
                .toward(&self.breadcrumbs, last, BreadcrumbField::Color, Color::BLACK)
                .toward(&self.breadcrumbs, last, BreadcrumbField::Opacity, 1.0);
        }

        self.start_phase(
            NavState::AnimatingDown {
                phase: DownPhase::Reposition,
                target,
            },
            self.phase_transition("down-reposition", self.bars.down_cycles),
            segments,
            None,
            Some(crumbs),
        );
    }

    /// Rescale the children to the width of the chart and bring in their
    /// labels.
    pub(super) fn down_rescale(&mut self, target: NodeId) {
        let max_value = self.hierarchy.max_value(Some(target));
        self.factor = self.geometry.factor(max_value);
        let mut segments = TweenSet::new();
        for (i, segment) in self.segments.iter().enumerate() {
            let _ = segments
                .toward(
                    &self.segments,
                    i,
                    SegmentField::Width,
                    segment.value * self.factor,
                )
                .span(i, SegmentField::TextOpacity, 0.0, 1.0);
        }
        let ticks = self.slide_ticks(max_value, true);
        self.start_phase(
            NavState::AnimatingDown {
                phase: DownPhase::Rescale,
                target,
            },
            self.phase_transition("down-rescale", self.bars.down_cycles),
            segments,
            Some(ticks),
            None,
        );
    }

    /// Rescale the shown level to the parent's scale and hide its labels.
    pub(super) fn begin_up(&mut self) -> bool {
        let Some(from) = self.active else {
            return false;
        };
        let parent = self.hierarchy.parent(from);
        let max_value = self.hierarchy.max_value(parent);
        self.factor = self.geometry.factor(max_value);
        let mut segments = TweenSet::new();
        for (i, segment) in self.segments.iter().enumerate() {
            let _ = segments
                .toward(
                    &self.segments,
                    i,
                    SegmentField::Width,
                    segment.value * self.factor,
                )
                .span(i, SegmentField::TextOpacity, 1.0, 0.0);
        }
        let ticks = self.slide_ticks(max_value, false);
        log::debug!("ascending out of {from}");
        self.start_phase(
            NavState::AnimatingUp {
                phase: UpPhase::Rescale,
                from,
            },
            self.phase_transition("up-rescale", self.bars.up_cycles),
            segments,
            Some(ticks),
            None,
        );
        true
    }

    /// Line the shown bars up end to end on `from`'s row and return the
    /// last breadcrumb to `from`'s label.
    pub(super) fn up_reposition(&mut self, from: NodeId) {
        let row = self.hierarchy.sibling_index(from).unwrap_or(0);
        let offset_y = self.geometry.row_y(row);
        let mut segments = TweenSet::new();
        let mut x = self.geometry.offset_left;
        for (i, segment) in self.segments.iter().enumerate() {
            let _ = segments
                .toward(&self.segments, i, SegmentField::X, x)
                .toward(&self.segments, i, SegmentField::Y, offset_y);
            x += segment.rect.width;
        }

        let color = self
            .hierarchy
            .node(from)
            .map_or(Color::BLACK, |node| node.color);
        let mut crumbs = TweenSet::new();
        if let Some(last) = self.breadcrumbs.len().checked_sub(1) {
            let _ = crumbs
                .toward(&self.breadcrumbs, last, BreadcrumbField::X, self.geometry.label_x())
                .toward(
                    &self.breadcrumbs,
                    last,
                    BreadcrumbField::Y,
                    self.geometry.label_y_at(offset_y),
                )
                .toward(&self.breadcrumbs, last, BreadcrumbField::Color, color);
        }

        self.start_phase(
            NavState::AnimatingUp {
                phase: UpPhase::Reposition,
                from,
            },
            self.phase_transition("up-reposition", self.bars.up_cycles),
            segments,
            None,
            Some(crumbs),
        );
    }

    /// Put the parent level back under the shown bars, grow it in and fade
    /// the shown bars out.
    pub(super) fn up_reveal(&mut self, from: NodeId) {
        let parent = self.hierarchy.parent(from);
        self.active = parent;
        let offset_left = self.geometry.offset_left;
        let level: Vec<Segment> = self
            .hierarchy
            .children(parent)
            .iter()
            .enumerate()
            .filter_map(|(row, &id)| {
                let y = self.geometry.row_y(row);
                let width = self.hierarchy.value(id) * self.factor;
                let mut segment =
                    self.new_segment(id, offset_left, y, width, self.geometry.label_y(row))?;
                segment.rect.opacity = 1.0;
                segment.text.opacity = 1.0;
                Some(segment)
            })
            .collect();
        for (i, segment) in level.into_iter().enumerate() {
            self.segments.insert(i, segment);
        }

        let mut segments = TweenSet::new();
        for (i, segment) in self.segments.iter().enumerate() {
            let _ = if segment.node == from {
                segments.toward(&self.segments, i, SegmentField::Opacity, 1.0)
            } else if segment.parent == parent {
                segments
                    .span(i, SegmentField::Width, 0.0, segment.rect.width)
                    .span(i, SegmentField::TextOpacity, 0.0, 1.0)
            } else {
                segments.toward(&self.segments, i, SegmentField::Opacity, 0.0)
            };
        }
        let mut crumbs = TweenSet::new();
        if let Some(last) = self.breadcrumbs.len().checked_sub(1) {
            let _ = crumbs.toward(&self.breadcrumbs, last, BreadcrumbField::Opacity, 0.0);
        }

        self.start_phase(
            NavState::AnimatingUp {
                phase: UpPhase::Reveal,
                from,
            },
            self.phase_transition("up-reveal", self.bars.up_cycles),
            segments,
            None,
            Some(crumbs),
        );
    }

    /// Drop the left level and its breadcrumb.
    pub(super) fn up_finish(&mut self) {
        let _ = self.breadcrumbs.pop();
        let active = self.active;
        self.segments.retain(|s| s.parent == active);
    }
}
