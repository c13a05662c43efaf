//! X-axis tick optimisation for the segmented bar chart.
//!
//! Starting from a 10 px minimum spacing, the tick step is derived from the
//! available width, rounded up at the first significant digit, and the
//! minimum spacing grows until the formatted maximum value fits between two
//! ticks.

use super::bars::BarGeometry;
use crate::geometry::bar::Tick;
use crate::util::format::NumberFormat;

/// Initial minimum distance between two ticks.
pub const MIN_TICK_SPACE: f64 = 10.0;

const MAX_DECIMALS: usize = 12;
const MAX_ROUNDS: usize = 32;

/// Step, spacing and precision of the ticks last computed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickAxis {
    /// Value between two ticks.
    pub tick_value: f64,
    /// Pixels between two ticks.
    pub tick_width: f64,
    /// Fraction digits of tick labels.
    pub decimals: usize,
}

impl TickAxis {
    /// Position and value of tick `i` on this axis.
    #[must_use]
    pub fn at(&self, i: usize, offset_left: f64) -> (f64, f64) {
        (
            offset_left + i as f64 * self.tick_width,
            i as f64 * self.tick_value,
        )
    }
}

/// Ticks for a level whose largest bar is worth `max_value`.
///
/// `char_width` estimates the rendered width of one label character. A tick
/// whose label would overflow the chart's right edge is fully transparent.
/// A non-positive `max_value` yields a single tick at 0.
pub fn calc_ticks<F: NumberFormat + ?Sized>(
    geometry: &BarGeometry,
    max_value: f64,
    format: &F,
    char_width: f64,
) -> (Vec<Tick>, TickAxis) {
    if max_value <= 0.0 || !max_value.is_finite() {
        let tick = Tick {
            value: 0.0,
            decimals: 0,
            x: geometry.offset_left,
            opacity: 1.0,
        };
        return (vec![tick], TickAxis::default());
    }

    let max_width = geometry.available_width();
    let label_width = |value: f64, decimals: usize| {
        format.format_fixed(value, decimals).chars().count() as f64 * char_width
    };

    let mut min_space = MIN_TICK_SPACE;
    let mut axis = TickAxis::default();
    let mut count = 1_usize;
    for _ in 0..MAX_ROUNDS {
        let slots = (max_width / min_space).floor();
        let raw_count = slots + 1.0;
        let mut tick_value = if raw_count <= 1.0 {
            max_value
        } else {
            max_value / (raw_count - 1.0)
        };

        let mut factor = 1.0;
        let mut decimals = 0;
        while tick_value / factor < 0.9 && decimals < MAX_DECIMALS {
            factor /= 10.0;
            decimals += 1;
        }
        tick_value = (tick_value / factor).ceil() * factor;

        axis = TickAxis {
            tick_value,
            tick_width: tick_value / max_value * max_width,
            decimals,
        };
        count = (max_value / tick_value).floor() as usize + 1;

        let width = label_width(max_value, decimals);
        if width <= min_space {
            break;
        }
        min_space = width + 10.0;
    }

    let ticks = (0..count)
        .map(|i| {
            let (x, value) = axis.at(i, geometry.offset_left);
            let width = label_width(value, axis.decimals);
            Tick {
                value,
                decimals: axis.decimals,
                x,
                opacity: if x > geometry.width - width / 2.0 {
                    0.0
                } else {
                    1.0
                },
            }
        })
        .collect();
    log::debug!(
        "ticks for max {max_value}: {count} x {} ({} decimals)",
        axis.tick_value,
        axis.decimals
    );
    (ticks, axis)
}

/// Padding applied to both tick arrays so they can be tweened pairwise.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSlide {
    /// Target ticks, one per current tick.
    pub targets: Vec<Tick>,
    /// Trailing ticks to drop once the slide completes.
    pub surplus: usize,
}

/// Pair the `current` ticks (laid out on `old`) with freshly computed
/// `targets` (laid out on `new`).
///
/// Ticks that disappear slide out to their would-be position on the new
/// axis while fading; ticks that appear are appended to `current` at their
/// would-be position on the old axis, transparent, and slide in.
pub fn plan_slide(
    current: &mut Vec<Tick>,
    old: TickAxis,
    mut targets: Vec<Tick>,
    new: TickAxis,
    offset_left: f64,
) -> TickSlide {
    let mut surplus = 0;
    let kept = targets.len();
    for (i, leaving) in current.iter().enumerate().skip(kept) {
        let (x, value) = new.at(i, offset_left);
        let mut tick = *leaving;
        tick.x = x;
        tick.value = value;
        tick.opacity = 0.0;
        targets.push(tick);
        surplus += 1;
    }
    let shown = current.len();
    for (i, arriving) in targets.iter().enumerate().skip(shown) {
        let (x, value) = old.at(i, offset_left);
        let mut tick = *arriving;
        tick.x = x;
        tick.value = value;
        tick.opacity = 0.0;
        current.push(tick);
    }
    TickSlide { targets, surplus }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::format::DecimalFormat;

    fn geometry() -> BarGeometry {
        BarGeometry {
            width: 800.0,
            offset_left: 50.0,
            ..BarGeometry::default()
        }
    }

    #[test]
    fn ticks_round_step_and_cover_max() {
        let (ticks, axis) = calc_ticks(&geometry(), 100.0, &DecimalFormat::default(), 7.0);
        // "100" is 21 px wide: min space 31 -> 24 slots -> step 4.17 -> 5
        assert_eq!(axis.tick_value, 5.0);
        assert_eq!(axis.decimals, 0);
        assert_eq!(ticks.len(), 21);
        assert_eq!(ticks[0].x, 50.0);
        assert!((ticks[20].value - 100.0).abs() < 1e-9);
        assert!((ticks[20].x - 799.0).abs() < 1e-9);
        // last label would overflow the right edge
        assert_eq!(ticks[20].opacity, 0.0);
        assert_eq!(ticks[19].opacity, 1.0);
    }

    #[test]
    fn small_values_gain_decimals() {
        let (ticks, axis) = calc_ticks(&geometry(), 0.5, &DecimalFormat::default(), 7.0);
        assert!(axis.decimals >= 1);
        assert!(ticks.iter().all(|t| t.decimals == axis.decimals));
        assert!(ticks.last().is_some_and(|t| t.value <= 0.5 + 1e-9));
    }

    #[test]
    fn zero_max_gives_single_tick() {
        let (ticks, axis) = calc_ticks(&geometry(), 0.0, &DecimalFormat::default(), 7.0);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].value, 0.0);
        assert_eq!(axis, TickAxis::default());
    }

    #[test]
    fn slide_pads_both_sides() {
        let tick = |x: f64| Tick {
            value: x,
            decimals: 0,
            x,
            opacity: 1.0,
        };
        let old = TickAxis {
            tick_value: 10.0,
            tick_width: 100.0,
            decimals: 0,
        };
        let new = TickAxis {
            tick_value: 5.0,
            tick_width: 50.0,
            decimals: 0,
        };
        let mut current = vec![tick(0.0), tick(100.0), tick(200.0)];
        let slide = plan_slide(&mut current, old, vec![tick(0.0)], new, 0.0);
        assert_eq!(slide.surplus, 2);
        assert_eq!(slide.targets.len(), 3);
        assert_eq!(slide.targets[2].x, 100.0);
        assert_eq!(slide.targets[2].opacity, 0.0);

        let mut current = vec![tick(0.0)];
        let targets = vec![tick(0.0), tick(50.0), tick(100.0)];
        let slide = plan_slide(&mut current, old, targets, new, 0.0);
        assert_eq!(slide.surplus, 0);
        assert_eq!(current.len(), 3);
        assert_eq!(current[2].x, 200.0);
        assert_eq!(current[2].value, 20.0);
        assert_eq!(current[2].opacity, 0.0);
    }
}
