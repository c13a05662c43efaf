//! Random, sibling-unique color allocation for items without an explicit
//! color.
//!
//! Hues are drawn as `(random + golden ratio conjugate) mod 1` at fixed
//! saturation and lightness, which spreads successive draws around the
//! color wheel.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::color::Color;
use crate::item::Item;

/// Golden ratio conjugate added to every random hue.
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;
/// HSL saturation of allocated colors.
pub const SATURATION: f64 = 0.5;
/// HSL lightness of allocated colors.
pub const LIGHTNESS: f64 = 0.6;
/// Redraws allowed before a colliding candidate is accepted.
pub const MAX_ATTEMPTS: usize = 64;

/// Fills missing item colors with random colors that differ from every
/// sibling color.
#[derive(Debug, Clone)]
pub struct ColorAllocator<R = StdRng> {
    rng: R,
    max_attempts: usize,
}

impl ColorAllocator<StdRng> {
    /// Allocator seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic allocator: the same seed yields the same colors.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for ColorAllocator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ColorAllocator<R> {
    /// Allocator drawing from a caller-supplied generator.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Override the retry bound (at least one draw is always made).
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Draw one candidate color.
    pub fn candidate(&mut self) -> Color {
        let hue = (self.rng.random::<f64>() + GOLDEN_RATIO_CONJUGATE) % 1.0;
        hsl_to_color(hue, SATURATION, LIGHTNESS)
    }

    /// Draw a color not contained in `taken`.
    ///
    /// After `max_attempts` colliding draws the last candidate is returned
    /// anyway.
    pub fn unique_color(&mut self, taken: &[Color]) -> Color {
        let mut color = self.candidate();
        let mut attempts = 1;
        while taken.contains(&color) {
            if attempts >= self.max_attempts {
                log::warn!(
                    "color allocation exhausted after {attempts} attempts, \
                     accepting duplicate {color}"
                );
                break;
            }
            color = self.candidate();
            attempts += 1;
        }
        color
    }

    /// Assign a color to every uncolored item, one sibling scope at a time,
    /// recursing into branch segments. Returns the number of colors assigned.
    pub fn allocate(&mut self, items: &mut [Item]) -> usize {
        let mut taken: Vec<Color> =
            items.iter().filter_map(|item| item.color).collect();
        let mut assigned = 0;
        for item in items.iter_mut() {
            if item.color.is_none() {
                let color = self.unique_color(&taken);
                taken.push(color);
                item.color = Some(color);
                assigned += 1;
            }
            if let Some(segments) = item.segments_mut() {
                assigned += self.allocate(segments);
            }
        }
        assigned
    }
}

/// Convert HSL (all components in `[0, 1]`) to an RGB color.
#[must_use]
pub fn hsl_to_color(h: f64, s: f64, l: f64) -> Color {
    if s == 0.0 {
        return Color::from_unit(l, l, l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Color::from_unit(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
