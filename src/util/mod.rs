//! Shared utilities for the chart engine.
//!
//! Easing curves, RGB colors, the random color allocator, number formatting
//! and text measurement.

pub mod color;
pub mod easing;
pub mod format;
pub mod palette;
pub mod text;
