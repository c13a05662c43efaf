// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Diff-and-animate engine for data-driven charts.
//!
//! A chart is handed a list of [`item::Item`]s. It lays them out for its
//! viewport, reconciles the new layout against what is on screen by
//! caption, and tweens every changed attribute to its new value. Hosts call
//! [`charts::Chart::tick`] once per frame and draw the live geometry the
//! chart exposes; nothing here renders.
//!
//! # Key entry points
//!
//! - [`charts::BubbleChart`] - packed circles, area proportional to value
//! - [`charts::PieChart`] - ordered wedges over the full circle
//! - [`charts::SegmentedBarChart`] - one level of a tree as bars, with
//!   animated drill-down and drill-up
//! - [`options::Options`] - chart configuration, loadable from TOML presets
//! - [`animation`] - epoch-tagged tracks, transitions and the scheduler
//!   joining them
//!
//! # Architecture
//!
//! Each flat chart keeps paired `current`/`target` geometry arrays in an
//! [`animation::ChartState`]. [`reconcile::reconcile`] diffs a fresh layout
//! into the target array, leaving removed entries as tombstones, and a
//! single [`animation::Track`] plays the difference. Starting a new
//! transition interrupts the running one: its epoch goes stale and it never
//! writes again, so the next diff starts from the values on screen.
//!
//! The segmented bar chart drives several tracks per phase (bars, ticks,
//! breadcrumbs) and advances its navigation state machine when the
//! scheduler reports that every part of the phase has joined.

pub mod animation;
pub mod charts;
pub mod error;
pub mod geometry;
pub mod input;
pub mod item;
pub mod layout;
pub mod options;
pub mod reconcile;
pub mod util;

pub use charts::{BubbleChart, Chart, PieChart, SegmentedBarChart};
pub use error::ChartError;
pub use item::Item;
pub use options::Options;
