//! Positioned shapes handed to the host renderer.
//!
//! Each chart exposes its live geometry as plain structs: circles for the
//! bubble chart, wedges for the pie chart, and bars, axis ticks and
//! breadcrumbs for the segmented bar chart. All of them implement
//! [`Animatable`](crate::animation::Animatable) so tracks can drive them.

pub mod bar;
pub mod bubble;
pub mod wedge;

pub use bar::{
    BarLabel, BarRect, Breadcrumb, BreadcrumbField, Segment, SegmentField,
    Tick, TickField,
};
pub use bubble::{BubbleField, BubbleNode};
pub use wedge::{ArcGeometry, WedgeField, WedgeNode};

use crate::animation::Animatable;

/// One item at one animation endpoint, matched across snapshots by caption.
pub trait GeometryNode: Animatable + Clone {
    /// Identity key.
    fn caption(&self) -> &str;

    /// Whether the node is a tombstone awaiting purge.
    fn is_deleted(&self) -> bool;

    /// Flag the node as a tombstone.
    fn mark_deleted(&mut self);

    /// Zero the node's size and value in place, keeping its location.
    fn collapse(&mut self);

    /// Copy non-animated attributes from a freshly laid out node.
    fn sync_cosmetic(&mut self, layout: &Self);

    /// Value represented by the node.
    fn value(&self) -> f64;
}
