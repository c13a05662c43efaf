//! Pie wedge angles.

use std::f64::consts::TAU;

use crate::geometry::wedge::WedgeNode;

/// Full-circle sweep used for resting geometry.
pub const FULL_SWEEP: f64 = TAU;

/// Lay `nodes` end to end over `sweep` radians in proportion to their
/// values, starting at angle 0.
///
/// A zero total uses a unit divisor, so every wedge collapses to zero width
/// instead of turning NaN.
pub fn assign_angles(nodes: &mut [WedgeNode], sweep: f64) {
    let total: f64 = nodes.iter().map(|n| n.value).sum();
    let divisor = if total > 0.0 && total.is_finite() {
        total
    } else {
        1.0
    };
    let mut angle = 0.0;
    for node in nodes {
        node.start_angle = angle;
        angle += node.value / divisor * sweep;
        node.end_angle = angle;
    }
}

/// Largest end angle among `nodes`, 0 when empty.
#[must_use]
pub fn max_end_angle(nodes: &[WedgeNode]) -> f64 {
    nodes.iter().map(|n| n.end_angle).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wedges(values: &[f64]) -> Vec<WedgeNode> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let mut n = WedgeNode::new(format!("w{i}"));
                n.value = v;
                n
            })
            .collect()
    }

    #[test]
    fn angles_are_contiguous_and_fill_sweep() {
        let mut nodes = wedges(&[1.0, 2.0, 1.0]);
        assign_angles(&mut nodes, FULL_SWEEP);
        assert_eq!(nodes[0].start_angle, 0.0);
        assert_eq!(nodes[1].start_angle, nodes[0].end_angle);
        assert!((nodes[1].sweep() - TAU / 2.0).abs() < 1e-12);
        assert!((max_end_angle(&nodes) - TAU).abs() < 1e-12);
    }

    #[test]
    fn zero_total_collapses_without_nan() {
        let mut nodes = wedges(&[0.0, 0.0]);
        assign_angles(&mut nodes, FULL_SWEEP);
        assert!(nodes.iter().all(|n| n.start_angle == 0.0 && n.end_angle == 0.0));
        assert_eq!(max_end_angle(&[]), 0.0);
    }

    #[test]
    fn partial_sweep_scales_angles() {
        let mut nodes = wedges(&[1.0, 1.0]);
        assign_angles(&mut nodes, 2.0);
        assert_eq!(nodes[1].end_angle, 2.0);
    }
}
