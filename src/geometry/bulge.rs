// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconstructs the circular arc implied by a polyline vertex's bulge.
//!
//! A bulge is `tan(included_angle / 4)`: positive sweeps counterclockwise
//! from the vertex to the next, negative clockwise. Zero means the
//! segment is a straight line, not an arc.

use crate::floatfuncs::{atan, FloatFuncs};
use crate::model::Point2;

/// The arc a single bulged polyline segment expands to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BulgeArc {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub ccw: bool,
}

/// Returns `None` for a zero bulge (straight segment) or a degenerate
/// (zero-length) chord.
pub(crate) fn bulge_to_arc(p0: Point2, p1: Point2, bulge: f64) -> Option<BulgeArc> {
    if bulge == 0.0 {
        return None;
    }
    let d = p1 - p0;
    let chord = d.x.hypot(d.y);
    if chord == 0.0 {
        return None;
    }

    let theta = 4.0 * atan(bulge);
    let (half_sin, half_cos) = FloatFuncs::sin_cos(theta * 0.5);
    if half_sin == 0.0 {
        return None;
    }
    let radius = chord / (2.0 * half_sin.abs());

    let ux = d.x / chord;
    let uy = d.y / chord;
    let perp = Point2::new(-uy, ux);
    let apothem = radius * half_cos * bulge.signum();
    let mid = Point2::new((p0.x + p1.x) * 0.5, (p0.y + p1.y) * 0.5);
    let center = mid + perp * apothem;

    let start_angle = FloatFuncs::atan2(p0.y - center.y, p0.x - center.x);
    let end_angle = FloatFuncs::atan2(p1.y - center.y, p1.x - center.x);

    Some(BulgeArc { center, radius, start_angle, end_angle, ccw: bulge > 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semicircle_bulge_has_radius_half_chord() {
        // bulge == 1.0 is a semicircle: theta == pi, radius == chord / 2.
        let arc = bulge_to_arc(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), 1.0).unwrap();
        assert!((arc.radius - 1.0).abs() < 1e-9);
        assert!(arc.ccw);
    }

    #[test]
    fn zero_bulge_is_a_line() {
        assert!(bulge_to_arc(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), 0.0).is_none());
    }

    #[test]
    fn negative_bulge_sweeps_clockwise() {
        let arc = bulge_to_arc(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), -1.0).unwrap();
        assert!(!arc.ccw);
    }
}
