// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The spatial query engine: point hit-testing and rectangular box
//! selection, both descending recursively through INSERTs while
//! resolving each child entity's effective layer.
//!
//! Hit-testing never fails per §7's policy; both entry points return an
//! empty result rather than propagating an error.

use crate::floatfuncs::FloatFuncs;
use crate::model::Point2;

mod point;
mod rect;

pub use point::hit_point;
pub use rect::hit_box;

/// Shortest distance from `p` to the segment `a`-`b`.
pub(crate) fn point_segment_distance(p: Point2, a: Point2, b: Point2) -> f64 {
    let ab = b - a;
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 == 0.0 {
        return (p.x - a.x).hypot(p.y - a.y);
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len2).clamp(0.0, 1.0);
    let proj = Point2::new(a.x + ab.x * t, a.y + ab.y * t);
    (p.x - proj.x).hypot(p.y - proj.y)
}

/// Shortest distance from `p` to the line through `origin` in
/// `direction`. When `bounded` the line is cut off at `origin` (a RAY,
/// semi-infinite); otherwise it extends both ways (an XLINE).
pub(crate) fn point_line_distance(p: Point2, origin: Point2, direction: Point2, bounded: bool) -> f64 {
    let len2 = direction.x * direction.x + direction.y * direction.y;
    if len2 == 0.0 {
        return (p.x - origin.x).hypot(p.y - origin.y);
    }
    let t = ((p.x - origin.x) * direction.x + (p.y - origin.y) * direction.y) / len2;
    let t = if bounded { t.max(0.0) } else { t };
    let proj = Point2::new(origin.x + direction.x * t, origin.y + direction.y * t);
    (p.x - proj.x).hypot(p.y - proj.y)
}

/// Normalizes an angle in radians to `[0, 2*pi)`.
fn normalize_angle(a: f64) -> f64 {
    let tau = core::f64::consts::TAU;
    let r = a % tau;
    if r < 0.0 {
        r + tau
    } else {
        r
    }
}

/// `true` when `angle` lies within the sweep from `start` to `end`
/// (radians), wrapping across `2*pi` and honoring direction: when `ccw`
/// is `false` the sweep runs from `end` to `start` instead. A
/// zero-length sweep (`start == end`) is treated as the full circle.
pub(crate) fn angle_in_sweep(angle: f64, start: f64, end: f64, ccw: bool) -> bool {
    let (s, e) = if ccw { (start, end) } else { (end, start) };
    let span = normalize_angle(e - s);
    if span == 0.0 {
        return true;
    }
    let offset = normalize_angle(angle - s);
    offset <= span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_segment_distance_to_nearest_endpoint() {
        let d = point_segment_distance(Point2::new(-1.0, 0.0), Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn point_segment_distance_perpendicular() {
        let d = point_segment_distance(Point2::new(0.5, 1.0), Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn angle_in_sweep_simple_ccw() {
        assert!(angle_in_sweep(1.0, 0.0, 2.0, true));
        assert!(!angle_in_sweep(3.0, 0.0, 2.0, true));
    }

    #[test]
    fn angle_in_sweep_wraps_across_zero() {
        // sweep from 350deg to 10deg, in radians.
        let start = 350.0_f64.to_radians();
        let end = 10.0_f64.to_radians();
        assert!(angle_in_sweep(0.0, start, end, true));
        assert!(angle_in_sweep(5.0_f64.to_radians(), start, end, true));
        assert!(!angle_in_sweep(180.0_f64.to_radians(), start, end, true));
    }

    #[test]
    fn angle_in_sweep_cw_reverses_direction() {
        assert!(angle_in_sweep(1.0, 2.0, 0.0, false));
        assert!(!angle_in_sweep(3.0, 2.0, 0.0, false));
    }
}
