// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! B-spline / NURBS evaluation via de Boor's algorithm, generalized to
//! rational splines by carrying weights through homogeneous coordinates.

extern crate alloc;
use alloc::vec::Vec;

use crate::model::Point2;

/// Evaluates the spline defined by `control_points`/`knots`/`weights` at
/// parameter `u`. `weights` may be empty for a non-rational spline (every
/// weight implicitly `1.0`).
///
/// Returns the first control point for a degenerate spline (fewer than
/// two control points, or a knot vector too short for `degree`).
pub(crate) fn eval_spline(degree: usize, control_points: &[Point2], knots: &[f64], weights: &[f64], u: f64) -> Point2 {
    let n = control_points.len();
    if n == 0 {
        return Point2::ZERO;
    }
    if n == 1 || knots.len() < n + degree + 1 || degree == 0 {
        return control_points[0];
    }

    let rational = weights.len() == n;
    let mut hx: Vec<f64> = Vec::with_capacity(n);
    let mut hy: Vec<f64> = Vec::with_capacity(n);
    let mut hw: Vec<f64> = Vec::with_capacity(n);
    for (i, cp) in control_points.iter().enumerate() {
        let w = if rational { weights[i] } else { 1.0 };
        hx.push(cp.x * w);
        hy.push(cp.y * w);
        hw.push(w);
    }

    let lo = knots[degree];
    let hi = knots[n];
    let u = u.clamp(lo.min(hi), lo.max(hi));

    let mut span = degree;
    while span < n - 1 && u >= knots[span + 1] {
        span += 1;
    }

    let mut dx = hx[span - degree..=span].to_vec();
    let mut dy = hy[span - degree..=span].to_vec();
    let mut dw = hw[span - degree..=span].to_vec();

    for r in 1..=degree {
        for j in (r..=degree).rev() {
            let i = span - degree + j;
            let denom = knots[i + degree - r + 1] - knots[i];
            let alpha = if denom.abs() < f64::EPSILON { 0.0 } else { (u - knots[i]) / denom };
            dx[j] = (1.0 - alpha) * dx[j - 1] + alpha * dx[j];
            dy[j] = (1.0 - alpha) * dy[j - 1] + alpha * dy[j];
            dw[j] = (1.0 - alpha) * dw[j - 1] + alpha * dw[j];
        }
    }

    let w_final = dw[degree];
    if w_final.abs() < f64::EPSILON {
        Point2::new(dx[degree], dy[degree])
    } else {
        Point2::new(dx[degree] / w_final, dy[degree] / w_final)
    }
}

/// Synthesizes a clamped uniform knot vector of length `count + degree +
/// 1` for `count` control points, per §4.8's fallback when the file
/// supplies none.
pub(crate) fn clamped_uniform_knots(count: usize, degree: usize) -> Vec<f64> {
    let total = count + degree + 1;
    let mut knots = Vec::with_capacity(total);
    for _ in 0..=degree {
        knots.push(0.0);
    }
    let interior = total.saturating_sub(2 * (degree + 1));
    for i in 1..=interior {
        knots.push(i as f64 / (interior + 1) as f64);
    }
    for _ in 0..=degree {
        knots.push(1.0);
    }
    knots
}

/// Samples the spline defined by `control_points`/`degree`/`knots`/
/// `weights` into a polyline.
///
/// `knots` synthesizes a clamped uniform vector (see
/// [`clamped_uniform_knots`]) when `None` or empty. `segments` defaults
/// to `max(100, 10 * control_points.len())`. Per §4.8, a spline with
/// fewer than `degree + 1` control points is invalid NURBS input; its
/// control polygon is returned unchanged rather than evaluated.
pub(crate) fn sample_spline(
    control_points: &[Point2],
    degree: usize,
    knots: Option<&[f64]>,
    weights: Option<&[f64]>,
    segments: Option<usize>,
) -> Vec<Point2> {
    let n = control_points.len();
    if n < degree + 1 {
        return control_points.to_vec();
    }

    let owned_knots;
    let knots: &[f64] = match knots {
        Some(k) if !k.is_empty() => k,
        _ => {
            owned_knots = clamped_uniform_knots(n, degree);
            &owned_knots
        }
    };
    let weights = weights.unwrap_or(&[]);

    let lo = knots[degree];
    let hi = knots[n];
    let sample_count = segments.unwrap_or_else(|| (10 * n).max(100));

    let mut out = Vec::with_capacity(sample_count + 1);
    for i in 0..=sample_count {
        let u = lo + (hi - lo) * (i as f64 / sample_count as f64);
        out.push(eval_spline(degree, control_points, knots, weights, u));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_uniform_knots_has_expected_length() {
        let knots = clamped_uniform_knots(6, 3);
        assert_eq!(knots.len(), 6 + 3 + 1);
        assert_eq!(knots[0], 0.0);
        assert_eq!(*knots.last().unwrap(), 1.0);
    }

    #[test]
    fn sample_spline_respects_segment_count() {
        let ctrl = [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 0.0), Point2::new(3.0, 1.0)];
        let points = sample_spline(&ctrl, 3, None, None, Some(10));
        assert_eq!(points.len(), 11);
        assert!((points[0].x - ctrl[0].x).abs() < 1e-9);
        assert!((points[10].x - ctrl[3].x).abs() < 1e-9);
    }

    #[test]
    fn too_few_control_points_returns_control_polygon() {
        let ctrl = [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        let points = sample_spline(&ctrl, 3, None, None, None);
        assert_eq!(points, ctrl);
    }

    #[test]
    fn degenerate_single_point_returns_it() {
        let p = eval_spline(3, &[Point2::new(5.0, 6.0)], &[], &[], 0.5);
        assert_eq!(p, Point2::new(5.0, 6.0));
    }

    #[test]
    fn linear_two_point_spline_interpolates_midpoint() {
        let ctrl = [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
        let knots = [0.0, 0.0, 1.0, 1.0];
        let p = eval_spline(1, &ctrl, &knots, &[], 0.5);
        assert!((p.x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn endpoints_match_first_and_last_control_point() {
        let ctrl = [Point2::new(0.0, 0.0), Point2::new(3.0, 1.0), Point2::new(6.0, 0.0)];
        let knots = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let start = eval_spline(2, &ctrl, &knots, &[], 0.0);
        let end = eval_spline(2, &ctrl, &knots, &[], 1.0);
        assert!((start.x - 0.0).abs() < 1e-9);
        assert!((end.x - 6.0).abs() < 1e-9);
    }
}
