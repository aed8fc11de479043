// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composable 2-D affine transforms for INSERT recursion.
//!
//! Per the design note in §9, the transform is threaded down the
//! recursion as an explicit argument rather than mutating a shared
//! context matrix: cheaper, and trivially `Send`/`Sync` if a caller ever
//! wants to evaluate extents and hit-tests from more than one thread.

use crate::floatfuncs::FloatFuncs;
use crate::model::Point2;

/// A 2x3 affine matrix: `x' = m11*x + m12*y + tx`, `y' = m21*x + m22*y + ty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Transform2 {
    m11: f64,
    m12: f64,
    m21: f64,
    m22: f64,
    tx: f64,
    ty: f64,
}

impl Transform2 {
    pub(crate) const IDENTITY: Self =
        Self { m11: 1.0, m12: 0.0, m21: 0.0, m22: 1.0, tx: 0.0, ty: 0.0 };

    pub(crate) fn translate(t: Point2) -> Self {
        Self { tx: t.x, ty: t.y, ..Self::IDENTITY }
    }

    pub(crate) fn scale(sx: f64, sy: f64) -> Self {
        Self { m11: sx, m22: sy, ..Self::IDENTITY }
    }

    pub(crate) fn rotate_degrees(degrees: f64) -> Self {
        let radians = degrees * core::f64::consts::PI / 180.0;
        let (sin, cos) = FloatFuncs::sin_cos(radians);
        Self { m11: cos, m12: -sin, m21: sin, m22: cos, tx: 0.0, ty: 0.0 }
    }

    /// Returns the transform that applies `inner` first, then `self`:
    /// `(self.compose(inner))(p) == self.apply(inner.apply(p))`.
    pub(crate) fn compose(&self, inner: &Self) -> Self {
        Self {
            m11: self.m11 * inner.m11 + self.m12 * inner.m21,
            m12: self.m11 * inner.m12 + self.m12 * inner.m22,
            m21: self.m21 * inner.m11 + self.m22 * inner.m21,
            m22: self.m21 * inner.m12 + self.m22 * inner.m22,
            tx: self.m11 * inner.tx + self.m12 * inner.ty + self.tx,
            ty: self.m21 * inner.tx + self.m22 * inner.ty + self.ty,
        }
    }

    pub(crate) fn apply(&self, p: Point2) -> Point2 {
        Point2::new(self.m11 * p.x + self.m12 * p.y + self.tx, self.m21 * p.x + self.m22 * p.y + self.ty)
    }

    /// Applies the linear part only, dropping translation; used to map
    /// distances/radii that must stay exact under uniform scale (callers
    /// check for non-uniform scale themselves where it matters).
    pub(crate) fn apply_vector(&self, p: Point2) -> Point2 {
        Point2::new(self.m11 * p.x + self.m12 * p.y, self.m21 * p.x + self.m22 * p.y)
    }

    /// Geometric mean of the two axis scale factors, used to scale
    /// tolerances and radii under non-uniform INSERT scale.
    pub(crate) fn approx_uniform_scale(&self) -> f64 {
        let sx = (self.m11 * self.m11 + self.m21 * self.m21).sqrt();
        let sy = (self.m12 * self.m12 + self.m22 * self.m22).sqrt();
        (sx * sy).sqrt()
    }

    /// Inverts the transform, or `None` for a singular one (e.g. a
    /// zero-scale INSERT). Used by hit-testing to map a world-space query
    /// point back into an entity's own local frame rather than mapping
    /// every curve's geometry forward, which would otherwise distort
    /// angle-sensitive tests (arcs, bulges, ellipse parameters) under
    /// rotation.
    pub(crate) fn invert(&self) -> Option<Self> {
        let det = self.m11 * self.m22 - self.m12 * self.m21;
        if det.abs() < f64::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let im11 = self.m22 * inv_det;
        let im12 = -self.m12 * inv_det;
        let im21 = -self.m21 * inv_det;
        let im22 = self.m11 * inv_det;
        let itx = -(im11 * self.tx + im12 * self.ty);
        let ity = -(im21 * self.tx + im22 * self.ty);
        Some(Self { m11: im11, m12: im12, m21: im21, m22: im22, tx: itx, ty: ity })
    }
}

/// Builds the per-instance transform for one INSERT array copy: `T(position)
/// . R(rotation) . S(x_scale, y_scale) . T(col*col_spacing, row*row_spacing)
/// . T(-base_point)`, per §4.6. Row/column offsets are applied in the
/// block's local frame, before rotation and scale, matching how AutoCAD
/// lays out a rectangular INSERT array.
pub(crate) fn insert_instance_transform(
    position: Point2,
    rotation_degrees: f64,
    x_scale: f64,
    y_scale: f64,
    base_point: Point2,
    row: u32,
    col: u32,
    row_spacing: f64,
    col_spacing: f64,
) -> Transform2 {
    let to_origin = Transform2::translate(Point2::new(-base_point.x, -base_point.y));
    let array_offset =
        Transform2::translate(Point2::new(f64::from(col) * col_spacing, f64::from(row) * row_spacing));
    let scale = Transform2::scale(x_scale, y_scale);
    let rotate = Transform2::rotate_degrees(rotation_degrees);
    let place = Transform2::translate(position);

    place.compose(&rotate).compose(&scale).compose(&array_offset).compose(&to_origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_a_no_op() {
        let p = Point2::new(3.0, 4.0);
        assert_eq!(Transform2::IDENTITY.apply(p), p);
    }

    #[test]
    fn translate_then_scale_composes_left_to_right() {
        let t = Transform2::translate(Point2::new(10.0, 10.0));
        let s = Transform2::scale(2.0, 2.0);
        // apply s first (scale), then translate.
        let composed = t.compose(&s);
        assert_eq!(composed.apply(Point2::new(1.0, 1.0)), Point2::new(12.0, 12.0));
    }

    #[test]
    fn rotate_90_maps_x_axis_to_y_axis() {
        let r = Transform2::rotate_degrees(90.0);
        let p = r.apply(Point2::new(1.0, 0.0));
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn invert_round_trips_a_composed_transform() {
        let t = insert_instance_transform(Point2::new(10.0, -4.0), 37.0, 2.0, 0.5, Point2::new(1.0, 1.0), 0, 0, 0.0, 0.0);
        let inv = t.invert().unwrap();
        let p = Point2::new(3.0, -7.0);
        let round_tripped = inv.apply(t.apply(p));
        assert!((round_tripped.x - p.x).abs() < 1e-9);
        assert!((round_tripped.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn zero_scale_is_not_invertible() {
        assert!(Transform2::scale(0.0, 1.0).invert().is_none());
    }

    #[test]
    fn insert_transform_places_block_origin_at_position() {
        let t = insert_instance_transform(
            Point2::new(10.0, 10.0),
            90.0,
            2.0,
            2.0,
            Point2::ZERO,
            0,
            0,
            0.0,
            0.0,
        );
        let mapped = t.apply(Point2::new(1.0, 0.0));
        // scale 2, rotate 90: (1,0) -> (2,0) -> (0,2) -> + (10,10) = (10,12)
        assert!((mapped.x - 10.0).abs() < 1e-9);
        assert!((mapped.y - 12.0).abs() < 1e-9);
    }
}
