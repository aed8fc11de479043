// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Arbitrary Axis Algorithm: derives an Object Coordinate System
//! basis from an entity's extrusion direction, and maps OCS coordinates
//! back into the world XY plane.

use crate::floatfuncs::FloatFuncs;
use crate::model::{Point2, Point3};

/// World-space basis vectors of an entity's OCS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OcsBasis {
    ax: Point3,
    ay: Point3,
    az: Point3,
}

const WORLD_THRESHOLD: f64 = 1.0 / 64.0;

fn cross(a: Point3, b: Point3) -> Point3 {
    Point3::new(a.y * b.z - a.z * b.y, a.z * b.x - a.x * b.z, a.x * b.y - a.y * b.x)
}

fn normalize(v: Point3) -> Point3 {
    let len = (v.x * v.x + v.y * v.y + v.z * v.z).sqrt();
    if len == 0.0 {
        return v;
    }
    Point3::new(v.x / len, v.y / len, v.z / len)
}

/// Computes the OCS basis for an extrusion direction per the Arbitrary
/// Axis Algorithm.
pub(crate) fn arbitrary_axis(extrusion: Point3) -> OcsBasis {
    let az = normalize(extrusion);
    let world_y = Point3::new(0.0, 1.0, 0.0);
    let world_z = Point3::new(0.0, 0.0, 1.0);
    let seed = if az.x.abs() < WORLD_THRESHOLD && az.y.abs() < WORLD_THRESHOLD {
        cross(world_y, az)
    } else {
        cross(world_z, az)
    };
    let ax = normalize(seed);
    let ay = normalize(cross(az, ax));
    OcsBasis { ax, ay, az }
}

/// Maps an OCS coordinate `(x, y, z)` into world space.
pub(crate) fn ocs_to_wcs(basis: &OcsBasis, x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(
        basis.ax.x * x + basis.ay.x * y + basis.az.x * z,
        basis.ax.y * x + basis.ay.y * y + basis.az.y * z,
        basis.ax.z * x + basis.ay.z * y + basis.az.z * z,
    )
}

/// Projects an OCS-plane point plus elevation into world XY, dropping the
/// resulting world Z (the crate is a 2D query/render kernel). Entities
/// with the default `(0, 0, 1)` extrusion skip the basis computation
/// entirely since it's the identity in that case.
pub(crate) fn project_to_world_xy(extrusion: Point3, p: Point2, elevation: f64) -> Point2 {
    if extrusion == Point3::DEFAULT_EXTRUSION {
        return p;
    }
    let basis = arbitrary_axis(extrusion);
    let world = ocs_to_wcs(&basis, p.x, p.y, elevation);
    Point2::new(world.x, world.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_extrusion_is_identity() {
        let p = project_to_world_xy(Point3::DEFAULT_EXTRUSION, Point2::new(3.0, 4.0), 0.0);
        assert_eq!(p, Point2::new(3.0, 4.0));
    }

    #[test]
    fn reversed_extrusion_flips_x() {
        // Facing -Z, the Arbitrary Axis Algorithm picks Ax = (-1, 0, 0).
        let p = project_to_world_xy(Point3::new(0.0, 0.0, -1.0), Point2::new(1.0, 2.0), 0.0);
        assert!((p.x + 1.0).abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
    }
}
