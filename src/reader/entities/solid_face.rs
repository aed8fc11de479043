// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SOLID, TRACE, and 3DFACE: all three are plain quadrilaterals given by
//! four corner points, the fourth defaulting to the third when absent
//! (the common triangle case).

use crate::error::Result;
use crate::model::{EntityCommon, EntityKind, Point2};

use super::apply_common_group;
use crate::reader::{parse_f64, parse_i32, GroupReader};

fn parse_corners(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<([Point2; 4], i32, bool)> {
    let mut points = [Point2::ZERO; 4];
    let mut edge_visibility = 0;
    let mut saw_fourth = false;
    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            10 => points[0].x = parse_f64(&g)?,
            20 => points[0].y = parse_f64(&g)?,
            11 => points[1].x = parse_f64(&g)?,
            21 => points[1].y = parse_f64(&g)?,
            12 => points[2].x = parse_f64(&g)?,
            22 => points[2].y = parse_f64(&g)?,
            13 => {
                points[3].x = parse_f64(&g)?;
                saw_fourth = true;
            }
            23 => points[3].y = parse_f64(&g)?,
            70 => edge_visibility = parse_i32(&g)?,
            _ => {}
        }
    }
    if !saw_fourth {
        points[3] = points[2];
    }
    Ok((points, edge_visibility, saw_fourth))
}

/// SOLID/TRACE store their third and fourth points in diagonal (not
/// boundary) order; reorder to `(p0, p1, p3, p2)` so consumers that walk
/// `points[i] .. points[i + 1]` as a polygon perimeter see a simple
/// quadrilateral rather than a bowtie.
fn reorder_to_boundary(points: [Point2; 4]) -> [Point2; 4] {
    [points[0], points[1], points[3], points[2]]
}

pub(super) fn parse_solid(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let (points, _, _) = parse_corners(reader, common)?;
    Ok(EntityKind::Solid { points: reorder_to_boundary(points) })
}

/// TRACE shares SOLID's group codes and corner layout exactly.
pub(super) fn parse_trace(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    parse_solid(reader, common)
}

pub(super) fn parse_face3d(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let (points, edge_visibility, _) = parse_corners(reader, common)?;
    Ok(EntityKind::Face3d { points, edge_visibility: (edge_visibility & 0x0f) as u8 })
}
