// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! LINE, CIRCLE and ARC. All three are planar entities defined in OCS at
//! some elevation; per §4.5 each is projected into WCS right after
//! parsing, using the entity's own extrusion direction.

use crate::error::Result;
use crate::geometry::ocs::project_to_world_xy;
use crate::model::{EntityCommon, EntityKind, Point2};

use super::apply_common_group;
use crate::reader::{parse_f64, GroupReader};

pub(super) fn parse_line(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let mut start = Point2::ZERO;
    let mut start_z = 0.0;
    let mut end = Point2::ZERO;
    let mut end_z = 0.0;
    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            10 => start.x = parse_f64(&g)?,
            20 => start.y = parse_f64(&g)?,
            30 => start_z = parse_f64(&g)?,
            11 => end.x = parse_f64(&g)?,
            21 => end.y = parse_f64(&g)?,
            31 => end_z = parse_f64(&g)?,
            _ => {}
        }
    }
    Ok(EntityKind::Line {
        start: project_to_world_xy(common.extrusion, start, start_z),
        end: project_to_world_xy(common.extrusion, end, end_z),
    })
}

pub(super) fn parse_circle(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let mut center = Point2::ZERO;
    let mut elevation = 0.0;
    let mut radius = 0.0;
    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            10 => center.x = parse_f64(&g)?,
            20 => center.y = parse_f64(&g)?,
            30 => elevation = parse_f64(&g)?,
            40 => radius = parse_f64(&g)?,
            _ => {}
        }
    }
    Ok(EntityKind::Circle { center: project_to_world_xy(common.extrusion, center, elevation), radius })
}

/// `start_angle`/`end_angle` are kept in degrees, matching the raw DXF
/// groups 50/51; callers convert at the point of use. The angles
/// themselves are OCS-relative and stay that way (the Arbitrary Axis
/// Algorithm only ever remaps the center, not the sweep), matching how
/// every downstream consumer (extents, hit-test) treats ARC today.
pub(super) fn parse_arc(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let mut center = Point2::ZERO;
    let mut elevation = 0.0;
    let mut radius = 0.0;
    let mut start_angle = 0.0;
    let mut end_angle = 0.0;
    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            10 => center.x = parse_f64(&g)?,
            20 => center.y = parse_f64(&g)?,
            30 => elevation = parse_f64(&g)?,
            40 => radius = parse_f64(&g)?,
            50 => start_angle = parse_f64(&g)?,
            51 => end_angle = parse_f64(&g)?,
            _ => {}
        }
    }
    Ok(EntityKind::Arc {
        center: project_to_world_xy(common.extrusion, center, elevation),
        radius,
        start_angle,
        end_angle,
    })
}
