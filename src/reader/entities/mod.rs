// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-entity-kind dispatch, plus the common-group parser shared by every
//! kind (layer, color, line type, visibility, extrusion).

use crate::error::Result;
use crate::model::{Entity, EntityCommon, Point3};
use crate::tokenizer::CodePair;

use super::{parse_f64, parse_i32, GroupReader, ParseState};

mod acad_table;
mod dimension;
mod ellipse;
mod insert;
mod leader_point;
mod line_circle_arc;
mod polyline;
mod ray_xline;
mod solid_face;
mod spline;
mod text;
mod hatch;

/// Applies `g` to `common` if it's one of the group codes every entity
/// shares, returning whether it was consumed.
pub(super) fn apply_common_group(common: &mut EntityCommon, g: &CodePair) -> Result<bool> {
    match g.code {
        5 => common.handle = Some(g.value.clone()),
        8 => common.layer = g.value.clone(),
        6 => common.line_type = g.value.clone(),
        62 => {
            let raw = parse_i32(g)?;
            if raw < 0 {
                common.visible = false;
                common.color = raw.abs();
            } else {
                common.color = raw;
            }
        }
        60 => {
            if parse_i32(g)? != 0 {
                common.visible = false;
            }
        }
        67 => common.paper_space = parse_i32(g)? != 0,
        210 => common.extrusion.x = parse_f64(g)?,
        220 => common.extrusion.y = parse_f64(g)?,
        230 => common.extrusion.z = parse_f64(g)?,
        _ => return Ok(false),
    }
    Ok(true)
}

/// `true` once a full extrusion triple has not been overwritten, i.e. at
/// least kept the default (0, 0, 1); kept here for symmetry with the
/// other modules even though there's nothing to validate.
#[allow(dead_code)]
pub(super) const DEFAULT_EXTRUSION: Point3 = Point3::DEFAULT_EXTRUSION;

pub(crate) fn parse_entities_section(
    reader: &mut GroupReader<'_, '_>,
    drawing: &mut crate::model::Drawing,
    state: &mut ParseState,
) -> Result<()> {
    loop {
        let Some(pair) = reader.next()? else { return Ok(()) };
        if pair.code == 0 && pair.value == "ENDSEC" {
            return Ok(());
        }
        if pair.code != 0 {
            continue;
        }
        if let Some(entity) = dispatch_entity(reader, &pair.value, state)? {
            if entity.common.paper_space {
                continue;
            }
            if let Entity { kind: crate::model::EntityKind::Insert { block_name, .. }, .. } = &entity {
                if !drawing.blocks.contains_key(block_name) {
                    tracing::warn!(block_name = %block_name, "dropping INSERT: unknown block reference");
                    continue;
                }
            }
            drawing.entities.push(entity);
        }
    }
}

pub(super) fn dispatch_entity(
    reader: &mut GroupReader<'_, '_>,
    kind: &str,
    state: &mut ParseState,
) -> Result<Option<Entity>> {
    let mut common = EntityCommon::new(state.alloc_id());
    let entity_kind = match kind {
        "LINE" => line_circle_arc::parse_line(reader, &mut common)?,
        "CIRCLE" => line_circle_arc::parse_circle(reader, &mut common)?,
        "ARC" => line_circle_arc::parse_arc(reader, &mut common)?,
        "LWPOLYLINE" => polyline::parse_lwpolyline(reader, &mut common)?,
        "POLYLINE" => polyline::parse_polyline(reader, &mut common)?,
        "TEXT" | "ATTRIB" | "ATTDEF" => text::parse(reader, &mut common, false)?,
        "MTEXT" => text::parse(reader, &mut common, true)?,
        "INSERT" => insert::parse(reader, &mut common, state)?,
        "ACAD_TABLE" => acad_table::parse(reader, &mut common, state)?,
        "SPLINE" => spline::parse(reader, &mut common)?,
        "ELLIPSE" => ellipse::parse(reader, &mut common)?,
        "SOLID" => solid_face::parse_solid(reader, &mut common)?,
        "TRACE" => solid_face::parse_trace(reader, &mut common)?,
        "3DFACE" => solid_face::parse_face3d(reader, &mut common)?,
        "HATCH" => hatch::parse(reader, &mut common)?,
        "DIMENSION" => dimension::parse(reader, &mut common)?,
        "LEADER" => leader_point::parse_leader(reader, &mut common)?,
        "POINT" => leader_point::parse_point(reader, &mut common)?,
        "RAY" => ray_xline::parse_ray(reader, &mut common)?,
        "XLINE" => ray_xline::parse_xline(reader, &mut common)?,
        _ => {
            reader.skip_to_record_boundary()?;
            return Ok(None);
        }
    };
    Ok(Some(Entity { common, kind: entity_kind }))
}
