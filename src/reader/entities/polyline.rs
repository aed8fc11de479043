// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! LWPOLYLINE (single record, vertices inline) and classic POLYLINE
//! (header record followed by a run of VERTEX records and a SEQEND).

extern crate alloc;
use alloc::vec::Vec;

use crate::error::Result;
use crate::model::{EntityCommon, EntityKind, Point2, PolyVertex};

use super::apply_common_group;
use crate::reader::{parse_f64, parse_i32, GroupReader};

pub(super) fn parse_lwpolyline(
    reader: &mut GroupReader<'_, '_>,
    common: &mut EntityCommon,
) -> Result<EntityKind> {
    let mut vertices: Vec<PolyVertex> = Vec::new();
    let mut closed = false;
    let mut elevation = 0.0;
    let mut current: Option<PolyVertex> = None;

    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            10 => {
                if let Some(v) = current.take() {
                    vertices.push(v);
                }
                current = Some(PolyVertex { point: Point2::new(parse_f64(&g)?, 0.0), bulge: 0.0 });
            }
            20 => {
                if let Some(v) = current.as_mut() {
                    v.point.y = parse_f64(&g)?;
                }
            }
            42 => {
                if let Some(v) = current.as_mut() {
                    v.bulge = parse_f64(&g)?;
                }
            }
            38 => elevation = parse_f64(&g)?,
            70 => closed = parse_i32(&g)? & 1 != 0,
            _ => {}
        }
    }
    if let Some(v) = current.take() {
        vertices.push(v);
    }
    Ok(EntityKind::Polyline { vertices, closed, elevation })
}

pub(super) fn parse_polyline(
    reader: &mut GroupReader<'_, '_>,
    common: &mut EntityCommon,
) -> Result<EntityKind> {
    let mut closed = false;
    let mut elevation = 0.0;
    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            30 => elevation = parse_f64(&g)?,
            70 => closed = parse_i32(&g)? & 1 != 0,
            _ => {}
        }
    }

    let mut vertices: Vec<PolyVertex> = Vec::new();
    loop {
        match reader.next()? {
            None => break,
            Some(p) if p.code == 0 && p.value == "VERTEX" => {
                let mut v = PolyVertex::default();
                while !reader.at_record_boundary()? {
                    let g = reader.next()?.expect("checked above");
                    match g.code {
                        10 => v.point.x = parse_f64(&g)?,
                        20 => v.point.y = parse_f64(&g)?,
                        42 => v.bulge = parse_f64(&g)?,
                        _ => {}
                    }
                }
                vertices.push(v);
            }
            Some(p) if p.code == 0 && p.value == "SEQEND" => {
                while !reader.at_record_boundary()? {
                    reader.next()?;
                }
                break;
            }
            Some(_) => break,
        }
    }
    Ok(EntityKind::Polyline { vertices, closed, elevation })
}
