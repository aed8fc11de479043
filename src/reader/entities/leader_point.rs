// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! LEADER and POINT.

extern crate alloc;
use alloc::vec::Vec;

use crate::error::Result;
use crate::model::{EntityCommon, EntityKind, Point2};

use super::apply_common_group;
use crate::reader::{parse_f64, parse_i32, GroupReader};

pub(super) fn parse_leader(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let mut vertices: Vec<Point2> = Vec::new();
    let mut has_arrowhead = true;
    let mut path_type = 0;
    let mut has_hookline = false;
    let mut current: Option<Point2> = None;

    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            10 => {
                if let Some(p) = current.take() {
                    vertices.push(p);
                }
                current = Some(Point2::new(parse_f64(&g)?, 0.0));
            }
            20 => {
                if let Some(p) = current.as_mut() {
                    p.y = parse_f64(&g)?;
                }
            }
            72 => has_arrowhead = parse_i32(&g)? != 0,
            73 => path_type = parse_i32(&g)?,
            75 => has_hookline = parse_i32(&g)? != 0,
            _ => {}
        }
    }
    if let Some(p) = current.take() {
        vertices.push(p);
    }

    Ok(EntityKind::Leader { vertices, has_arrowhead, path_type, has_hookline })
}

pub(super) fn parse_point(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let mut position = Point2::ZERO;
    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            10 => position.x = parse_f64(&g)?,
            20 => position.y = parse_f64(&g)?,
            _ => {}
        }
    }
    Ok(EntityKind::Point { position })
}
