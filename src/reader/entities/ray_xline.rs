// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RAY and XLINE: a base point plus a direction vector, semi-infinite
//! and fully-infinite respectively. Neither contributes to extents;
//! both hit-test against the extended line (spec.md §4.10).

use crate::error::Result;
use crate::model::{EntityCommon, EntityKind, Point2};

use super::apply_common_group;
use crate::reader::{parse_f64, GroupReader};

fn parse_common(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<(Point2, Point2)> {
    let mut origin = Point2::ZERO;
    let mut direction = Point2::new(1.0, 0.0);
    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            10 => origin.x = parse_f64(&g)?,
            20 => origin.y = parse_f64(&g)?,
            11 => direction.x = parse_f64(&g)?,
            21 => direction.y = parse_f64(&g)?,
            _ => {}
        }
    }
    Ok((origin, direction))
}

pub(super) fn parse_ray(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let (origin, direction) = parse_common(reader, common)?;
    Ok(EntityKind::Ray { origin, direction, bounded: true })
}

pub(super) fn parse_xline(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let (origin, direction) = parse_common(reader, common)?;
    Ok(EntityKind::Ray { origin, direction, bounded: false })
}
