// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ELLIPSE: center, major-axis endpoint relative to center, minor/major
//! ratio, and the start/end parameter (radians) of the swept arc.

use crate::error::Result;
use crate::model::{EntityCommon, EntityKind, Point2};

use super::apply_common_group;
use crate::reader::{parse_f64, GroupReader};

pub(super) fn parse(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let mut center = Point2::ZERO;
    let mut major_axis = Point2::ZERO;
    let mut ratio = 1.0;
    let mut start_param = 0.0;
    let mut end_param = core::f64::consts::TAU;

    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            10 => center.x = parse_f64(&g)?,
            20 => center.y = parse_f64(&g)?,
            11 => major_axis.x = parse_f64(&g)?,
            21 => major_axis.y = parse_f64(&g)?,
            40 => ratio = parse_f64(&g)?,
            41 => start_param = parse_f64(&g)?,
            42 => end_param = parse_f64(&g)?,
            _ => {}
        }
    }

    Ok(EntityKind::Ellipse { center, major_axis, ratio, start_param, end_param })
}
