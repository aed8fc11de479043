// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DIMENSION. Only the subset of groups the query/render layer actually
//! consumes is kept; the many dimension-type-specific extension points
//! (13/14/15/16 etc.) are not modeled.

extern crate alloc;
use alloc::string::String;

use crate::error::Result;
use crate::model::{EntityCommon, EntityKind, Point2};

use super::apply_common_group;
use crate::reader::{parse_f64, parse_i32, GroupReader};

pub(super) fn parse(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let mut block_name = String::new();
    let mut definition_point = Point2::ZERO;
    let mut text_midpoint = Point2::ZERO;
    let mut dimension_type = 0;
    let mut measurement = 0.0;
    let mut override_text: Option<String> = None;
    let mut style_name = String::new();

    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            2 => block_name = g.value,
            10 => definition_point.x = parse_f64(&g)?,
            20 => definition_point.y = parse_f64(&g)?,
            11 => text_midpoint.x = parse_f64(&g)?,
            21 => text_midpoint.y = parse_f64(&g)?,
            70 => dimension_type = parse_i32(&g)?,
            1 => {
                override_text = if g.value.is_empty() || g.value == "<>" { None } else { Some(g.value) };
            }
            3 => style_name = g.value,
            42 => measurement = parse_f64(&g)?,
            _ => {}
        }
    }

    Ok(EntityKind::Dimension {
        block_name,
        definition_point,
        text_midpoint,
        dimension_type,
        measurement,
        override_text,
        style_name,
    })
}
