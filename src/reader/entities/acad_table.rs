// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ACAD_TABLE: a table object normalized to a plain INSERT. Its block
//! content is referenced by a group 342 soft-pointer handle rather than
//! a group 2 name, resolved against the handle table `ParseState`
//! built while parsing BLOCKS (spec.md §4.5).

extern crate alloc;
use alloc::string::String;

use crate::error::Result;
use crate::floatfuncs::FloatFuncs;
use crate::model::{EntityCommon, EntityKind, Point2};

use super::apply_common_group;
use crate::reader::{parse_f64, GroupReader, ParseState};

pub(super) fn parse(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon, state: &ParseState) -> Result<EntityKind> {
    let mut position = Point2::ZERO;
    let mut direction = Point2::new(1.0, 0.0);
    let mut owner_handle = String::new();

    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            10 => position.x = parse_f64(&g)?,
            20 => position.y = parse_f64(&g)?,
            11 => direction.x = parse_f64(&g)?,
            21 => direction.y = parse_f64(&g)?,
            342 => owner_handle = g.value,
            _ => {}
        }
    }

    let block_name = state.resolve_block_handle(&owner_handle).cloned().unwrap_or_default();
    let rotation = FloatFuncs::atan2(direction.y, direction.x).to_degrees();

    Ok(EntityKind::Insert {
        block_name,
        position,
        x_scale: 1.0,
        y_scale: 1.0,
        rotation,
        row_count: 1,
        col_count: 1,
        row_spacing: 0.0,
        col_spacing: 0.0,
        attributes: alloc::vec::Vec::new(),
    })
}
