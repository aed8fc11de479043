// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! INSERT, including its optional trailing run of ATTRIB records.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::Result;
use crate::model::{Attribute, EntityCommon, EntityKind, Point2};

use super::apply_common_group;
use crate::reader::{parse_f64, parse_i32, GroupReader, ParseState};

pub(super) fn parse(
    reader: &mut GroupReader<'_, '_>,
    common: &mut EntityCommon,
    state: &mut ParseState,
) -> Result<EntityKind> {
    let mut block_name = String::new();
    let mut position = Point2::ZERO;
    let mut x_scale = 1.0;
    let mut y_scale = 1.0;
    let mut rotation = 0.0;
    let mut row_count: u32 = 1;
    let mut col_count: u32 = 1;
    let mut row_spacing = 0.0;
    let mut col_spacing = 0.0;
    let mut has_attribs = false;

    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            2 => block_name = g.value,
            10 => position.x = parse_f64(&g)?,
            20 => position.y = parse_f64(&g)?,
            41 => x_scale = parse_f64(&g)?,
            42 => y_scale = parse_f64(&g)?,
            50 => rotation = parse_f64(&g)?,
            70 => col_count = parse_i32(&g)?.max(1) as u32,
            71 => row_count = parse_i32(&g)?.max(1) as u32,
            44 => col_spacing = parse_f64(&g)?,
            45 => row_spacing = parse_f64(&g)?,
            66 => has_attribs = parse_i32(&g)? != 0,
            _ => {}
        }
    }

    let mut attributes: Vec<Attribute> = Vec::new();
    if has_attribs {
        loop {
            match reader.next()? {
                None => break,
                Some(p) if p.code == 0 && p.value == "ATTRIB" => {
                    attributes.push(parse_attrib(reader, state)?);
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
    }

    Ok(EntityKind::Insert {
        block_name,
        position,
        x_scale,
        y_scale,
        rotation,
        row_count,
        col_count,
        row_spacing,
        col_spacing,
        attributes,
    })
}

fn parse_attrib(reader: &mut GroupReader<'_, '_>, state: &mut ParseState) -> Result<Attribute> {
    let mut common = EntityCommon::new(state.alloc_id());
    let mut tag = String::new();
    let mut value = String::new();
    let mut position = Point2::ZERO;
    let mut height = 0.0;
    let mut rotation = 0.0;

    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(&mut common, &g)? {
            continue;
        }
        match g.code {
            1 => value = g.value,
            2 => tag = g.value,
            10 => position.x = parse_f64(&g)?,
            20 => position.y = parse_f64(&g)?,
            40 => height = parse_f64(&g)?,
            50 => rotation = parse_f64(&g)?,
            _ => {}
        }
    }

    Ok(Attribute { common, tag, value, position, height, rotation })
}
