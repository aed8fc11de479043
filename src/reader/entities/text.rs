// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TEXT and MTEXT. MTEXT's body may be split across several group-3
//! continuation lines followed by a final group-1; these are
//! concatenated in file order.

extern crate alloc;
use alloc::string::String;

use crate::error::Result;
use crate::floatfuncs::FloatFuncs;
use crate::model::{EntityCommon, EntityKind, Point2, TextAlignment};

use super::apply_common_group;
use crate::reader::{parse_f64, parse_i32, GroupReader};

pub(super) fn parse(
    reader: &mut GroupReader<'_, '_>,
    common: &mut EntityCommon,
    is_mtext: bool,
) -> Result<EntityKind> {
    let mut position = Point2::ZERO;
    let mut second_position: Option<Point2> = None;
    // MTEXT's 11/21 is a direction vector, not an alignment point; tracked
    // separately so it never leaks into `second_position`.
    let mut mtext_direction: Option<Point2> = None;
    let mut height = 0.0;
    let mut mtext_prefix = String::new();
    let mut value = String::new();
    let mut rotation = 0.0;
    let mut width_factor = 1.0;
    let mut alignment = TextAlignment::default();
    let mut wrap_width: Option<f64> = None;
    let mut style_name = String::from("STANDARD");

    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            1 => {
                value = if is_mtext {
                    let mut combined = mtext_prefix.clone();
                    combined.push_str(&g.value);
                    combined
                } else {
                    g.value
                };
            }
            3 if is_mtext => mtext_prefix.push_str(&g.value),
            10 => position.x = parse_f64(&g)?,
            20 => position.y = parse_f64(&g)?,
            11 => {
                if is_mtext {
                    mtext_direction.get_or_insert(Point2::ZERO).x = parse_f64(&g)?;
                } else {
                    second_position.get_or_insert(Point2::ZERO).x = parse_f64(&g)?;
                }
            }
            21 => {
                if is_mtext {
                    mtext_direction.get_or_insert(Point2::ZERO).y = parse_f64(&g)?;
                } else {
                    second_position.get_or_insert(Point2::ZERO).y = parse_f64(&g)?;
                }
            }
            40 => height = parse_f64(&g)?,
            41 => {
                if is_mtext {
                    wrap_width = Some(parse_f64(&g)?);
                } else {
                    width_factor = parse_f64(&g)?;
                }
            }
            50 => rotation = parse_f64(&g)?,
            7 => style_name = g.value,
            71 => alignment.attachment_point = parse_i32(&g)?,
            72 => alignment.h_align = parse_i32(&g)?,
            73 => alignment.v_align = parse_i32(&g)?,
            _ => {}
        }
    }

    // MTEXT's rotation comes from its direction vector when present and
    // non-zero; group 50 is only the fallback (spec.md §4.5).
    if let Some(dir) = mtext_direction {
        if dir.x != 0.0 || dir.y != 0.0 {
            rotation = FloatFuncs::atan2(dir.y, dir.x).to_degrees();
        }
    }

    Ok(EntityKind::Text {
        position,
        second_position,
        height,
        value,
        rotation,
        width_factor,
        alignment,
        wrap_width,
        style_name,
        is_mtext,
    })
}
