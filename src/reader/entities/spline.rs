// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SPLINE: control points, optional per-point weights (rational splines),
//! knot vector, and optional fit points.

extern crate alloc;
use alloc::vec::Vec;

use crate::error::Result;
use crate::model::{EntityCommon, EntityKind, Point2};

use super::apply_common_group;
use crate::reader::{parse_f64, parse_i32, GroupReader};

pub(super) fn parse(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let mut control_points: Vec<Point2> = Vec::new();
    let mut fit_points: Vec<Point2> = Vec::new();
    let mut knots: Vec<f64> = Vec::new();
    let mut weights: Vec<f64> = Vec::new();
    let mut degree: usize = 3;
    let mut closed = false;
    let mut control_current: Option<Point2> = None;
    let mut fit_current: Option<Point2> = None;

    while !reader.at_record_boundary()? {
        let g = reader.next()?.expect("checked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            10 => {
                if let Some(p) = control_current.take() {
                    control_points.push(p);
                }
                control_current = Some(Point2::new(parse_f64(&g)?, 0.0));
            }
            20 => {
                if let Some(p) = control_current.as_mut() {
                    p.y = parse_f64(&g)?;
                }
            }
            11 => {
                if let Some(p) = fit_current.take() {
                    fit_points.push(p);
                }
                fit_current = Some(Point2::new(parse_f64(&g)?, 0.0));
            }
            21 => {
                if let Some(p) = fit_current.as_mut() {
                    p.y = parse_f64(&g)?;
                }
            }
            40 => knots.push(parse_f64(&g)?),
            41 => weights.push(parse_f64(&g)?),
            70 => closed = parse_i32(&g)? & 1 != 0,
            71 => degree = parse_i32(&g)?.max(0) as usize,
            _ => {}
        }
    }
    if let Some(p) = control_current.take() {
        control_points.push(p);
    }
    if let Some(p) = fit_current.take() {
        fit_points.push(p);
    }

    Ok(EntityKind::Spline { control_points, fit_points, degree, knots, weights, closed })
}
