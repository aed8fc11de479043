// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HATCH: pattern metadata plus one or more boundary loops, each either a
//! polyline (straight segments with optional bulge) or a list of
//! line/arc/ellipse/spline edges.

extern crate alloc;
use alloc::vec::Vec;
use alloc::string::String;

use crate::error::Result;
use crate::model::{EntityCommon, EntityKind, HatchEdge, HatchLoop, Point2, PolyVertex};

use super::apply_common_group;
use crate::reader::{parse_f64, parse_i32, GroupReader};

pub(super) fn parse(reader: &mut GroupReader<'_, '_>, common: &mut EntityCommon) -> Result<EntityKind> {
    let mut pattern_name = String::new();
    let mut solid = false;
    let mut scale = 1.0;
    let mut angle = 0.0;
    let mut elevation = 0.0;
    let mut loops: Vec<HatchLoop> = Vec::new();

    while !reader.at_record_boundary()? {
        let Some(peeked) = reader.peek()?.cloned() else { break };
        if peeked.code == 92 {
            reader.next()?;
            let type_flag = parse_i32(&peeked)?;
            loops.push(if type_flag & 2 != 0 {
                parse_polyline_loop(reader)?
            } else {
                parse_edge_loop(reader)?
            });
            continue;
        }
        let g = reader.next()?.expect("peeked above");
        if apply_common_group(common, &g)? {
            continue;
        }
        match g.code {
            2 => pattern_name = g.value,
            70 => solid = parse_i32(&g)? != 0,
            41 => scale = parse_f64(&g)?,
            52 => angle = parse_f64(&g)?,
            30 => elevation = parse_f64(&g)?,
            _ => {}
        }
    }

    Ok(EntityKind::Hatch { pattern_name, solid, loops, scale, angle, elevation })
}

fn parse_polyline_loop(reader: &mut GroupReader<'_, '_>) -> Result<HatchLoop> {
    let mut num_vertices = 0i32;
    loop {
        let Some(p) = reader.peek()?.cloned() else { return Ok(HatchLoop::Polyline(Vec::new())) };
        match p.code {
            72 | 73 => {
                reader.next()?;
            }
            93 => {
                let g = reader.next()?.expect("peeked above");
                num_vertices = parse_i32(&g)?;
                break;
            }
            _ => break,
        }
    }

    let mut vertices = Vec::with_capacity(num_vertices.max(0) as usize);
    for _ in 0..num_vertices.max(0) {
        let Some(p) = reader.peek()?.cloned() else { break };
        if p.code != 10 {
            break;
        }
        let gx = reader.next()?.expect("peeked above");
        let mut v = PolyVertex { point: Point2::new(parse_f64(&gx)?, 0.0), bulge: 0.0 };
        if let Some(p2) = reader.peek()?.cloned() {
            if p2.code == 20 {
                let g = reader.next()?.expect("peeked above");
                v.point.y = parse_f64(&g)?;
            }
        }
        if let Some(p3) = reader.peek()?.cloned() {
            if p3.code == 42 {
                let g = reader.next()?.expect("peeked above");
                v.bulge = parse_f64(&g)?;
            }
        }
        vertices.push(v);
    }
    Ok(HatchLoop::Polyline(vertices))
}

fn parse_edge_loop(reader: &mut GroupReader<'_, '_>) -> Result<HatchLoop> {
    let mut num_edges = 0i32;
    if let Some(p) = reader.peek()?.cloned() {
        if p.code == 93 {
            let g = reader.next()?.expect("peeked above");
            num_edges = parse_i32(&g)?;
        }
    }

    let mut edges = Vec::with_capacity(num_edges.max(0) as usize);
    for _ in 0..num_edges.max(0) {
        let Some(p) = reader.peek()?.cloned() else { break };
        if p.code != 72 {
            break;
        }
        let type_g = reader.next()?.expect("peeked above");
        edges.push(parse_one_edge(reader, parse_i32(&type_g)?)?);
    }
    Ok(HatchLoop::Edges(edges))
}

/// Consumes consecutive groups whose code is in `codes`, pairing each
/// with its parsed value; used because HATCH edge fields always appear
/// contiguously and are bounded by the next `72` (next edge) or a
/// non-matching code (end of loop).
fn collect_fields(reader: &mut GroupReader<'_, '_>, codes: &[i32]) -> Result<Vec<(i32, f64)>> {
    let mut out = Vec::new();
    loop {
        let Some(p) = reader.peek()?.cloned() else { break };
        if !codes.contains(&p.code) {
            break;
        }
        let g = reader.next()?.expect("peeked above");
        out.push((g.code, parse_f64(&g)?));
    }
    Ok(out)
}

fn parse_one_edge(reader: &mut GroupReader<'_, '_>, edge_type: i32) -> Result<HatchEdge> {
    match edge_type {
        1 => {
            let mut start = Point2::ZERO;
            let mut end = Point2::ZERO;
            for (code, v) in collect_fields(reader, &[10, 20, 11, 21])? {
                match code {
                    10 => start.x = v,
                    20 => start.y = v,
                    11 => end.x = v,
                    21 => end.y = v,
                    _ => {}
                }
            }
            Ok(HatchEdge::Line { start, end })
        }
        2 => {
            let mut center = Point2::ZERO;
            let mut radius = 0.0;
            let mut start_angle = 0.0;
            let mut end_angle = 0.0;
            let mut ccw = true;
            for (code, v) in collect_fields(reader, &[10, 20, 40, 50, 51, 73])? {
                match code {
                    10 => center.x = v,
                    20 => center.y = v,
                    40 => radius = v,
                    50 => start_angle = v,
                    51 => end_angle = v,
                    73 => ccw = v != 0.0,
                    _ => {}
                }
            }
            Ok(HatchEdge::Arc { center, radius, start_angle, end_angle, ccw })
        }
        3 => {
            let mut center = Point2::ZERO;
            let mut major_axis = Point2::ZERO;
            let mut ratio = 1.0;
            let mut start_param = 0.0;
            let mut end_param = core::f64::consts::TAU;
            for (code, v) in collect_fields(reader, &[10, 20, 11, 21, 40, 50, 51])? {
                match code {
                    10 => center.x = v,
                    20 => center.y = v,
                    11 => major_axis.x = v,
                    21 => major_axis.y = v,
                    40 => ratio = v,
                    50 => start_param = v,
                    51 => end_param = v,
                    _ => {}
                }
            }
            Ok(HatchEdge::Ellipse { center, major_axis, ratio, start_param, end_param })
        }
        4 => {
            let mut degree = 3usize;
            let mut knots = Vec::new();
            let mut control_points: Vec<Point2> = Vec::new();
            let mut control_current: Option<Point2> = None;
            for (code, v) in collect_fields(
                reader,
                &[94, 73, 74, 95, 96, 97, 40, 10, 20, 11, 21, 42, 12, 22, 13, 23],
            )? {
                match code {
                    94 => degree = (v as i64).max(0) as usize,
                    10 => {
                        if let Some(p) = control_current.take() {
                            control_points.push(p);
                        }
                        control_current = Some(Point2::new(v, 0.0));
                    }
                    20 => {
                        if let Some(p) = control_current.as_mut() {
                            p.y = v;
                        }
                    }
                    40 => knots.push(v),
                    _ => {}
                }
            }
            if let Some(p) = control_current.take() {
                control_points.push(p);
            }
            Ok(HatchEdge::Spline { control_points, degree, knots })
        }
        _ => {
            // Unrecognized edge type: drain the plausible field codes so
            // parsing can resume at the next edge or loop boundary.
            let _ = collect_fields(
                reader,
                &[10, 20, 11, 21, 12, 22, 13, 23, 40, 41, 42, 50, 51, 73, 74, 94, 95, 96, 97],
            )?;
            Ok(HatchEdge::Line { start: Point2::ZERO, end: Point2::ZERO })
        }
    }
}
