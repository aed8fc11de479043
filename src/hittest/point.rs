// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `hitPoint`: the identifier of the topmost entity whose geometry
//! passes within tolerance of a query point.

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::extents::{effective_layer, layer_visible, MAX_DEPTH};
use crate::floatfuncs::FloatFuncs;
use crate::geometry::bulge::bulge_to_arc;
use crate::geometry::insert_transform::{insert_instance_transform, Transform2};
use crate::geometry::spline::sample_spline;
use crate::model::{Block, Drawing, Entity, EntityId, EntityKind, Layer, Point2, PolyVertex};

use super::{angle_in_sweep, point_line_distance, point_segment_distance};

/// Chord count used to approximate a SPLINE for hit-testing, per §4.10.
const SPLINE_HIT_TEST_SEGMENTS: usize = 20;

/// Rough average glyph width as a fraction of text height, used by the
/// TEXT-family bounding-box heuristic.
const CHAR_WIDTH_RATIO: f64 = 0.6;

fn dist(a: Point2, b: Point2) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Returns the identifier of the topmost entity whose geometry passes
/// within `tolerance` (world units) of `(x, y)`, or `None`.
///
/// Entities are tested in reverse insertion order so later-painted
/// entities win ties, except DIMENSIONs, which are tested first as a
/// group (§4.10) so a hit anywhere in the referenced anonymous block
/// reads back as one composite object rather than its constituent
/// LINE/ARC/TEXT primitives.
#[must_use]
pub fn hit_point(x: f64, y: f64, tolerance: f64, drawing: &Drawing) -> Option<EntityId> {
    let query = Point2::new(x, y);

    for entity in drawing.entities.iter().rev() {
        if !matches!(entity.kind, EntityKind::Dimension { .. }) {
            continue;
        }
        if let Some(id) =
            test_entity(entity, &drawing.blocks, &drawing.layers, "0", Transform2::IDENTITY, 0, query, tolerance)
        {
            return Some(id);
        }
    }

    for entity in drawing.entities.iter().rev() {
        if matches!(entity.kind, EntityKind::Dimension { .. }) {
            continue;
        }
        if let Some(id) =
            test_entity(entity, &drawing.blocks, &drawing.layers, "0", Transform2::IDENTITY, 0, query, tolerance)
        {
            return Some(id);
        }
    }
    None
}

fn test_entity(
    entity: &Entity,
    blocks: &BTreeMap<String, Block>,
    layers: &BTreeMap<String, Layer>,
    parent_layer: &str,
    transform: Transform2,
    depth: u32,
    query: Point2,
    tolerance: f64,
) -> Option<EntityId> {
    if !entity.common.visible {
        return None;
    }
    let layer = effective_layer(&entity.common.layer, parent_layer);
    if !layer_visible(layers, layer) {
        return None;
    }

    match &entity.kind {
        EntityKind::Insert {
            block_name,
            position,
            x_scale,
            y_scale,
            rotation,
            row_count,
            col_count,
            row_spacing,
            col_spacing,
            ..
        } => {
            if depth + 1 > MAX_DEPTH {
                return None;
            }
            let block = blocks.get(block_name)?;
            for row in 0..*row_count {
                for col in 0..*col_count {
                    let instance = insert_instance_transform(
                        *position,
                        *rotation,
                        *x_scale,
                        *y_scale,
                        block.base_point,
                        row,
                        col,
                        *row_spacing,
                        *col_spacing,
                    );
                    let composed = transform.compose(&instance);
                    for child in block.entities.iter().rev() {
                        if let Some(id) =
                            test_entity(child, blocks, layers, layer, composed, depth + 1, query, tolerance)
                        {
                            return Some(id);
                        }
                    }
                }
            }
            None
        }
        EntityKind::Dimension { block_name, definition_point, text_midpoint, .. } => {
            if let Some(block) = blocks.get(block_name) {
                let hit = block
                    .entities
                    .iter()
                    .rev()
                    .any(|child| test_entity(child, blocks, layers, layer, transform, depth, query, tolerance).is_some());
                hit.then_some(entity.common.id)
            } else {
                let d = dist(transform.apply(*definition_point), query).min(dist(transform.apply(*text_midpoint), query));
                (d <= tolerance).then_some(entity.common.id)
            }
        }
        kind => {
            let Some(inv) = transform.invert() else { return None };
            let local_query = inv.apply(query);
            let local_tolerance = tolerance / transform.approx_uniform_scale().max(f64::EPSILON);
            test_kind(kind, entity.common.extrusion.z, local_query, local_tolerance)
                .then_some(entity.common.id)
        }
    }
}

fn test_kind(kind: &EntityKind, extrusion_z: f64, query: Point2, tol: f64) -> bool {
    match kind {
        EntityKind::Line { start, end } => point_segment_distance(query, *start, *end) <= tol,
        EntityKind::Circle { center, radius } => (dist(query, *center) - radius).abs() <= tol,
        EntityKind::Arc { center, radius, start_angle, end_angle } => {
            if (dist(query, *center) - radius).abs() > tol {
                return false;
            }
            let angle = FloatFuncs::atan2(query.y - center.y, query.x - center.x);
            let ccw = extrusion_z >= 0.0;
            angle_in_sweep(angle, start_angle.to_radians(), end_angle.to_radians(), ccw)
        }
        EntityKind::Polyline { vertices, closed, .. } => test_polyline(vertices, *closed, query, tol, extrusion_z),
        EntityKind::Spline { control_points, degree, knots, weights, .. } => {
            if control_points.len() < 2 {
                return control_points.first().is_some_and(|p| dist(query, *p) <= tol);
            }
            let knots = (!knots.is_empty()).then_some(knots.as_slice());
            let weights = (!weights.is_empty()).then_some(weights.as_slice());
            let pts = sample_spline(control_points, *degree, knots, weights, Some(SPLINE_HIT_TEST_SEGMENTS));
            pts.windows(2).any(|w| point_segment_distance(query, w[0], w[1]) <= tol)
        }
        EntityKind::Ellipse { center, major_axis, ratio, start_param, end_param } => {
            test_ellipse(*center, *major_axis, *ratio, *start_param, *end_param, query, tol)
        }
        EntityKind::Text { position, rotation, height, width_factor, wrap_width, value, .. } => {
            test_text_bbox(*position, *rotation, *height, *width_factor, *wrap_width, value, query, tol)
        }
        EntityKind::Point { position } => dist(query, *position) <= tol,
        EntityKind::Ray { origin, direction, bounded } => {
            point_line_distance(query, *origin, *direction, *bounded) <= tol
        }
        EntityKind::Leader { vertices, .. } => {
            vertices.windows(2).any(|w| point_segment_distance(query, w[0], w[1]) <= tol)
        }
        EntityKind::Solid { points } | EntityKind::Face3d { points, .. } => {
            (0..4).any(|i| point_segment_distance(query, points[i], points[(i + 1) % 4]) <= tol)
        }
        EntityKind::Hatch { loops, .. } => loops.iter().any(|l| test_hatch_loop(l, query, tol, extrusion_z)),
        // DIMENSION and INSERT are dispatched specially by `test_entity`
        // before this function is ever reached.
        EntityKind::Dimension { .. } | EntityKind::Insert { .. } => false,
    }
}

fn test_polyline(vertices: &[PolyVertex], closed: bool, query: Point2, tol: f64, extrusion_z: f64) -> bool {
    let n = vertices.len();
    if n < 2 {
        return vertices.first().is_some_and(|v| dist(query, v.point) <= tol);
    }
    let edge_count = if closed { n } else { n - 1 };
    (0..edge_count).any(|i| test_bulge_segment(vertices[i], vertices[(i + 1) % n], query, tol, extrusion_z))
}

fn test_bulge_segment(a: PolyVertex, b: PolyVertex, query: Point2, tol: f64, extrusion_z: f64) -> bool {
    match bulge_to_arc(a.point, b.point, a.bulge) {
        None => point_segment_distance(query, a.point, b.point) <= tol,
        Some(arc) => {
            if (dist(query, arc.center) - arc.radius).abs() > tol {
                return false;
            }
            let angle = FloatFuncs::atan2(query.y - arc.center.y, query.x - arc.center.x);
            // `bulge_to_arc`'s start/end angles run from p0 to p1 in the
            // direction opposite its own `ccw` flag (a positive bulge's
            // CCW-from-p0-to-p1 turn is the sweep you get going from
            // `end_angle` back to `start_angle`, not the other way), so
            // this is inverted relative to the ARC entity's own
            // start/end-angle-ordered sweep below.
            let ccw = arc.ccw == (extrusion_z < 0.0);
            angle_in_sweep(angle, arc.start_angle, arc.end_angle, ccw)
        }
    }
}

fn test_hatch_loop(hatch_loop: &crate::model::HatchLoop, query: Point2, tol: f64, extrusion_z: f64) -> bool {
    use crate::model::{HatchEdge, HatchLoop};
    match hatch_loop {
        HatchLoop::Polyline(vertices) => test_polyline(vertices, true, query, tol, extrusion_z),
        HatchLoop::Edges(edges) => edges.iter().any(|edge| match edge {
            HatchEdge::Line { start, end } => point_segment_distance(query, *start, *end) <= tol,
            HatchEdge::Arc { center, radius, start_angle, end_angle, ccw } => {
                if (dist(query, *center) - radius).abs() > tol {
                    return false;
                }
                let angle = FloatFuncs::atan2(query.y - center.y, query.x - center.x);
                angle_in_sweep(angle, start_angle.to_radians(), end_angle.to_radians(), *ccw)
            }
            HatchEdge::Ellipse { center, major_axis, ratio, start_param, end_param } => {
                test_ellipse(*center, *major_axis, *ratio, *start_param, *end_param, query, tol)
            }
            HatchEdge::Spline { control_points, degree, knots } => {
                if control_points.len() < 2 {
                    return false;
                }
                let knots = (!knots.is_empty()).then_some(knots.as_slice());
                let pts = sample_spline(control_points, *degree, knots, None, Some(SPLINE_HIT_TEST_SEGMENTS));
                pts.windows(2).any(|w| point_segment_distance(query, w[0], w[1]) <= tol)
            }
        }),
    }
}

fn test_ellipse(center: Point2, major_axis: Point2, ratio: f64, start_param: f64, end_param: f64, query: Point2, tol: f64) -> bool {
    let rx = (major_axis.x * major_axis.x + major_axis.y * major_axis.y).sqrt();
    if rx == 0.0 {
        return dist(query, center) <= tol;
    }
    let ry = rx * ratio;
    let u = Point2::new(major_axis.x / rx, major_axis.y / rx);
    let v = Point2::new(-u.y, u.x);
    let d = query - center;
    let local_x = d.x * u.x + d.y * u.y;
    let local_y = d.x * v.x + d.y * v.y;

    let (nx, ny) = (local_x / rx, local_y / ry);
    let radial = (nx * nx + ny * ny).sqrt();
    let radial_tol = tol / rx.min(ry).max(f64::EPSILON);
    if (radial - 1.0).abs() > radial_tol {
        return false;
    }
    let param = FloatFuncs::atan2(local_y / ry, local_x / rx);
    angle_in_sweep(param, start_param, end_param, true)
}

#[allow(clippy::too_many_arguments)]
fn test_text_bbox(
    position: Point2,
    rotation_degrees: f64,
    height: f64,
    width_factor: f64,
    wrap_width: Option<f64>,
    value: &str,
    query: Point2,
    tol: f64,
) -> bool {
    let char_count = value.chars().count().max(1) as f64;
    let width = wrap_width.unwrap_or(height * width_factor * CHAR_WIDTH_RATIO * char_count);
    let d = query - position;
    let (sin, cos) = FloatFuncs::sin_cos(-rotation_degrees.to_radians());
    let local_x = d.x * cos - d.y * sin;
    let local_y = d.x * sin + d.y * cos;
    local_x >= -tol && local_x <= width + tol && local_y >= -tol && local_y <= height + tol
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Drawing, Entity, EntityCommon, EntityId};

    fn circle(id: u64, center: Point2, radius: f64) -> Entity {
        Entity { common: EntityCommon::new(EntityId(id)), kind: EntityKind::Circle { center, radius } }
    }

    #[test]
    fn hits_a_circle_edge_within_tolerance() {
        let mut drawing = Drawing::default();
        drawing.entities.push(circle(1, Point2::ZERO, 5.0));
        assert_eq!(hit_point(5.0, 0.0, 0.01, &drawing), Some(EntityId(1)));
        assert_eq!(hit_point(0.0, 0.0, 0.01, &drawing), None);
    }

    #[test]
    fn reversed_extrusion_flips_circle_center() {
        let mut drawing = Drawing::default();
        let mut e = circle(1, Point2::new(5.0, 0.0), 0.5);
        e.common.extrusion = crate::model::Point3::new(0.0, 0.0, -1.0);
        e.kind = EntityKind::Circle { center: crate::geometry::ocs::project_to_world_xy(e.common.extrusion, Point2::new(5.0, 0.0), 0.0), radius: 0.5 };
        drawing.entities.push(e);
        assert_eq!(hit_point(-5.0, 0.0, 0.01, &drawing), Some(EntityId(1)));
        assert_eq!(hit_point(5.0, 0.0, 0.01, &drawing), None);
    }

    #[test]
    fn hidden_layer_is_never_hit() {
        let mut drawing = Drawing::default();
        drawing.layers.insert(
            "HIDDEN".into(),
            Layer { name: "HIDDEN".into(), color: 1, line_type: "Continuous".into(), visible: false, frozen: false },
        );
        let mut e = circle(1, Point2::ZERO, 5.0);
        e.common.layer = "HIDDEN".into();
        drawing.entities.push(e);
        assert_eq!(hit_point(5.0, 0.0, 0.01, &drawing), None);
    }

    #[test]
    fn later_entity_wins_overlapping_hit() {
        let mut drawing = Drawing::default();
        drawing.entities.push(circle(1, Point2::ZERO, 5.0));
        drawing.entities.push(circle(2, Point2::ZERO, 5.0));
        assert_eq!(hit_point(5.0, 0.0, 0.01, &drawing), Some(EntityId(2)));
    }

    #[test]
    fn hit_is_stable_under_shift() {
        let mut drawing = Drawing::default();
        drawing.entities.push(circle(1, Point2::new(100.0, 50.0), 5.0));
        assert_eq!(hit_point(105.0, 50.0, 0.01, &drawing), Some(EntityId(1)));
    }

    #[test]
    fn bulge_semicircle_hits_top_not_bottom() {
        let mut drawing = Drawing::default();
        let vertices = alloc::vec![
            PolyVertex { point: Point2::new(0.0, 0.0), bulge: 1.0 },
            PolyVertex { point: Point2::new(2.0, 0.0), bulge: 0.0 },
        ];
        drawing.entities.push(Entity {
            common: EntityCommon::new(EntityId(1)),
            kind: EntityKind::Polyline { vertices, closed: false, elevation: 0.0 },
        });
        assert_eq!(hit_point(1.0, 1.0, 0.01, &drawing), Some(EntityId(1)));
        assert_eq!(hit_point(1.0, -1.0, 0.01, &drawing), None);
    }
}
