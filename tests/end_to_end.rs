// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Literal-DXF-fragment scenarios exercising the reader, extent
//! calculator and hit-testers together.

use pretty_assertions::assert_eq;

use dxf_kernel::model::{EntityKind, Extents, Point2, Rect};
use dxf_kernel::{extents, hit_box, hit_point, parse, NullSink};

#[test]
fn minimal_line() {
    let dxf = "0\nSECTION\n2\nENTITIES\n0\nLINE\n8\n0\n10\n0\n20\n0\n11\n10\n21\n0\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment");

    assert_eq!(drawing.entities.len(), 1);
    let entity = &drawing.entities[0];
    assert_eq!(entity.common.layer, "0");
    assert_eq!(
        entity.kind,
        EntityKind::Line { start: Point2::new(0.0, 0.0), end: Point2::new(10.0, 0.0) }
    );

    assert_eq!(
        extents(&drawing),
        Extents {
            min: Point2::new(0.0, 0.0),
            max: Point2::new(10.0, 0.0),
            center: Point2::new(5.0, 0.0),
            width: 10.0,
            height: 0.0,
        }
    );
}

#[test]
fn circle_with_reversed_extrusion_flips_its_center() {
    let dxf = "0\nSECTION\n2\nENTITIES\n0\nCIRCLE\n8\n0\n10\n5\n20\n0\n30\n0\n40\n0\n210\n0\n220\n0\n230\n-1\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment");

    assert_eq!(drawing.entities.len(), 1);
    match drawing.entities[0].kind {
        EntityKind::Circle { center, radius } => {
            assert_eq!(center, Point2::new(-5.0, 0.0));
            assert_eq!(radius, 0.0);
        }
        ref other => panic!("expected a circle, got {other:?}"),
    }

    assert_eq!(hit_point(-5.0, 0.0, 0.01, &drawing), Some(drawing.entities[0].common.id));
    assert_eq!(hit_point(5.0, 0.0, 0.01, &drawing), None);
}

#[test]
fn lwpolyline_bulge_semicircle_hits_top_not_bottom() {
    let dxf = "0\nSECTION\n2\nENTITIES\n0\nLWPOLYLINE\n8\n0\n70\n0\n10\n0\n20\n0\n42\n1\n10\n2\n20\n0\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment");

    assert_eq!(drawing.entities.len(), 1);
    match &drawing.entities[0].kind {
        EntityKind::Polyline { vertices, closed, .. } => {
            assert!(!closed);
            assert_eq!(vertices.len(), 2);
            assert_eq!(vertices[0].bulge, 1.0);
        }
        other => panic!("expected a polyline, got {other:?}"),
    }

    let id = drawing.entities[0].common.id;
    assert_eq!(hit_point(1.0, 1.0, 0.01, &drawing), Some(id));
    assert_eq!(hit_point(1.0, -1.0, 0.01, &drawing), None);
}

#[test]
fn insert_with_rotation_and_scale_hits_the_transformed_block_line() {
    let dxf = "0\nSECTION\n2\nBLOCKS\n0\nBLOCK\n8\n0\n2\nA\n10\n0\n20\n0\n0\nLINE\n8\n0\n10\n0\n20\n0\n11\n1\n21\n0\n0\nENDBLK\n0\nENDSEC\n0\nSECTION\n2\nENTITIES\n0\nINSERT\n8\n0\n2\nA\n10\n10\n20\n10\n41\n2\n42\n2\n50\n90\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment");

    assert_eq!(drawing.blocks["A"].entities.len(), 1);
    assert_eq!(drawing.entities.len(), 1);
    assert!(matches!(drawing.entities[0].kind, EntityKind::Insert { .. }));

    let line_id = drawing.blocks["A"].entities[0].common.id;
    assert_eq!(hit_point(10.0, 12.0, 0.1, &drawing), Some(line_id));
    assert_eq!(hit_point(12.0, 10.0, 0.1, &drawing), None);
}

#[test]
fn nested_self_referential_insert_terminates_with_finite_extents() {
    let dxf = "0\nSECTION\n2\nBLOCKS\n0\nBLOCK\n8\n0\n2\nA\n10\n0\n20\n0\n0\nLINE\n8\n0\n10\n0\n20\n0\n11\n1\n21\n0\n0\nINSERT\n8\n0\n2\nA\n10\n0\n20\n0\n0\nENDBLK\n0\nENDSEC\n0\nSECTION\n2\nENTITIES\n0\nINSERT\n8\n0\n2\nA\n10\n0\n20\n0\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment despite the cycle");

    let e = extents(&drawing);
    assert!(e.width.is_finite());
    assert!(e.height.is_finite());
    assert_eq!(e.width, 1.0);
    assert_eq!(e.height, 0.0);

    assert!(hit_point(0.5, 0.0, 0.01, &drawing).is_some());
}

#[test]
fn layer_hidden_by_negative_color_is_excluded_from_hit_box_and_extents() {
    let dxf = "0\nSECTION\n2\nTABLES\n0\nTABLE\n2\nLAYER\n0\nLAYER\n2\nHIDDEN\n62\n-3\n0\nENDTAB\n0\nENDSEC\n0\nSECTION\n2\nENTITIES\n0\nLINE\n8\nHIDDEN\n10\n100\n20\n100\n11\n200\n21\n200\n0\nLINE\n8\n0\n10\n0\n20\n0\n11\n1\n21\n0\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment");

    let hidden_layer = &drawing.layers["HIDDEN"];
    assert!(!hidden_layer.visible);
    assert_eq!(hidden_layer.color, 3);

    assert_eq!(drawing.entities.len(), 2);
    let hidden_id = drawing.entities[0].common.id;
    let visible_id = drawing.entities[1].common.id;

    let hits = hit_box(Rect::new(Point2::new(-1000.0, -1000.0), Point2::new(1000.0, 1000.0)), &drawing);
    assert!(hits.contains(&visible_id));
    assert!(!hits.contains(&hidden_id));

    assert_eq!(
        extents(&drawing),
        Extents {
            min: Point2::new(0.0, 0.0),
            max: Point2::new(1.0, 0.0),
            center: Point2::new(0.5, 0.0),
            width: 1.0,
            height: 0.0,
        }
    );
}

#[test]
fn mtext_rotation_is_derived_from_its_direction_vector() {
    // Direction (0, 1) is straight up: a 90-degree CCW rotation, not the
    // 0-degree default a stray group-50 fallback would give it.
    let dxf = "0\nSECTION\n2\nENTITIES\n0\nMTEXT\n8\n0\n10\n0\n20\n0\n40\n2\n1\nA\n11\n0\n21\n1\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment");

    assert_eq!(drawing.entities.len(), 1);
    match &drawing.entities[0].kind {
        EntityKind::Text { rotation, second_position, is_mtext, .. } => {
            assert!(*is_mtext);
            assert!((*rotation - 90.0).abs() < 1e-9);
            // 11/21 is MTEXT's direction vector, not a second alignment
            // point; it must not leak into `second_position`.
            assert_eq!(*second_position, None);
        }
        other => panic!("expected an mtext, got {other:?}"),
    }

    let id = drawing.entities[0].common.id;
    assert_eq!(hit_point(-1.0, 1.0, 0.01, &drawing), Some(id));
    assert_eq!(hit_point(1.0, 1.0, 0.01, &drawing), None);
}

#[test]
fn insert_with_unknown_block_is_dropped() {
    let dxf = "0\nSECTION\n2\nENTITIES\n0\nINSERT\n8\n0\n2\nMISSING\n10\n0\n20\n0\n0\nLINE\n8\n0\n10\n0\n20\n0\n11\n1\n21\n0\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment");

    // The INSERT referencing an unresolved block is dropped; the LINE
    // that follows it is unaffected.
    assert_eq!(drawing.entities.len(), 1);
    assert!(matches!(drawing.entities[0].kind, EntityKind::Line { .. }));
}

#[test]
fn solid_reorders_diagonal_corners_into_boundary_order() {
    // Raw DXF order is (0,0), (2,0), (0,1), (2,1) -- AutoCAD's diagonal
    // storage convention for a rectangle, group 12/22 then 13/23 holding
    // the far edge in reverse. Boundary order must read (0,0), (2,0),
    // (2,1), (0,1).
    let dxf = "0\nSECTION\n2\nENTITIES\n0\nSOLID\n8\n0\n10\n0\n20\n0\n11\n2\n21\n0\n12\n0\n22\n1\n13\n2\n23\n1\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment");

    match &drawing.entities[0].kind {
        EntityKind::Solid { points } => {
            assert_eq!(
                *points,
                [
                    Point2::new(0.0, 0.0),
                    Point2::new(2.0, 0.0),
                    Point2::new(2.0, 1.0),
                    Point2::new(0.0, 1.0),
                ]
            );
        }
        other => panic!("expected a solid, got {other:?}"),
    }
}

#[test]
fn trace_is_parsed_like_solid() {
    let dxf = "0\nSECTION\n2\nENTITIES\n0\nTRACE\n8\n0\n10\n0\n20\n0\n11\n1\n21\n0\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment");
    assert!(matches!(drawing.entities[0].kind, EntityKind::Solid { .. }));
}

#[test]
fn ray_hits_only_ahead_of_its_origin_xline_hits_both_ways() {
    let dxf = "0\nSECTION\n2\nENTITIES\n0\nRAY\n8\n0\n10\n0\n20\n0\n11\n1\n21\n0\n0\nXLINE\n8\n0\n10\n0\n20\n0\n11\n1\n21\n0\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment");
    assert_eq!(drawing.entities.len(), 2);

    let ray_id = drawing.entities[0].common.id;
    let xline_id = drawing.entities[1].common.id;

    assert_eq!(hit_point(5.0, 0.0, 0.01, &drawing), Some(ray_id));
    assert_eq!(hit_point(-5.0, 0.0, 0.01, &drawing), Some(xline_id));
}

#[test]
fn acad_table_normalizes_to_an_insert_via_handle_lookup() {
    let dxf = "0\nSECTION\n2\nBLOCKS\n0\nBLOCK\n5\nAB\n8\n0\n2\nTBL\n10\n0\n20\n0\n0\nLINE\n8\n0\n10\n0\n20\n0\n11\n1\n21\n0\n0\nENDBLK\n0\nENDSEC\n0\nSECTION\n2\nENTITIES\n0\nACAD_TABLE\n8\n0\n10\n10\n20\n10\n11\n1\n21\n0\n342\nAB\n0\nENDSEC\n0\nEOF\n";
    let drawing = parse(dxf, &mut NullSink).expect("valid fragment");

    assert_eq!(drawing.entities.len(), 1);
    match &drawing.entities[0].kind {
        EntityKind::Insert { block_name, position, .. } => {
            assert_eq!(block_name, "TBL");
            assert_eq!(*position, Point2::new(10.0, 10.0));
        }
        other => panic!("expected an insert, got {other:?}"),
    }

    let line_id = drawing.blocks["TBL"].entities[0].common.id;
    assert_eq!(hit_point(10.5, 10.0, 0.01, &drawing), Some(line_id));
}
