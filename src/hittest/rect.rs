// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `hitBox`: crossing-selection within an axis-aligned rectangle.

extern crate alloc;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;

use crate::extents::{contribute_entity_points, effective_layer, layer_visible, Accumulator, MAX_DEPTH};
use crate::geometry::insert_transform::{insert_instance_transform, Transform2};
use crate::model::{Block, Drawing, Entity, EntityId, EntityKind, Layer, Rect};

/// Returns the identifiers of every visible entity whose geometry
/// overlaps `rect`, descending recursively into INSERTs. Crossing
/// selection: any overlap qualifies, containment is not required.
#[must_use]
pub fn hit_box(rect: Rect, drawing: &Drawing) -> BTreeSet<EntityId> {
    let mut out = BTreeSet::new();
    walk(&drawing.entities, &drawing.blocks, &drawing.layers, "0", Transform2::IDENTITY, 0, rect, &mut out);
    out
}

fn walk(
    entities: &[Entity],
    blocks: &BTreeMap<String, Block>,
    layers: &BTreeMap<String, Layer>,
    parent_layer: &str,
    transform: Transform2,
    depth: u32,
    rect: Rect,
    out: &mut BTreeSet<EntityId>,
) {
    for entity in entities {
        if !entity.common.visible {
            continue;
        }
        let layer = effective_layer(&entity.common.layer, parent_layer);
        if !layer_visible(layers, layer) {
            continue;
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
                    continue;
                }
                let Some(block) = blocks.get(block_name) else { continue };
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
                        walk(&block.entities, blocks, layers, layer, composed, depth + 1, rect, out);
                    }
                }
            }
            kind => {
                let mut acc = Accumulator::new();
                contribute_entity_points(kind, &transform, &mut acc);
                if let Some(bounds) = acc.as_rect() {
                    if bounds.overlaps(&rect) {
                        out.insert(entity.common.id);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityCommon, EntityId, Point2};

    fn line(id: u64, start: Point2, end: Point2) -> Entity {
        Entity { common: EntityCommon::new(EntityId(id)), kind: EntityKind::Line { start, end } }
    }

    #[test]
    fn selects_overlapping_lines() {
        let mut drawing = Drawing::default();
        drawing.entities.push(line(1, Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)));
        drawing.entities.push(line(2, Point2::new(100.0, 100.0), Point2::new(101.0, 101.0)));
        let hits = hit_box(Rect::new(Point2::new(-1.0, -1.0), Point2::new(2.0, 2.0)), &drawing);
        assert_eq!(hits, BTreeSet::from([EntityId(1)]));
    }

    #[test]
    fn crossing_selection_requires_only_overlap() {
        let mut drawing = Drawing::default();
        drawing.entities.push(line(1, Point2::new(-5.0, 0.0), Point2::new(5.0, 0.0)));
        let hits = hit_box(Rect::new(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0)), &drawing);
        assert_eq!(hits, BTreeSet::from([EntityId(1)]));
    }

    #[test]
    fn hidden_layer_is_excluded() {
        let mut drawing = Drawing::default();
        drawing.layers.insert(
            "HIDDEN".into(),
            Layer { name: "HIDDEN".into(), color: 1, line_type: "Continuous".into(), visible: false, frozen: false },
        );
        let mut e = line(1, Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        e.common.layer = "HIDDEN".into();
        drawing.entities.push(e);
        let hits = hit_box(Rect::new(Point2::new(-10.0, -10.0), Point2::new(10.0, 10.0)), &drawing);
        assert!(hits.is_empty());
    }

    #[test]
    fn recurses_into_insert() {
        let mut drawing = Drawing::default();
        let mut block = crate::model::Block { name: "A".into(), base_point: Point2::ZERO, entities: alloc::vec::Vec::new() };
        block.entities.push(line(1, Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)));
        drawing.blocks.insert("A".into(), block);
        drawing.entities.push(Entity {
            common: EntityCommon::new(EntityId(2)),
            kind: EntityKind::Insert {
                block_name: "A".into(),
                position: Point2::new(10.0, 10.0),
                x_scale: 1.0,
                y_scale: 1.0,
                rotation: 0.0,
                row_count: 1,
                col_count: 1,
                row_spacing: 0.0,
                col_spacing: 0.0,
                attributes: alloc::vec::Vec::new(),
            },
        });
        let hits = hit_box(Rect::new(Point2::new(9.0, 9.0), Point2::new(12.0, 12.0)), &drawing);
        assert_eq!(hits, BTreeSet::from([EntityId(1)]));
    }
}
