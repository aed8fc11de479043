// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The in-memory drawing model: entities, blocks, layers, styles, line
//! types, and the `Drawing` that owns them all.

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// A point in the X/Y plane, double precision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl core::ops::Sub for Point2 {
    type Output = Point2;
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl core::ops::Add for Point2 {
    type Output = Point2;
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::Mul<f64> for Point2 {
    type Output = Point2;
    fn mul(self, s: f64) -> Point2 {
        Point2::new(self.x * s, self.y * s)
    }
}

/// A point in 3-space, double precision. Used transiently during parsing
/// before OCS projection collapses the entity to [`Point2`] + elevation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The default extrusion direction, (0, 0, 1).
    pub const DEFAULT_EXTRUSION: Self = Self::new(0.0, 0.0, 1.0);
}

/// Stable identifier for an [`Entity`] within one [`Drawing`].
///
/// Assigned sequentially during parsing in file order; unrelated to the
/// optional DXF handle (group 5), which may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

/// Fields shared by every entity variant.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    pub id: EntityId,
    /// Hex string from group 5, if present.
    pub handle: Option<String>,
    pub layer: String,
    /// 0 = ByBlock, 256 = ByLayer, 1-255 = AutoCAD Color Index.
    pub color: i32,
    pub line_type: String,
    pub visible: bool,
    pub paper_space: bool,
    pub extrusion: Point3,
}

impl EntityCommon {
    pub(crate) fn new(id: EntityId) -> Self {
        Self {
            id,
            handle: None,
            layer: String::from("0"),
            color: 256,
            line_type: String::from("ByLayer"),
            visible: true,
            paper_space: false,
            extrusion: Point3::DEFAULT_EXTRUSION,
        }
    }
}

/// Horizontal/vertical alignment and attachment codes shared by the text
/// family of entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextAlignment {
    /// Group 72.
    pub h_align: i32,
    /// Group 73.
    pub v_align: i32,
    /// Group 71, MTEXT attachment point (1-9).
    pub attachment_point: i32,
}

/// One polyline/lwpolyline vertex: a point plus the bulge of the segment
/// that starts at it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolyVertex {
    pub point: Point2,
    pub bulge: f64,
}

/// A single edge of a non-polyline HATCH boundary loop.
#[derive(Debug, Clone, PartialEq)]
pub enum HatchEdge {
    Line { start: Point2, end: Point2 },
    Arc { center: Point2, radius: f64, start_angle: f64, end_angle: f64, ccw: bool },
    Ellipse { center: Point2, major_axis: Point2, ratio: f64, start_param: f64, end_param: f64 },
    Spline { control_points: Vec<Point2>, degree: usize, knots: Vec<f64> },
}

/// One HATCH boundary loop.
#[derive(Debug, Clone, PartialEq)]
pub enum HatchLoop {
    Polyline(Vec<PolyVertex>),
    Edges(Vec<HatchEdge>),
}

/// An owned ATTRIB on an INSERT.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub common: EntityCommon,
    pub tag: String,
    pub value: String,
    pub position: Point2,
    pub height: f64,
    pub rotation: f64,
}

/// Entity-specific payload. See `SPEC_FULL.md` §2 / spec.md §3 for the
/// field-by-field rationale.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Line {
        start: Point2,
        end: Point2,
    },
    Circle {
        center: Point2,
        radius: f64,
    },
    Arc {
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Polyline {
        vertices: Vec<PolyVertex>,
        closed: bool,
        elevation: f64,
    },
    Spline {
        control_points: Vec<Point2>,
        fit_points: Vec<Point2>,
        degree: usize,
        knots: Vec<f64>,
        weights: Vec<f64>,
        closed: bool,
    },
    Ellipse {
        center: Point2,
        major_axis: Point2,
        ratio: f64,
        start_param: f64,
        end_param: f64,
    },
    Text {
        position: Point2,
        second_position: Option<Point2>,
        height: f64,
        value: String,
        rotation: f64,
        width_factor: f64,
        alignment: TextAlignment,
        wrap_width: Option<f64>,
        style_name: String,
        is_mtext: bool,
    },
    Insert {
        block_name: String,
        position: Point2,
        x_scale: f64,
        y_scale: f64,
        rotation: f64,
        row_count: u32,
        col_count: u32,
        row_spacing: f64,
        col_spacing: f64,
        attributes: Vec<Attribute>,
    },
    Solid {
        points: [Point2; 4],
    },
    Face3d {
        points: [Point2; 4],
        edge_visibility: u8,
    },
    Hatch {
        pattern_name: String,
        solid: bool,
        loops: Vec<HatchLoop>,
        scale: f64,
        angle: f64,
        elevation: f64,
    },
    Dimension {
        block_name: String,
        definition_point: Point2,
        text_midpoint: Point2,
        dimension_type: i32,
        measurement: f64,
        override_text: Option<String>,
        style_name: String,
    },
    Leader {
        vertices: Vec<Point2>,
        has_arrowhead: bool,
        path_type: i32,
        has_hookline: bool,
    },
    Point {
        position: Point2,
    },
    /// RAY (`bounded = true`, semi-infinite from `origin`) or XLINE
    /// (`bounded = false`, infinite both ways through `origin`).
    Ray {
        origin: Point2,
        direction: Point2,
        bounded: bool,
    },
}

/// One fully-parsed drawing entity: shared fields plus its variant payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub common: EntityCommon,
    pub kind: EntityKind,
}

/// A named, reusable group of entities, instanced by INSERT.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub name: String,
    pub base_point: Point2,
    pub entities: Vec<Entity>,
}

/// LAYER table entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    /// Always stored as a positive ACI value; `visible` carries the sign.
    pub color: i32,
    pub line_type: String,
    pub visible: bool,
    /// Group 70 bit 0.
    pub frozen: bool,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            name: String::from("0"),
            color: 7,
            line_type: String::from("Continuous"),
            visible: true,
            frozen: false,
        }
    }
}

/// STYLE table entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub name: String,
    pub primary_font_file: String,
    pub big_font_file: String,
    pub height: f64,
    pub width_factor: f64,
}

/// LTYPE table entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineType {
    pub name: String,
    /// Positive = dash, negative = gap.
    pub pattern: Vec<f64>,
    pub total_length: f64,
}

/// Subset of `$`-prefixed HEADER variables the renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Header {
    pub ext_min: Option<Point2>,
    pub ext_max: Option<Point2>,
    pub ins_units: i32,
    pub ltscale: f64,
}

/// Axis-aligned rectangle in world coordinates, used both as the
/// `hitBox` selection input and as the result of [`crate::extents`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point2,
    pub max: Point2,
}

impl Rect {
    #[must_use]
    pub const fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// `true` when `self` and `other` share at least one point, inclusive
    /// of touching edges. Used for crossing-selection in `hitBox`.
    #[must_use]
    pub(crate) fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    #[must_use]
    pub(crate) fn contains_point(&self, p: Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// The axis-aligned bounding box of a set of entities, as returned by
/// [`crate::extents`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub min: Point2,
    pub max: Point2,
    pub center: Point2,
    pub width: f64,
    pub height: f64,
}

impl Extents {
    /// The empty extents returned when no entity contributed a point.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: Point2::ZERO,
            max: Point2::ZERO,
            center: Point2::ZERO,
            width: 0.0,
            height: 0.0,
        }
    }
}

/// The fully parsed drawing. Immutable once returned from [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Drawing {
    pub header: Header,
    pub layers: BTreeMap<String, Layer>,
    pub blocks: BTreeMap<String, Block>,
    pub styles: BTreeMap<String, TextStyle>,
    pub line_types: BTreeMap<String, LineType>,
    /// Model-space entities, in file order. Paper-space entities are
    /// excluded (invariant: `common.paper_space == false` for all of these).
    pub entities: Vec<Entity>,
    /// World-coordinate offset a renderer may subtract for precision,
    /// commonly `floor(ext_min)`. `None` when extents are undefined.
    pub offset: Option<Point2>,
}
