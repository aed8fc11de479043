// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reads ASCII DXF drawing files into an in-memory geometric model, then
//! answers coordinate-system, curve-evaluation, extent, and hit-test
//! queries against it.
//!
//! Three subsystems, one per module group: the reader ([`reader`],
//! private, reachable only through [`parse`]), the geometry kernel
//! ([`geometry`], private, reachable through [`eval_spline`] and the
//! transforms applied internally during parsing/extents/hit-testing),
//! and the spatial query engine ([`hittest`], reachable through
//! [`hit_point`] and [`hit_box`]).
//!
//! Building requires at least one of the `std` (default) or `libm`
//! feature; with neither, [`floatfuncs`] fails to compile.
#![no_std]

extern crate alloc;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("dxf_kernel requires either the `std` or `libm` feature");

mod floatfuncs;

pub mod error;
pub mod model;

mod extents;
mod geometry;
mod hittest;
mod reader;
mod tokenizer;

pub use error::{DxfError, Result};
pub use extents::extents;
pub use hittest::{hit_box, hit_point};
pub use reader::{NullSink, ProgressSink};

use model::{Drawing, Point2};

/// Samples a B-spline/NURBS curve into a polyline.
///
/// `knots` and `weights` default to a clamped uniform knot vector and
/// uniform (non-rational) weights, respectively, when `None` or empty.
/// `segments` defaults to `max(100, 10 * control_points.len())`.
#[must_use]
pub fn eval_spline(
    control_points: &[Point2],
    degree: usize,
    knots: Option<&[f64]>,
    weights: Option<&[f64]>,
    segments: Option<usize>,
) -> alloc::vec::Vec<Point2> {
    geometry::spline::sample_spline(control_points, degree, knots, weights, segments)
}

/// Parses `text` as an ASCII DXF stream into a [`Drawing`].
///
/// `progress` receives monotonically non-decreasing percentages in
/// `[0, 100]`, with a final call always at `100` on success; returning
/// `false` from it cancels the parse, surfaced as
/// [`DxfError::Cancelled`].
///
/// # Errors
///
/// Returns [`DxfError::UnsupportedFormat`] when `text` isn't recognizable
/// DXF framing, [`DxfError::MalformedInput`] when a required group is
/// missing or unparseable, and [`DxfError::Cancelled`] when `progress`
/// requests cancellation. Recoverable conditions encountered mid-parse
/// (an unresolved INSERT block, a circular block reference) are logged
/// via `tracing` and do not fail the parse.
#[tracing::instrument(skip(text, progress))]
pub fn parse(text: &str, progress: &mut dyn ProgressSink) -> Result<Drawing> {
    reader::run(text, progress)
}
