// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure computational geometry: OCS/WCS mapping, B-spline evaluation,
//! polyline-bulge arc reconstruction, and INSERT transform composition.
//!
//! Nothing here touches the reader or the query engines directly; each
//! submodule takes plain [`crate::model`] types in and hands plain types
//! back, so extents and hit-testing can share the exact same math the
//! parser used to project OCS geometry into world space.

pub(crate) mod bulge;
pub(crate) mod insert_transform;
pub(crate) mod ocs;
pub(crate) mod spline;
