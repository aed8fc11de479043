// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shims for math functions that ordinarily come from std.
//!
//! The geometry kernel needs a handful of transcendental functions
//! (`atan2`, `sqrt`, `hypot`, `sin_cos`) that `core` does not provide on
//! its own. When the `std` feature is enabled these route straight
//! through to the platform libm via the inherent `f64` methods; without
//! it, `libm`'s free functions stand in.

/// Chooses between libstd or libm implementations of the float methods
/// the geometry kernel actually uses.
///
/// For documentation see the respective functions in the std library.
pub(crate) trait FloatFuncs: Sized {
    fn atan2(self, other: Self) -> Self;
    fn sqrt(self) -> Self;
    fn hypot(self, other: Self) -> Self;
    fn sin_cos(self) -> (Self, Self);
    fn floor(self) -> Self;
}

#[cfg(feature = "std")]
impl FloatFuncs for f64 {
    #[inline(always)]
    fn atan2(self, other: Self) -> Self {
        f64::atan2(self, other)
    }
    #[inline(always)]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }
    #[inline(always)]
    fn hypot(self, other: Self) -> Self {
        f64::hypot(self, other)
    }
    #[inline(always)]
    fn sin_cos(self) -> (Self, Self) {
        f64::sin_cos(self)
    }
    #[inline(always)]
    fn floor(self) -> Self {
        f64::floor(self)
    }
}

#[cfg(not(feature = "std"))]
impl FloatFuncs for f64 {
    #[inline(always)]
    fn atan2(self, other: Self) -> Self {
        #[cfg(feature = "libm")]
        return libm::atan2(self, other);
        #[cfg(not(feature = "libm"))]
        compile_error!("dxf_kernel requires either the `std` or `libm` feature");
    }
    #[inline(always)]
    fn sqrt(self) -> Self {
        #[cfg(feature = "libm")]
        return libm::sqrt(self);
        #[cfg(not(feature = "libm"))]
        compile_error!("dxf_kernel requires either the `std` or `libm` feature");
    }
    #[inline(always)]
    fn hypot(self, other: Self) -> Self {
        #[cfg(feature = "libm")]
        return libm::hypot(self, other);
        #[cfg(not(feature = "libm"))]
        compile_error!("dxf_kernel requires either the `std` or `libm` feature");
    }
    #[inline(always)]
    fn sin_cos(self) -> (Self, Self) {
        #[cfg(feature = "libm")]
        return libm::sincos(self);
        #[cfg(not(feature = "libm"))]
        compile_error!("dxf_kernel requires either the `std` or `libm` feature");
    }
    #[inline(always)]
    fn floor(self) -> Self {
        #[cfg(feature = "libm")]
        return libm::floor(self);
        #[cfg(not(feature = "libm"))]
        compile_error!("dxf_kernel requires either the `std` or `libm` feature");
    }
}

/// `atan(x)`, expressed as `atan2(x, 1.0)` so the shim doesn't need a
/// separate entry point.
#[inline(always)]
pub(crate) fn atan(x: f64) -> f64 {
    FloatFuncs::atan2(x, 1.0)
}
