// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error kinds surfaced by [`crate::parse`].

extern crate alloc;
use alloc::string::String;
use core::fmt;

/// Failure modes of [`crate::parse`].
///
/// Only [`DxfError::UnsupportedFormat`], [`DxfError::MalformedInput`], and
/// [`DxfError::Cancelled`] are ever returned from `parse` itself.
/// [`DxfError::CircularBlockReference`] and [`DxfError::UnknownBlockReference`]
/// are recoverable per the reader's policy (logged via `tracing::warn!`,
/// parse continues) but are kept as variants so a future diagnostics
/// collector can surface them without widening the error type again.
#[derive(Debug, Clone, PartialEq)]
pub enum DxfError {
    /// The stream is not recognizable DXF (first group isn't `(0, "SECTION")`,
    /// modulo one leading comment group `999`).
    UnsupportedFormat,
    /// A group code failed to parse, or a required positional group was
    /// missing mid-entity.
    MalformedInput {
        /// 1-based line number of the offending group code.
        line: usize,
        /// Human-readable detail.
        detail: String,
    },
    /// An INSERT recursion exceeded the depth cap (20) due to a
    /// self-referential block chain.
    CircularBlockReference {
        /// Name of the block where the cycle was detected.
        block_name: String,
    },
    /// An INSERT referenced a block name that does not resolve.
    UnknownBlockReference {
        /// The unresolved block name.
        block_name: String,
    },
    /// The caller's [`crate::ProgressSink`] requested cancellation.
    Cancelled,
}

impl fmt::Display for DxfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat => write!(f, "not a recognizable ASCII DXF stream"),
            Self::MalformedInput { line, detail } => {
                write!(f, "malformed input at line {line}: {detail}")
            }
            Self::CircularBlockReference { block_name } => {
                write!(f, "circular block reference through `{block_name}`")
            }
            Self::UnknownBlockReference { block_name } => {
                write!(f, "INSERT references unknown block `{block_name}`")
            }
            Self::Cancelled => write!(f, "parse cancelled by progress sink"),
        }
    }
}

impl core::error::Error for DxfError {}

/// Convenience alias for fallible reader operations.
pub type Result<T> = core::result::Result<T, DxfError>;
