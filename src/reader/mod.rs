// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The section dispatcher: drives the tokenizer, recognizes
//! `SECTION`/`ENDSEC` framing, and routes groups to the HEADER/TABLES/
//! BLOCKS/ENTITIES sub-parsers.

extern crate alloc;
use alloc::collections::VecDeque;
use alloc::string::{String, ToString};

use crate::error::{DxfError, Result};
use crate::model::{Drawing, EntityId, Layer};
use crate::tokenizer::{CodePair, Tokenizer};

mod blocks;
mod entities;
mod header;
mod tables;

/// Receives progress percentages in `[0, 100]`, monotonically
/// non-decreasing, with a final call always at `100`. Returning `false`
/// requests cancellation; the parser then surfaces
/// [`DxfError::Cancelled`] at the next progress boundary.
pub trait ProgressSink {
    fn report(&mut self, percent: u8) -> bool;
}

impl<F: FnMut(u8) -> bool> ProgressSink for F {
    fn report(&mut self, percent: u8) -> bool {
        self(percent)
    }
}

/// A no-op sink for callers that don't care about progress.
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&mut self, _percent: u8) -> bool {
        true
    }
}

/// How many groups accumulate between progress reports.
const PROGRESS_STRIDE: usize = 2000;

/// Bounded 2-lookahead group reader sitting on top of the [`Tokenizer`],
/// responsible for periodic progress reporting and cancellation.
pub(crate) struct GroupReader<'a, 'p> {
    tok: Tokenizer<'a>,
    buf: VecDeque<CodePair>,
    consumed: usize,
    /// Rough total group count, estimated once from line count, used only
    /// to scale the progress percentage.
    estimated_total: usize,
    cancelled: bool,
    progress: &'p mut dyn ProgressSink,
}

impl<'a, 'p> GroupReader<'a, 'p> {
    fn new(text: &'a str, progress: &'p mut dyn ProgressSink) -> Self {
        let estimated_total = (text.lines().count() / 2).max(1);
        Self {
            tok: Tokenizer::new(text),
            buf: VecDeque::new(),
            consumed: 0,
            estimated_total,
            cancelled: false,
            progress,
        }
    }

    fn fill(&mut self, n: usize) -> Result<()> {
        while self.buf.len() < n {
            match self.tok.next_pair()? {
                Some(p) => self.buf.push_back(p),
                None => break,
            }
        }
        Ok(())
    }

    /// Peek at the next group without consuming it.
    pub(crate) fn peek(&mut self) -> Result<Option<&CodePair>> {
        self.fill(1)?;
        Ok(self.buf.front())
    }

    /// `true` when the next group starts a new record (code 0), including
    /// at end of input (nothing left to consume is also a record boundary).
    pub(crate) fn at_record_boundary(&mut self) -> Result<bool> {
        Ok(self.peek()?.map_or(true, |p| p.code == 0))
    }

    /// Consume and return the next group.
    pub(crate) fn next(&mut self) -> Result<Option<CodePair>> {
        if self.cancelled {
            return Err(DxfError::Cancelled);
        }
        self.fill(1)?;
        let pair = self.buf.pop_front();
        if pair.is_some() {
            self.consumed += 1;
            if self.consumed % PROGRESS_STRIDE == 0 {
                let percent = ((self.consumed * 100) / self.estimated_total).min(99) as u8;
                if !self.progress.report(percent) {
                    self.cancelled = true;
                    return Err(DxfError::Cancelled);
                }
            }
        }
        Ok(pair)
    }

    /// Consume groups until the next record boundary (code 0) or end of
    /// input, discarding them. Used to skip unknown section/entity bodies.
    pub(crate) fn skip_to_record_boundary(&mut self) -> Result<()> {
        while !self.at_record_boundary()? {
            self.next()?;
        }
        Ok(())
    }
}

/// Shared mutable state threaded through the sub-parsers: the entity id
/// allocator, plus the BLOCK handle-to-name table ACAD_TABLE's group 342
/// soft pointer is resolved against.
pub(crate) struct ParseState {
    next_id: u64,
    block_handles: alloc::collections::BTreeMap<String, String>,
}

impl ParseState {
    fn new() -> Self {
        Self { next_id: 1, block_handles: alloc::collections::BTreeMap::new() }
    }

    pub(crate) fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn record_block_handle(&mut self, handle: String, block_name: String) {
        self.block_handles.insert(handle, block_name);
    }

    pub(crate) fn resolve_block_handle(&self, handle: &str) -> Option<&String> {
        self.block_handles.get(handle)
    }
}

/// Drives the whole parse: framing check, section dispatch, and assembly
/// of the final [`Drawing`]. Spans for this are opened by [`crate::parse`]
/// itself, the public entry point.
pub(crate) fn run(text: &str, progress: &mut dyn ProgressSink) -> Result<Drawing> {
    let mut reader = GroupReader::new(text, progress);

    // Skip an optional leading `999` comment pair.
    if let Some(p) = reader.peek()? {
        if p.code == 999 {
            reader.next()?;
        }
    }

    let mut drawing = Drawing::default();
    drawing.layers.entry("0".to_string()).or_insert_with(Layer::default);

    // Framing: first real group must be (0, "SECTION"), or (0, "EOF") for
    // a trivially empty drawing.
    match reader.peek()? {
        Some(p) if p.code == 0 && (p.value == "SECTION" || p.value == "EOF") => {}
        _ => return Err(DxfError::UnsupportedFormat),
    }

    let mut state = ParseState::new();

    loop {
        let Some(pair) = reader.next()? else { break };
        if pair.code != 0 {
            continue;
        }
        match pair.value.as_str() {
            "EOF" => break,
            "SECTION" => {
                let name = expect_code(&mut reader, 2)?;
                tracing::debug!(section = %name, "entering section");
                match name.as_str() {
                    "HEADER" => header::parse_header(&mut reader, &mut drawing.header)?,
                    "TABLES" => tables::parse_tables(&mut reader, &mut drawing)?,
                    "BLOCKS" => blocks::parse_blocks(&mut reader, &mut drawing, &mut state)?,
                    "ENTITIES" => {
                        entities::parse_entities_section(&mut reader, &mut drawing, &mut state)?
                    }
                    _ => skip_section(&mut reader)?,
                }
            }
            _ => {
                // Stray group at the top level outside any section; ignore.
            }
        }
    }

    drawing.offset = crate::extents::world_offset(&drawing);

    let _ = progress.report(100);
    Ok(drawing)
}

/// Reads the next group and requires it to carry `code`, returning its
/// value.
pub(crate) fn expect_code(reader: &mut GroupReader<'_, '_>, code: i32) -> Result<String> {
    match reader.next()? {
        Some(p) if p.code == code => Ok(p.value),
        Some(p) => Err(DxfError::MalformedInput {
            line: p.line,
            detail: alloc::format!("expected group code {code}, found {}", p.code),
        }),
        None => Err(DxfError::MalformedInput {
            line: 0,
            detail: alloc::format!("expected group code {code}, found end of input"),
        }),
    }
}

fn skip_section(reader: &mut GroupReader<'_, '_>) -> Result<()> {
    loop {
        match reader.next()? {
            None => return Ok(()),
            Some(p) if p.code == 0 && p.value == "ENDSEC" => return Ok(()),
            _ => {}
        }
    }
}

/// Parses an `f64` from a group value, surfacing [`DxfError::MalformedInput`]
/// on failure.
pub(crate) fn parse_f64(pair: &CodePair) -> Result<f64> {
    pair.value.trim().parse::<f64>().map_err(|_| DxfError::MalformedInput {
        line: pair.line,
        detail: alloc::format!("expected a float, found `{}`", pair.value),
    })
}

/// Parses an `i32` from a group value, surfacing [`DxfError::MalformedInput`]
/// on failure.
pub(crate) fn parse_i32(pair: &CodePair) -> Result<i32> {
    pair.value.trim().parse::<i32>().map_err(|_| DxfError::MalformedInput {
        line: pair.line,
        detail: alloc::format!("expected an integer, found `{}`", pair.value),
    })
}
