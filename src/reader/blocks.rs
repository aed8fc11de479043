// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! BLOCKS section: each `BLOCK`/`ENDBLK` pair collects its own nested
//! entities using the same per-kind dispatch as the top-level ENTITIES
//! section.

extern crate alloc;
use alloc::string::String;

use crate::error::Result;
use crate::model::{Block, Drawing};

use super::entities::dispatch_entity;
use super::{parse_f64, GroupReader, ParseState};

pub(super) fn parse_blocks(
    reader: &mut GroupReader<'_, '_>,
    drawing: &mut Drawing,
    state: &mut ParseState,
) -> Result<()> {
    loop {
        let Some(pair) = reader.next()? else { return Ok(()) };
        if pair.code == 0 && pair.value == "ENDSEC" {
            return Ok(());
        }
        if pair.code != 0 || pair.value != "BLOCK" {
            continue;
        }

        let mut block = Block::default();
        let mut handle: Option<String> = None;
        while !reader.at_record_boundary()? {
            let g = reader.next()?.expect("checked above");
            match g.code {
                5 => handle = Some(g.value),
                2 | 3 => block.name = g.value,
                10 => block.base_point.x = parse_f64(&g)?,
                20 => block.base_point.y = parse_f64(&g)?,
                _ => {}
            }
        }
        if let Some(handle) = handle {
            state.record_block_handle(handle, block.name.clone());
        }

        loop {
            match reader.peek()?.cloned() {
                None => break,
                Some(p) if p.code == 0 && p.value == "ENDBLK" => {
                    reader.next()?;
                    while !reader.at_record_boundary()? {
                        reader.next()?;
                    }
                    break;
                }
                Some(p) if p.code == 0 => {
                    reader.next()?;
                    if let Some(entity) = dispatch_entity(reader, &p.value, state)? {
                        block.entities.push(entity);
                    }
                }
                Some(_) => {
                    reader.next()?;
                }
            }
        }

        drawing.blocks.insert(block.name.clone(), block);
    }
}
