// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TABLES section: LAYER, STYLE and LTYPE tables are populated into the
//! [`Drawing`]'s dictionaries; every other table (VPORT, APPID, UCS,
//! DIMSTYLE, BLOCK_RECORD, VIEW, ...) is skipped wholesale.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::Result;
use crate::model::{Drawing, LineType, TextStyle};
use crate::model::Layer;

use super::{expect_code, parse_f64, parse_i32, GroupReader};

pub(super) fn parse_tables(reader: &mut GroupReader<'_, '_>, drawing: &mut Drawing) -> Result<()> {
    loop {
        let Some(pair) = reader.next()? else { return Ok(()) };
        if pair.code == 0 && pair.value == "ENDSEC" {
            return Ok(());
        }
        if pair.code != 0 || pair.value != "TABLE" {
            continue;
        }
        let table_name = expect_code(reader, 2)?;
        match table_name.as_str() {
            "LAYER" => parse_layer_table(reader, drawing)?,
            "STYLE" => parse_style_table(reader, drawing)?,
            "LTYPE" => parse_ltype_table(reader, drawing)?,
            _ => skip_table(reader)?,
        }
    }
}

fn skip_table(reader: &mut GroupReader<'_, '_>) -> Result<()> {
    loop {
        match reader.next()? {
            None => return Ok(()),
            Some(p) if p.code == 0 && p.value == "ENDTAB" => return Ok(()),
            _ => {}
        }
    }
}

fn parse_layer_table(reader: &mut GroupReader<'_, '_>, drawing: &mut Drawing) -> Result<()> {
    loop {
        let Some(pair) = reader.peek()?.cloned() else { return Ok(()) };
        if pair.code == 0 && pair.value == "ENDTAB" {
            reader.next()?;
            return Ok(());
        }
        if pair.code != 0 || pair.value != "LAYER" {
            reader.next()?;
            continue;
        }
        reader.next()?;
        let mut layer = Layer::default();
        while !reader.at_record_boundary()? {
            let g = reader.next()?.expect("checked above");
            match g.code {
                2 => layer.name = g.value,
                6 => layer.line_type = g.value,
                62 => {
                    let raw = parse_i32(&g)?;
                    layer.visible = raw >= 0;
                    layer.color = raw.abs();
                }
                70 => layer.frozen = parse_i32(&g)? & 1 != 0,
                _ => {}
            }
        }
        drawing.layers.insert(layer.name.clone(), layer);
    }
}

fn parse_style_table(reader: &mut GroupReader<'_, '_>, drawing: &mut Drawing) -> Result<()> {
    loop {
        let Some(pair) = reader.peek()?.cloned() else { return Ok(()) };
        if pair.code == 0 && pair.value == "ENDTAB" {
            reader.next()?;
            return Ok(());
        }
        if pair.code != 0 || pair.value != "STYLE" {
            reader.next()?;
            continue;
        }
        reader.next()?;
        let mut style = TextStyle::default();
        while !reader.at_record_boundary()? {
            let g = reader.next()?.expect("checked above");
            match g.code {
                2 => style.name = g.value,
                3 => style.primary_font_file = g.value,
                4 => style.big_font_file = g.value,
                40 => style.height = parse_f64(&g)?,
                41 => style.width_factor = parse_f64(&g)?,
                _ => {}
            }
        }
        drawing.styles.insert(style.name.clone(), style);
    }
}

fn parse_ltype_table(reader: &mut GroupReader<'_, '_>, drawing: &mut Drawing) -> Result<()> {
    loop {
        let Some(pair) = reader.peek()?.cloned() else { return Ok(()) };
        if pair.code == 0 && pair.value == "ENDTAB" {
            reader.next()?;
            return Ok(());
        }
        if pair.code != 0 || pair.value != "LTYPE" {
            reader.next()?;
            continue;
        }
        reader.next()?;
        let mut name = String::new();
        let mut pattern: Vec<f64> = Vec::new();
        while !reader.at_record_boundary()? {
            let g = reader.next()?.expect("checked above");
            match g.code {
                2 => name = g.value,
                49 => pattern.push(parse_f64(&g)?),
                _ => {}
            }
        }
        // spec.md §4.3: totalLength is the sum of the pattern elements'
        // absolute values, not the file's own group-40 total (which some
        // writers round or omit).
        let total_length = pattern.iter().map(|e| e.abs()).sum();
        drawing.line_types.insert(
            name.clone(),
            LineType { name, pattern, total_length },
        );
    }
}
