// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HEADER section: pulls out the handful of `$`-prefixed variables the
//! rest of the crate needs, ignoring the rest.

use crate::error::Result;
use crate::model::{Header, Point2};

use super::{parse_f64, parse_i32, GroupReader};

pub(super) fn parse_header(reader: &mut GroupReader<'_, '_>, header: &mut Header) -> Result<()> {
    let mut ext_min = [None; 2];
    let mut ext_max = [None; 2];

    loop {
        let Some(pair) = reader.next()? else { break };
        if pair.code == 0 && pair.value == "ENDSEC" {
            break;
        }
        if pair.code != 9 {
            continue;
        }
        match pair.value.as_str() {
            "$EXTMIN" => read_point_components(reader, &mut ext_min)?,
            "$EXTMAX" => read_point_components(reader, &mut ext_max)?,
            "$INSUNITS" => {
                if let Some(v) = reader.next()? {
                    header.ins_units = parse_i32(&v)?;
                }
            }
            "$LTSCALE" => {
                if let Some(v) = reader.next()? {
                    header.ltscale = parse_f64(&v)?;
                }
            }
            _ => {}
        }
    }

    header.ext_min = match (ext_min[0], ext_min[1]) {
        (Some(x), Some(y)) => Some(Point2::new(x, y)),
        _ => None,
    };
    header.ext_max = match (ext_max[0], ext_max[1]) {
        (Some(x), Some(y)) => Some(Point2::new(x, y)),
        _ => None,
    };
    Ok(())
}

/// `$EXTMIN`/`$EXTMAX` are followed by groups 10/20/30 for x/y/z; z is
/// read and discarded since the crate operates in the XY plane.
fn read_point_components(reader: &mut GroupReader<'_, '_>, out: &mut [Option<f64>; 2]) -> Result<()> {
    loop {
        let Some(p) = reader.peek()? else { return Ok(()) };
        let idx = match p.code {
            10 => 0,
            20 => 1,
            30 => {
                reader.next()?;
                continue;
            }
            _ => return Ok(()),
        };
        let pair = reader.next()?.expect("peeked above");
        out[idx] = Some(parse_f64(&pair)?);
    }
}
