// Copyright 2026 the dxf_kernel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Converts a decoded character stream into a lazy sequence of
//! `(group code, value)` pairs.

extern crate alloc;
use alloc::string::{String, ToString};

use crate::error::DxfError;

/// One `(code, value)` group read from the stream.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CodePair {
    pub(crate) code: i32,
    pub(crate) value: String,
    /// 1-based line number of the code line, for error reporting.
    pub(crate) line: usize,
}

/// Lazily tokenizes a DXF text stream into [`CodePair`]s.
///
/// Each record consumes exactly two logical lines: the first parsed as a
/// decimal group code, the second as the raw value (trimmed of trailing
/// whitespace and `\r`). Blank lines encountered while scanning for the
/// next code line are skipped; `str::lines()` already normalizes `\n` and
/// `\r\n` endings, so mixed line endings within one file are transparent.
#[derive(Debug, Clone)]
pub(crate) struct Tokenizer<'a> {
    lines: core::str::Lines<'a>,
    line_no: usize,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let l = self.lines.next()?;
        self.line_no += 1;
        Some(l)
    }

    /// Reads the next `(code, value)` pair, or `None` at end of input.
    pub(crate) fn next_pair(&mut self) -> Result<Option<CodePair>, DxfError> {
        let code_line = loop {
            match self.next_line() {
                None => return Ok(None),
                Some(l) if l.trim().is_empty() => continue,
                Some(l) => break l,
            }
        };
        let code_line_no = self.line_no;
        let code: i32 = code_line.trim().parse().map_err(|_| DxfError::MalformedInput {
            line: code_line_no,
            detail: alloc::format!("unparseable group code `{}`", code_line.trim()),
        })?;

        let value = match self.next_line() {
            Some(v) => v.trim_end_matches(['\r', '\n']).trim_end().to_string(),
            None => {
                return Err(DxfError::MalformedInput {
                    line: code_line_no,
                    detail: "group code with no following value".to_string(),
                })
            }
        };

        Ok(Some(CodePair {
            code,
            value,
            line: code_line_no,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_simple_pairs() {
        let mut t = Tokenizer::new("0\nSECTION\n2\nENTITIES\n");
        assert_eq!(
            t.next_pair().unwrap(),
            Some(CodePair { code: 0, value: "SECTION".into(), line: 1 })
        );
        assert_eq!(
            t.next_pair().unwrap(),
            Some(CodePair { code: 2, value: "ENTITIES".into(), line: 3 })
        );
        assert_eq!(t.next_pair().unwrap(), None);
    }

    #[test]
    fn handles_crlf_and_blank_lines() {
        let mut t = Tokenizer::new("\r\n0\r\nLINE\r\n\r\n10\r\n1.5\r\n");
        assert_eq!(
            t.next_pair().unwrap().unwrap(),
            CodePair { code: 0, value: "LINE".into(), line: 2 }
        );
        assert_eq!(
            t.next_pair().unwrap().unwrap(),
            CodePair { code: 10, value: "1.5".into(), line: 5 }
        );
    }

    #[test]
    fn malformed_code_errors() {
        let mut t = Tokenizer::new("not-a-code\nfoo\n");
        assert!(matches!(
            t.next_pair(),
            Err(DxfError::MalformedInput { line: 1, .. })
        ));
    }

    #[test]
    fn missing_value_errors() {
        let mut t = Tokenizer::new("0\n");
        assert!(matches!(
            t.next_pair(),
            Err(DxfError::MalformedInput { .. })
        ));
    }
}
