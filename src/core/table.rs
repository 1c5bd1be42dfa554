// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Opcode table reading.
//!
//! The table is a delimiter-separated text file with one instruction per
//! non-empty line and no header row. Each row provides, in order, the
//! instruction name and three descriptor fields that are passed through
//! untouched.

use std::io::BufRead;

use super::error::{GenError, REQUIRED_FIELDS};
use super::text_utils::{ends_in_open_quote, split_fields, trim_line_ending};

/// Default field separator for opcode tables.
pub const DEFAULT_DELIMITER: char = ';';

/// One row of the opcode table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeRecord {
    pub name: String,
    pub arg1: String,
    pub arg2: String,
    pub arg3: String,
}

impl OpcodeRecord {
    pub fn new(
        name: impl Into<String>,
        arg1: impl Into<String>,
        arg2: impl Into<String>,
        arg3: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            arg1: arg1.into(),
            arg2: arg2.into(),
            arg3: arg3.into(),
        }
    }

    /// Parse a row of text. `line` is only used for error reporting.
    ///
    /// Fields past the fourth are ignored.
    pub fn parse(text: &str, line: u32, delimiter: char) -> Result<Self, GenError> {
        let fields = split_fields(text, delimiter);
        if fields.len() < REQUIRED_FIELDS {
            return Err(GenError::MalformedRecord {
                line,
                found: fields.len(),
            });
        }
        if fields.len() > REQUIRED_FIELDS {
            log::debug!(
                "line {line}: ignoring {} extra field(s)",
                fields.len() - REQUIRED_FIELDS
            );
        }
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Ok(Self {
            name: next(),
            arg1: next(),
            arg2: next(),
            arg3: next(),
        })
    }
}

/// One logical row together with the 1-based line number it starts on.
///
/// A row spans several physical lines only when a quoted field contains a
/// line break; `text` then keeps those breaks as `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub line: u32,
    pub text: String,
}

/// Iterator over the rows of an opcode table. Empty lines are skipped.
pub struct RowReader<R: BufRead> {
    input: R,
    delimiter: char,
    line: u32,
    done: bool,
}

impl<R: BufRead> RowReader<R> {
    pub fn new(input: R, delimiter: char) -> Self {
        Self {
            input,
            delimiter,
            line: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<SourceRow, GenError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut row: Option<SourceRow> = None;
        let mut buf = String::new();
        loop {
            buf.clear();
            self.line += 1;
            match self.input.read_line(&mut buf) {
                Ok(0) => {
                    self.line -= 1;
                    self.done = true;
                    return row.map(Ok);
                }
                Ok(_) => {
                    let text = trim_line_ending(buf.strip_suffix('\n').unwrap_or(&buf));
                    if let Some(current) = row.as_mut() {
                        current.text.push('\n');
                        current.text.push_str(text);
                    } else if text.is_empty() {
                        log::debug!("line {}: skipping empty line", self.line);
                        continue;
                    } else {
                        row = Some(SourceRow {
                            line: self.line,
                            text: text.to_string(),
                        });
                    }
                    let continues = row
                        .as_ref()
                        .is_some_and(|r| ends_in_open_quote(&r.text, self.delimiter));
                    if !continues {
                        return row.map(Ok);
                    }
                }
                Err(source) => {
                    self.done = true;
                    return Some(Err(GenError::Read {
                        line: self.line,
                        source,
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn rows(input: &str) -> Vec<SourceRow> {
        RowReader::new(Cursor::new(input), ';')
            .collect::<Result<Vec<_>, _>>()
            .expect("read rows")
    }

    #[test]
    fn parse_maps_fields_by_position() {
        let record = OpcodeRecord::parse("MOV;B;C;1", 1, ';').expect("parse");
        assert_eq!(record, OpcodeRecord::new("MOV", "B", "C", "1"));
    }

    #[test]
    fn parse_accepts_empty_descriptor_fields() {
        let record = OpcodeRecord::parse("NOP,,,1", 1, ',').expect("parse");
        assert_eq!(record, OpcodeRecord::new("NOP", "", "", "1"));
    }

    #[test]
    fn parse_ignores_extra_fields() {
        let record = OpcodeRecord::parse("LXI_B;0x01;10;3;extra", 1, ';').expect("parse");
        assert_eq!(record, OpcodeRecord::new("LXI_B", "0x01", "10", "3"));
    }

    #[test]
    fn parse_rejects_short_rows() {
        let err = OpcodeRecord::parse("MOV;B", 9, ';').unwrap_err();
        assert!(matches!(
            err,
            GenError::MalformedRecord { line: 9, found: 2 }
        ));
    }

    #[test]
    fn reader_skips_empty_lines_and_counts_physical_lines() {
        let got = rows("NOP;0x00;4;1\n\n\r\nHLT;0x76;7;1\n");
        assert_eq!(
            got,
            vec![
                SourceRow {
                    line: 1,
                    text: "NOP;0x00;4;1".to_string()
                },
                SourceRow {
                    line: 4,
                    text: "HLT;0x76;7;1".to_string()
                },
            ]
        );
    }

    #[test]
    fn reader_strips_crlf() {
        let got = rows("NOP;0x00;4;1\r\nHLT;0x76;7;1");
        assert_eq!(got[0].text, "NOP;0x00;4;1");
        assert_eq!(got[1].text, "HLT;0x76;7;1");
    }

    #[test]
    fn reader_keeps_whitespace_only_lines() {
        let got = rows("NOP;0x00;4;1\n   \n\t\t\t\n");
        assert_eq!(got.len(), 3);
        assert_eq!(got[1].line, 2);
        assert_eq!(got[1].text, "   ");
        assert_eq!(got[2].text, "\t\t\t");
    }

    #[test]
    fn reader_joins_quoted_line_breaks() {
        let got = rows("\"LXI\nB\";0x01;10;3\nHLT;0x76;7;1\n");
        assert_eq!(
            got,
            vec![
                SourceRow {
                    line: 1,
                    text: "\"LXI\nB\";0x01;10;3".to_string()
                },
                SourceRow {
                    line: 3,
                    text: "HLT;0x76;7;1".to_string()
                },
            ]
        );
        let record = OpcodeRecord::parse(&got[0].text, got[0].line, ';').expect("parse");
        assert_eq!(record, OpcodeRecord::new("LXI\nB", "0x01", "10", "3"));
    }

    #[test]
    fn reader_keeps_empty_line_inside_quotes() {
        let got = rows("\"A\n\nB\";1;2;3\n");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].text, "\"A\n\nB\";1;2;3");
    }

    #[test]
    fn reader_returns_unterminated_quote_at_end_of_input() {
        let got = rows("\"LXI;1;2;3\n");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].text, "\"LXI;1;2;3");
    }

    #[test]
    fn reader_on_empty_input_yields_nothing() {
        let mut reader = RowReader::new(Cursor::new(""), ';');
        assert!(reader.next().is_none());
    }

    #[test]
    fn reader_reports_invalid_utf8() {
        let bytes: &[u8] = b"NOP;0;4;1\n\xff\xfe;1;2;3\n";
        let mut reader = RowReader::new(Cursor::new(bytes), ';');
        assert!(reader.next().expect("first row").is_ok());
        let err = reader.next().expect("second row").unwrap_err();
        assert!(matches!(err, GenError::Read { line: 2, .. }));
        assert!(reader.next().is_none());
    }
}
