// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Shared text utilities for splitting table rows and escaping literals.

/// Strip a trailing carriage return left over from CRLF line endings.
#[inline]
pub fn trim_line_ending(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Split a row into fields at every unquoted `delimiter`.
///
/// A field wrapped in double quotes may contain the delimiter or a line
/// break, and `""` inside quotes stands for a single quote character.
/// Quotes are removed from the returned values. Everything else is kept
/// verbatim, including surrounding whitespace.
pub fn split_fields(row: &str, delimiter: char) -> Vec<String> {
    scan_fields(row, delimiter).0
}

/// Check if `row` stops inside a quoted field, so the row continues on the
/// next physical line.
pub fn ends_in_open_quote(row: &str, delimiter: char) -> bool {
    scan_fields(row, delimiter).1
}

fn scan_fields(row: &str, delimiter: char) -> (Vec<String>, bool) {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = row.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => {
                in_quotes = true;
            }
            _ if c == delimiter && !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    (fields, in_quotes)
}

/// Escape text for use inside a double-quoted string literal.
pub fn escape_str_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for use inside a Rust format-string literal (`panic!`, `format!`).
pub fn escape_format_literal(s: &str) -> String {
    escape_str_literal(s).replace('{', "{{").replace('}', "}}")
}
