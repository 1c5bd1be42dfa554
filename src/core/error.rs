// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types, diagnostics, and reporting for stub generation.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fields every opcode row must provide.
pub const REQUIRED_FIELDS: usize = 4;

/// Errors raised while generating stubs.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("Cannot open input file {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error reading input at line {line}: {source}")]
    Read {
        line: u32,
        #[source]
        source: io::Error,
    },
    #[error("Malformed record at line {line}: expected 4 fields, found {found}")]
    MalformedRecord { line: u32, found: usize },
    #[error("Duplicate instruction name at line {line}: {name} (first defined at line {first_line})")]
    DuplicateName {
        line: u32,
        name: String,
        first_line: u32,
    },
    #[error("Error writing output: {0}")]
    Write(#[source] io::Error),
    #[error("{0}")]
    Cli(String),
}

impl GenError {
    /// Input line the error refers to, when it refers to one.
    pub fn line(&self) -> Option<u32> {
        match self {
            GenError::Read { line, .. }
            | GenError::MalformedRecord { line, .. }
            | GenError::DuplicateName { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

/// A diagnostic message with location and context.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub(crate) line: u32,
    pub(crate) severity: Severity,
    pub(crate) message: String,
    pub(crate) file: Option<String>,
    pub(crate) source: Option<String>,
}

impl Diagnostic {
    pub fn new(line: u32, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            line,
            severity,
            message: message.into(),
            file: None,
            source: None,
        }
    }

    pub fn with_file(mut self, file: Option<String>) -> Self {
        self.file = file;
        self
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn format_with_context(&self, use_color: bool) -> String {
        let sev = self.severity.label();
        let header = match &self.file {
            Some(file) => format!("{file}:{}: {sev}", self.line),
            None => format!("{}: {sev}", self.line),
        };

        let mut out = String::new();
        out.push_str(&header);
        out.push('\n');
        out.push_str(&build_context_line(
            self.line,
            self.source.as_deref(),
            use_color,
        ));
        out.push('\n');
        out.push_str(&format!("{sev}: {}", self.message));
        out
    }
}

/// Summary of a successful generation run.
#[derive(Debug, Default)]
pub struct GenReport {
    blocks: usize,
    diagnostics: Vec<Diagnostic>,
}

impl GenReport {
    pub fn new(blocks: usize, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            blocks,
            diagnostics,
        }
    }

    /// Number of rendered blocks written.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

/// Error from a failed generation run.
#[derive(Debug)]
pub struct GenRunError {
    error: GenError,
    diagnostics: Vec<Diagnostic>,
}

impl GenRunError {
    pub fn new(error: GenError, diagnostics: Vec<Diagnostic>) -> Self {
        Self { error, diagnostics }
    }

    pub fn error(&self) -> &GenError {
        &self.error
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl From<GenError> for GenRunError {
    fn from(error: GenError) -> Self {
        Self::new(error, Vec::new())
    }
}

impl fmt::Display for GenRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for GenRunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Build the ` NNNN | text` context line shown under a diagnostic header.
pub fn build_context_line(line_num: u32, source: Option<&str>, use_color: bool) -> String {
    match source {
        Some(text) => format!("{:>5} | {}", line_num, highlight_line(text, use_color)),
        None => format!("{:>5} | <source unavailable>", line_num),
    }
}

fn highlight_line(line: &str, use_color: bool) -> String {
    if use_color && !line.is_empty() {
        format!("\x1b[31m{line}\x1b[0m")
    } else {
        line.to_string()
    }
}
