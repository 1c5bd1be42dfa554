// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Stub generator - main entry point.
//!
//! This module ties the opcode table reader to the stub renderer and writes
//! one rendered block per row to standard output, in input order.

pub mod cli;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use clap::Parser;

use crate::core::error::{Diagnostic, GenError, GenReport, GenRunError, Severity};
use crate::core::stub::{render, GeneratedStub, Mode, Target};
use crate::core::table::{OpcodeRecord, RowReader, SourceRow};

use cli::{validate_cli, Cli};

// Re-export public types
pub use cli::{GenConfig, VERSION};

/// Run the generator with command-line arguments, writing to standard output.
pub fn run() -> Result<GenReport, GenRunError> {
    let cli = Cli::parse();
    let config = validate_cli(&cli)?;
    let stdout = io::stdout();
    run_with_config(&config, stdout.lock())
}

/// Open the configured input table and generate into `out`.
pub fn run_with_config<W: Write>(config: &GenConfig, out: W) -> Result<GenReport, GenRunError> {
    let file = File::open(&config.infile).map_err(|source| GenError::InputUnavailable {
        path: config.infile.clone(),
        source,
    })?;
    let file_name = config.infile.to_string_lossy().to_string();
    log::info!(
        "generating {:?} {:?} from {file_name}",
        config.target,
        config.mode
    );
    generate(BufReader::new(file), out, config, Some(&file_name))
}

/// Generate one rendered block per row of `input` into `out`.
///
/// Blocks are written as rows are read. On error, everything written so
/// far is flushed before the error is returned.
pub fn generate<R: BufRead, W: Write>(
    input: R,
    out: W,
    config: &GenConfig,
    file: Option<&str>,
) -> Result<GenReport, GenRunError> {
    let mut writer = StubWriter::new(
        BufWriter::new(out),
        config.target,
        config.mode,
        &config.namespace,
    );
    let mut seen: HashMap<String, u32> = HashMap::new();
    let mut diagnostics = Vec::new();

    for row in RowReader::new(input, config.delimiter) {
        let result = match row {
            Ok(row) => stub_for_row(&row, config, &mut seen, &mut diagnostics, file)
                .and_then(|stub| writer.write_stub(&stub).map_err(GenError::Write))
                .map_err(|err| {
                    push_row_error(&mut diagnostics, &err, file, Some(&row.text));
                    err
                }),
            Err(err) => {
                push_row_error(&mut diagnostics, &err, file, None);
                Err(err)
            }
        };
        if let Err(err) = result {
            if let Err(flush_err) = writer.flush() {
                log::warn!("failed to flush partial output: {flush_err}");
            }
            return Err(GenRunError::new(err, diagnostics));
        }
    }

    writer.flush().map_err(GenError::Write)?;
    let blocks = writer.blocks();
    log::info!("wrote {blocks} block(s)");
    Ok(GenReport::new(blocks, diagnostics))
}

fn push_row_error(
    diagnostics: &mut Vec<Diagnostic>,
    err: &GenError,
    file: Option<&str>,
    text: Option<&str>,
) {
    if let Some(line) = err.line() {
        diagnostics.push(
            Diagnostic::new(line, Severity::Error, err.to_string())
                .with_file(file.map(str::to_string))
                .with_source(text.map(str::to_string)),
        );
    }
}

fn stub_for_row(
    row: &SourceRow,
    config: &GenConfig,
    seen: &mut HashMap<String, u32>,
    diagnostics: &mut Vec<Diagnostic>,
    file: Option<&str>,
) -> Result<GeneratedStub, GenError> {
    let record = OpcodeRecord::parse(&row.text, row.line, config.delimiter)?;
    if let Some(&first_line) = seen.get(&record.name) {
        let err = GenError::DuplicateName {
            line: row.line,
            name: record.name.clone(),
            first_line,
        };
        if config.strict {
            return Err(err);
        }
        log::warn!("{err}");
        diagnostics.push(
            Diagnostic::new(row.line, Severity::Warning, err.to_string())
                .with_file(file.map(str::to_string))
                .with_source(Some(row.text.clone())),
        );
    } else {
        seen.insert(record.name.clone(), row.line);
    }
    Ok(GeneratedStub::from(record))
}

/// Writer for rendered stub output.
pub struct StubWriter<'a, W: Write> {
    out: W,
    target: Target,
    mode: Mode,
    namespace: &'a str,
    blocks: usize,
}

impl<'a, W: Write> StubWriter<'a, W> {
    pub fn new(out: W, target: Target, mode: Mode, namespace: &'a str) -> Self {
        Self {
            out,
            target,
            mode,
            namespace,
            blocks: 0,
        }
    }

    pub fn write_stub(&mut self, stub: &GeneratedStub) -> io::Result<()> {
        writeln!(
            self.out,
            "{}",
            render(stub, self.target, self.mode, self.namespace)
        )?;
        self.blocks += 1;
        Ok(())
    }

    pub fn blocks(&self) -> usize {
        self.blocks
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
