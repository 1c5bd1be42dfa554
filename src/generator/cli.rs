// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::core::error::GenError;
use crate::core::stub::{Mode, Target, DEFAULT_NAMESPACE};
use crate::core::table::DEFAULT_DELIMITER;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Input table read when -i/--infile is omitted.
pub const DEFAULT_INFILE: &str = "opcodes.csv";

const LONG_ABOUT: &str = "Generate unimplemented-instruction stubs from an opcode table.

Each non-empty line of the input is one instruction: NAME;ARG1;ARG2;ARG3.
No header row is skipped. For every row a stub definition is written to
standard output, in input order. The stub is named NAME, carries ARG1..ARG3
verbatim as its descriptor parameters, and fails with
\"Unimplemented instruction ARG1\" when invoked.

Rows with fewer than four fields abort the run. Extra fields are ignored.";

#[derive(Parser, Debug)]
#[command(
    name = "opstub",
    version = VERSION,
    about = "Generate unimplemented-instruction stubs from an opcode table",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        short = 'i',
        long = "infile",
        value_name = "FILE",
        default_value = DEFAULT_INFILE,
        long_help = "Opcode table to read. Defaults to opcodes.csv in the current directory."
    )]
    pub infile: PathBuf,
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "CHAR",
        default_value_t = DEFAULT_DELIMITER.to_string(),
        long_help = "Field separator (a single character). Defaults to ';'."
    )]
    pub delimiter: String,
    #[arg(
        short = 't',
        long = "target",
        value_enum,
        default_value_t = Target::Rust,
        long_help = "Host language of the generated stubs."
    )]
    pub target: Target,
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        default_value_t = Mode::Stubs,
        long_help = "Emit stub definitions (stubs) or one instruction-list entry per row (list)."
    )]
    pub mode: Mode,
    #[arg(
        short = 'n',
        long = "namespace",
        value_name = "NAME",
        default_value = DEFAULT_NAMESPACE,
        long_help = "Qualifier placed before each name in list mode. Defaults to asm8080."
    )]
    pub namespace: String,
    #[arg(
        long = "strict",
        action = ArgAction::SetTrue,
        long_help = "Fail when an instruction name appears more than once. Without it, duplicates only produce a warning."
    )]
    pub strict: bool,
}

/// Validated CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    pub infile: PathBuf,
    pub delimiter: char,
    pub target: Target,
    pub mode: Mode,
    pub namespace: String,
    pub strict: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            infile: PathBuf::from(DEFAULT_INFILE),
            delimiter: DEFAULT_DELIMITER,
            target: Target::default(),
            mode: Mode::default(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            strict: false,
        }
    }
}

/// Parse a delimiter argument. Accepts a single character or the escape `\t`.
pub fn parse_delimiter(arg: &str) -> Result<char, &'static str> {
    if arg == "\\t" {
        return Ok('\t');
    }
    let mut chars = arg.chars();
    let delimiter = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err("Invalid -d/--delimiter; must be a single character"),
    };
    if matches!(delimiter, '"' | '\n' | '\r') {
        return Err("Invalid -d/--delimiter; quotes and line breaks are not allowed");
    }
    Ok(delimiter)
}

/// Validate CLI arguments and return parsed configuration.
pub fn validate_cli(cli: &Cli) -> Result<GenConfig, GenError> {
    let delimiter = parse_delimiter(&cli.delimiter).map_err(|msg| GenError::Cli(msg.into()))?;

    if cli.mode == Mode::List && cli.namespace.trim().is_empty() {
        return Err(GenError::Cli(
            "-n/--namespace must not be empty in list mode".into(),
        ));
    }

    Ok(GenConfig {
        infile: cli.infile.clone(),
        delimiter,
        target: cli.target,
        mode: cli.mode,
        namespace: cli.namespace.clone(),
        strict: cli.strict,
    })
}
