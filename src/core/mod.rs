// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Target-agnostic stub generation core.
//!
//! # Components
//!
//! - [`table`] - Opcode table rows and records
//! - [`stub`] - Stub model and per-target rendering
//! - [`text_utils`] - Field splitting and literal escaping
//! - [`error`] - Errors, diagnostics and run reports

pub mod error;
pub mod stub;
pub mod table;
pub mod text_utils;

// Re-exports for convenience
pub use error::{Diagnostic, GenError, GenReport, GenRunError, Severity};
pub use stub::{render, render_list_entry, render_stub, GeneratedStub, Mode, Target};
pub use table::{OpcodeRecord, RowReader, SourceRow, DEFAULT_DELIMITER};
