// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for opstub.

fn main() {
    env_logger::init();
    let use_color = std::env::var("NO_COLOR").is_err();
    match opstub::generator::run() {
        Ok(report) => {
            for diag in report.diagnostics() {
                eprintln!("{}", diag.format_with_context(use_color));
            }
            let warnings = report.warning_count();
            if warnings > 0 {
                eprintln!("{} block(s) written, {warnings} warning(s)", report.blocks());
            }
        }
        Err(err) => {
            for diag in err.diagnostics() {
                eprintln!("{}", diag.format_with_context(use_color));
            }
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
