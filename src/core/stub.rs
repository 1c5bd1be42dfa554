// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Stub model and rendering.
//!
//! A [`GeneratedStub`] is the structured form of one opcode row: the type
//! name and the three descriptor tags in table order. Rendering is a pure
//! function of the stub and the selected [`Target`], and every template
//! detail lives in this module.
//!
//! Field placement is the same for every target:
//!
//! - `name` becomes the declared type name and the display label
//! - `tags` are embedded verbatim, in order, as the descriptor parameters
//! - the first tag is embedded in the "Unimplemented instruction" message

use clap::ValueEnum;

use super::table::OpcodeRecord;
use super::text_utils::{escape_format_literal, escape_str_literal};

/// Qualifier used for list entries when none is configured.
pub const DEFAULT_NAMESPACE: &str = "asm8080";

/// Host language flavor of the rendered text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// Rust struct plus `Describe` impl.
    #[default]
    Rust,
    /// C++ struct deriving from `describe<>`.
    Cpp,
}

/// What to render for each row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// One stub definition per row.
    #[default]
    Stubs,
    /// One instruction-list entry per row.
    List,
}

/// Placeholder definition for one unimplemented instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStub {
    pub name: String,
    pub tags: [String; 3],
}

impl GeneratedStub {
    /// Failure message raised when the stub is invoked.
    pub fn failure_message(&self) -> String {
        format!("Unimplemented instruction {}", self.tags[0])
    }

    fn tag_list(&self) -> String {
        self.tags.join(", ")
    }
}

impl From<OpcodeRecord> for GeneratedStub {
    fn from(record: OpcodeRecord) -> Self {
        Self {
            name: record.name,
            tags: [record.arg1, record.arg2, record.arg3],
        }
    }
}

/// Render a stub definition. The block starts with a newline so that
/// consecutive blocks are separated by a blank line.
pub fn render_stub(stub: &GeneratedStub, target: Target) -> String {
    let name = &stub.name;
    let tags = stub.tag_list();
    match target {
        Target::Rust => {
            let label = escape_str_literal(name);
            let message = escape_format_literal(&stub.failure_message());
            format!(
                "
pub struct {name};

impl Describe<{tags}> for {name} {{
    const NAME: &'static str = \"{label}\";

    fn call(&self, _: &mut State8080) -> u64 {{
        panic!(\"{message}\");
    }}
}}"
            )
        }
        Target::Cpp => {
            let label = escape_str_literal(name);
            let message = escape_str_literal(&stub.failure_message());
            format!(
                "
struct {name} : describe<{tags}>
{{
  static constexpr auto name = \"{label}\";

  void operator()(state_8080&) const
  {{
    throw std::runtime_error{{\"{message}\"}};
  }}
}};"
            )
        }
    }
}

/// Render an instruction-list entry referencing the stub through `namespace`.
pub fn render_list_entry(stub: &GeneratedStub, target: Target, namespace: &str) -> String {
    let name = &stub.name;
    match target {
        Target::Rust => format!("    instruction::<{namespace}::{name}>(),"),
        Target::Cpp => format!("  instruction<{namespace}::{name}>,"),
    }
}

/// Render whichever form `mode` selects.
pub fn render(stub: &GeneratedStub, target: Target, mode: Mode, namespace: &str) -> String {
    match mode {
        Mode::Stubs => render_stub(stub, target),
        Mode::List => render_list_entry(stub, target, namespace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(name: &str, a1: &str, a2: &str, a3: &str) -> GeneratedStub {
        GeneratedStub::from(OpcodeRecord::new(name, a1, a2, a3))
    }

    #[test]
    fn rust_stub_places_fields() {
        let text = render_stub(&stub("MOV", "B", "C", "1"), Target::Rust);
        assert_eq!(
            text,
            "
pub struct MOV;

impl Describe<B, C, 1> for MOV {
    const NAME: &'static str = \"MOV\";

    fn call(&self, _: &mut State8080) -> u64 {
        panic!(\"Unimplemented instruction B\");
    }
}"
        );
    }

    #[test]
    fn cpp_stub_matches_describe_template() {
        let text = render_stub(&stub("HLT", "0x76", "7", "1"), Target::Cpp);
        assert_eq!(
            text,
            "
struct HLT : describe<0x76, 7, 1>
{
  static constexpr auto name = \"HLT\";

  void operator()(state_8080&) const
  {
    throw std::runtime_error{\"Unimplemented instruction 0x76\"};
  }
};"
        );
    }

    #[test]
    fn empty_tags_are_kept_verbatim() {
        let text = render_stub(&stub("NOP", "", "", "1"), Target::Rust);
        assert!(text.contains("impl Describe<, , 1> for NOP {"));
        assert!(text.contains("panic!(\"Unimplemented instruction \");"));
    }

    #[test]
    fn literals_are_escaped() {
        let s = stub("Q\"X", "{a}", "2", "3");
        let rust = render_stub(&s, Target::Rust);
        assert!(rust.contains("const NAME: &'static str = \"Q\\\"X\";"));
        assert!(rust.contains("panic!(\"Unimplemented instruction {{a}}\");"));
        let cpp = render_stub(&s, Target::Cpp);
        assert!(cpp.contains("\"Unimplemented instruction {a}\""));
    }

    #[test]
    fn list_entries_use_namespace() {
        let s = stub("MOV", "B", "C", "1");
        assert_eq!(
            render_list_entry(&s, Target::Cpp, DEFAULT_NAMESPACE),
            "  instruction<asm8080::MOV>,"
        );
        assert_eq!(
            render_list_entry(&s, Target::Rust, "ops"),
            "    instruction::<ops::MOV>(),"
        );
    }

    #[test]
    fn render_dispatches_on_mode() {
        let s = stub("NOP", "0x00", "4", "1");
        assert_eq!(
            render(&s, Target::Rust, Mode::Stubs, DEFAULT_NAMESPACE),
            render_stub(&s, Target::Rust)
        );
        assert_eq!(
            render(&s, Target::Cpp, Mode::List, DEFAULT_NAMESPACE),
            "  instruction<asm8080::NOP>,"
        );
    }

    #[test]
    fn failure_message_embeds_first_tag() {
        assert_eq!(
            stub("MOV", "B", "C", "1").failure_message(),
            "Unimplemented instruction B"
        );
    }
}
