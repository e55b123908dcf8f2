//! Two-pass assembler for a small, fixed instruction set (16 opcodes,
//! 15-bit words).
//!
//! Assembling a source file proceeds in two stages:
//! - [`preprocessor::preprocess`] expands macros, strips and binds
//!   labels, validates syntax, and accumulates diagnostics while sizing
//!   every line against the instruction counter.
//! - [`encoder::encode`] re-reads the expanded stream (only once pass 1
//!   reported no diagnostics) and emits object words, external
//!   references, and a sorted entries listing.
//!
//! Comments start with `;` and run to the end of the line. Labels are
//! defined with a trailing colon:
//!
//! ```ignore
//! LOOP:   dec r1
//!         bne LOOP
//!         stop
//! ```
//!
//! The instruction set:
//! - `mov`, `cmp`, `add`, `sub`, `lea`: two operands.
//! - `clr`, `not`, `inc`, `dec`, `jmp`, `bne`, `red`, `prn`, `jsr`: one operand.
//! - `rts`, `stop`: no operands.
//!
//! Directives: `.data <int>[, <int>]*`, `.string "<chars>"`, `.entry <name>`,
//! `.extern <name>`.
//!
//! Registers are `r0`..`r7` (direct) or `*r0`..`*r7` (indirect). Immediate
//! operands are written `#<int>`.
//!
//! Macros are parameterless line substitutions:
//! ```ignore
//! macr GREET
//!     prn #1
//! endmacr
//! ```
//! invoked by a line containing only the macro's name.

pub mod classify;
pub mod encoder;
pub mod error;
pub mod isa;
pub mod macro_table;
pub mod output;
pub mod preprocessor;
pub mod symbol_table;
pub mod token;

use error::{Diagnostic, IoFailure};

/// Everything produced by successfully assembling one source file.
pub struct AssembledProgram {
    pub expanded_source: String,
    pub object_lines: Vec<String>,
    pub extern_lines: Vec<String>,
    pub entry_lines: Vec<String>,
}

/// The outcome of running the full pipeline over a source file.
pub enum AssembleOutcome {
    Success(AssembledProgram),
    /// Pass 1 rejected the source; pass 2 never ran. The expanded stream
    /// pass 1 produced up to the point of failure is still included: the
    /// reference writes `.am` unconditionally during pass 1, independent
    /// of whether pass 1 ultimately reports errors.
    Diagnostics { diagnostics: Vec<Diagnostic>, expanded_source: String },
}

/// Runs pass 1, then (only if it reported no diagnostics) pass 2, over
/// `source`.
pub fn assemble(source: &str) -> AssembleOutcome {
    let pass1 = preprocessor::preprocess(source);
    if !pass1.diagnostics.is_empty() {
        return AssembleOutcome::Diagnostics {
            diagnostics: pass1.diagnostics,
            expanded_source: pass1.expanded,
        };
    }

    let pass2 = encoder::encode(&pass1.expanded, &pass1.symbols, pass1.code_lines, pass1.data_lines);
    AssembleOutcome::Success(AssembledProgram {
        expanded_source: pass1.expanded,
        object_lines: pass2.object_lines,
        extern_lines: pass2.extern_lines,
        entry_lines: pass2.entry_lines,
    })
}

/// Reads `path` and assembles its contents. I/O failures opening the
/// source file are fatal, unlike the accumulated per-line diagnostics
/// pass 1 produces.
pub fn assemble_from_file(path: &str) -> Result<AssembleOutcome, IoFailure> {
    let source = std::fs::read_to_string(path).map_err(IoFailure::OpenInput)?;
    Ok(assemble(&source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_source_produces_object_and_no_diagnostics() {
        match assemble("mov r1, r2\nstop") {
            AssembleOutcome::Success(program) => {
                assert_eq!(program.object_lines[0], "3 0");
            }
            AssembleOutcome::Diagnostics { diagnostics, .. } => {
                panic!("unexpected diagnostics: {diagnostics:?}")
            }
        }
    }

    #[test]
    fn invalid_source_produces_diagnostics_and_no_object() {
        match assemble("mov") {
            AssembleOutcome::Diagnostics { diagnostics, expanded_source } => {
                assert_eq!(diagnostics.len(), 1);
                // the expanded stream is still produced up to the failing line.
                assert_eq!(expanded_source, "mov\n");
            }
            AssembleOutcome::Success(_) => panic!("expected pass 1 to reject this source"),
        }
    }
}
