//! Preprocessor and pass 1: macro expansion, label insertion, and
//! instruction-counter accounting, with diagnostics collected instead of
//! aborting on the first error.

use super::classify::{self, Classification};
use super::error::{Diagnostic, ErrorKind};
use super::isa;
use super::macro_table::{MacroHandle, MacroTable};
use super::symbol_table::{Address, SymbolTable};
use super::token::tokenize;

/// Whether the preprocessor is recording a macro body or handling lines
/// normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InsideMacro(MacroHandle),
}

/// The mutable state pass 1 builds up and hands to pass 2 by value: the
/// label table, final counters, and the expanded stream. Replaces the
/// reference's file-scope globals with a single threaded value.
pub struct AssemblerContext {
    pub expanded: String,
    pub symbols: SymbolTable,
    pub ic: Address,
    pub code_lines: u32,
    pub data_lines: u32,
    pub diagnostics: Vec<Diagnostic>,
}

struct Preprocessor {
    state: State,
    macros: MacroTable,
    symbols: SymbolTable,
    ic: Address,
    code_lines: u32,
    data_lines: u32,
    diagnostics: Vec<Diagnostic>,
    expanded: String,
}

impl Preprocessor {
    fn new() -> Self {
        Preprocessor {
            state: State::Outside,
            macros: MacroTable::new(),
            symbols: SymbolTable::new(),
            ic: 100,
            code_lines: 0,
            data_lines: 0,
            diagnostics: Vec::new(),
            expanded: String::new(),
        }
    }

    fn push_diagnostic(&mut self, kind: ErrorKind, line_number: usize, line_text: &str) {
        self.diagnostics.push(Diagnostic { kind, line_number, line_text: line_text.to_string() });
    }

    fn handle_one_token(&mut self, token: &str, line: &str, line_number: usize) {
        if token == "endmacr" {
            match self.state {
                State::InsideMacro(_) => self.state = State::Outside,
                State::Outside => self.push_diagnostic(ErrorKind::EndMacroOutsideMacro, line_number, line),
            }
            return;
        }

        let tokens = [token.to_string()];

        if isa::is_reserved_word(token) {
            self.handle_normal_line(line, &tokens, line_number);
            return;
        }

        if matches!(self.state, State::Outside) {
            if let Some(found) = self.macros.lookup(token) {
                let lines = found.lines.clone();
                for macro_line in lines {
                    self.expanded.push_str(&macro_line);
                    self.expanded.push('\n');
                    let macro_tokens = tokenize(&macro_line);
                    self.size_account(&macro_tokens, &macro_line, line_number);
                }
                return;
            }
            self.push_diagnostic(ErrorKind::UndefinedMacroUse { name: token.to_string() }, line_number, line);
            return;
        }

        // InsideMacro and not `endmacr`: a bare line naming another macro
        // is just macro-body text here, not an invocation.
        if let State::InsideMacro(handle) = self.state {
            self.macros.append(handle, line);
        }
    }

    fn handle_macr_line(&mut self, tokens: &[String], line: &str, line_number: usize) {
        let name = tokens[1].clone();
        match self.macros.define(&name) {
            Some(handle) => self.state = State::InsideMacro(handle),
            None => {
                self.push_diagnostic(ErrorKind::DuplicateMacro { name }, line_number, line);
                self.state = State::Outside;
            }
        }
    }

    fn handle_normal_line(&mut self, line: &str, tokens: &[String], line_number: usize) {
        match self.state {
            State::InsideMacro(handle) => self.macros.append(handle, line),
            State::Outside => {
                self.expanded.push_str(line);
                self.expanded.push('\n');
                self.size_account(tokens, line, line_number);
            }
        }
    }

    /// Strips leading labels (binding each to the current `IC`), then
    /// classifies and sizes whatever tokens remain.
    fn size_account(&mut self, tokens: &[String], line_text: &str, line_number: usize) {
        let (labels, rest) = classify::strip_labels(tokens);
        for name in labels {
            if isa::is_reserved_word(&name) {
                self.push_diagnostic(ErrorKind::ReservedLabel { name }, line_number, line_text);
                continue;
            }
            if !self.symbols.insert_label(&name, self.ic) {
                self.push_diagnostic(ErrorKind::DuplicateLabel { name }, line_number, line_text);
            }
        }

        if rest.is_empty() {
            return;
        }

        let classification = classify::classify(rest);
        if classification == Classification::Invalid {
            self.push_diagnostic(ErrorKind::InvalidSyntax, line_number, line_text);
            return;
        }

        let words = classify::word_count(&classification) as Address;
        self.ic += words;
        match classification {
            Classification::Instruction { .. } => self.code_lines += words,
            Classification::Data { .. } | Classification::Str { .. } => self.data_lines += words,
            Classification::Entry { name } => self.symbols.request_entry(&name),
            Classification::Extern { .. } => {}
            Classification::Invalid => unreachable!("handled above"),
        }
    }

    fn into_result(self) -> AssemblerContext {
        AssemblerContext {
            expanded: self.expanded,
            symbols: self.symbols,
            ic: self.ic,
            code_lines: self.code_lines,
            data_lines: self.data_lines,
            diagnostics: self.diagnostics,
        }
    }
}

/// Runs the full line-by-line state machine over `source`, returning the
/// expanded stream, the populated symbol table, final counters, and any
/// accumulated diagnostics.
pub fn preprocess(source: &str) -> AssemblerContext {
    let mut pp = Preprocessor::new();

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        let tokens = tokenize(line);

        if tokens.len() == 1 {
            pp.handle_one_token(&tokens[0], line, line_number);
        } else if tokens.len() == 2 && tokens[0] == "macr" {
            pp.handle_macr_line(&tokens, line, line_number);
        } else {
            pp.handle_normal_line(line, &tokens, line_number);
        }
    }

    pp.into_result()
}
