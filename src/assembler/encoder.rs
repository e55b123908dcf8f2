//! Pass 2: re-reads the expanded stream and turns it into object words,
//! external references, and a sorted entries listing.

use super::classify::{self, Classification};
use super::isa::{self, OperandKind};
use super::output;
use super::symbol_table::{Address, SymbolTable};
use super::token::tokenize;

/// Everything pass 2 produces, as in-memory text ready to be written (or
/// asserted against in tests) without touching the filesystem.
pub struct EncodeResult {
    pub object_lines: Vec<String>,
    pub extern_lines: Vec<String>,
    pub entry_lines: Vec<String>,
}

/// Runs pass 2 over `expanded` (the macro-expanded stream produced by
/// pass 1), using the label table `symbols` built during pass 1.
///
/// Assumes pass 1 reported no diagnostics: every line here is expected to
/// classify successfully, the same way it did while sizing.
pub fn encode(expanded: &str, symbols: &SymbolTable, code_lines: u32, data_lines: u32) -> EncodeResult {
    let mut object_lines = vec![output::object_header_line(code_lines, data_lines)];
    let mut extern_lines = Vec::new();
    let mut ic: Address = 100;

    for line in expanded.lines() {
        let tokens = tokenize(line);
        let (_labels, rest) = classify::strip_labels(&tokens);
        if rest.is_empty() {
            continue;
        }

        match classify::classify(rest) {
            Classification::Instruction { instr, operands } => {
                encode_instruction(instr.opcode, instr.arity, &operands, symbols, &mut ic, &mut object_lines, &mut extern_lines);
            }
            Classification::Data { values } => {
                for value in values {
                    let word = isa::mask15(isa::parse_signed_int(&value));
                    object_lines.push(output::object_word_line(ic, word));
                    ic += 1;
                }
            }
            Classification::Str { literal } => {
                let interior = &literal[1..literal.len() - 1];
                for ch in interior.chars() {
                    let word = (ch as u32 & 0xFF) as u16;
                    object_lines.push(output::object_word_line(ic, word));
                    ic += 1;
                }
                object_lines.push(output::object_word_line(ic, 0));
                ic += 1;
            }
            Classification::Entry { .. } | Classification::Extern { .. } | Classification::Invalid => {}
        }
    }

    let entry_lines = symbols
        .resolved_entries()
        .into_iter()
        .map(|entry| output::entry_line(&entry.name, entry.address))
        .collect();

    EncodeResult { object_lines, extern_lines, entry_lines }
}

fn encode_instruction(
    opcode: u8,
    arity: isa::Arity,
    operands: &[String],
    symbols: &SymbolTable,
    ic: &mut Address,
    object_lines: &mut Vec<String>,
    extern_lines: &mut Vec<String>,
) {
    use isa::Arity;

    let opcode = opcode as u16;

    match arity {
        Arity::Zero => {
            let word = isa::mask15(((opcode << 11) | isa::ABSOLUTE) as i64);
            object_lines.push(output::object_word_line(*ic, word));
            *ic += 1;
        }
        Arity::One => {
            let dst = OperandKind::classify(&operands[0]);
            let header = isa::mask15(((opcode << 11) | (dst.mode_flag() << 3) | isa::ABSOLUTE) as i64);
            object_lines.push(output::object_word_line(*ic, header));
            *ic += 1;

            let word = encode_operand(&dst, 3, symbols, *ic, extern_lines);
            object_lines.push(output::object_word_line(*ic, word));
            *ic += 1;
        }
        Arity::Two => {
            let src = OperandKind::classify(&operands[0]);
            let dst = OperandKind::classify(&operands[1]);
            let header = isa::mask15(
                ((opcode << 11) | (src.mode_flag() << 7) | (dst.mode_flag() << 3) | isa::ABSOLUTE) as i64,
            );
            object_lines.push(output::object_word_line(*ic, header));
            *ic += 1;

            if src.is_register_like() && dst.is_register_like() {
                let src_reg = register_value(&src);
                let dst_reg = register_value(&dst);
                let word = isa::mask15((((src_reg as u16) << 6) | ((dst_reg as u16) << 3) | isa::ABSOLUTE) as i64);
                object_lines.push(output::object_word_line(*ic, word));
                *ic += 1;
            } else {
                let src_word = encode_operand(&src, 6, symbols, *ic, extern_lines);
                object_lines.push(output::object_word_line(*ic, src_word));
                *ic += 1;

                let dst_word = encode_operand(&dst, 3, symbols, *ic, extern_lines);
                object_lines.push(output::object_word_line(*ic, dst_word));
                *ic += 1;
            }
        }
    }
}

fn register_value(kind: &OperandKind) -> u8 {
    match kind {
        OperandKind::Register(r) | OperandKind::IndirectRegister(r) => *r,
        _ => unreachable!("register_value is only called on register-like operands"),
    }
}

/// Encodes a single operand into its own word. `shift` is the position
/// (6 for source, 3 for destination) used for register/indirect-register
/// operands; immediate and direct operands always encode at a fixed
/// shift of 3 regardless of position, matching the reference exactly.
fn encode_operand(kind: &OperandKind, shift: u8, symbols: &SymbolTable, ic: Address, extern_lines: &mut Vec<String>) -> u16 {
    match kind {
        OperandKind::Immediate(value) => isa::mask15((value << 3) | isa::ABSOLUTE as i64),
        OperandKind::Register(r) | OperandKind::IndirectRegister(r) => {
            isa::mask15((((*r as u16) << shift) | isa::ABSOLUTE) as i64)
        }
        OperandKind::Direct(name) => match symbols.resolve_label(name) {
            Some(address) => isa::mask15(((address << 3) as i64) | isa::RELOCATABLE as i64),
            None => {
                extern_lines.push(output::extern_line(name, ic));
                isa::EXTERNAL
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::preprocessor::preprocess;

    fn run(source: &str) -> EncodeResult {
        let pass1 = preprocess(source);
        assert_eq!(pass1.diagnostics, Vec::new(), "unexpected diagnostics: {:?}", pass1.diagnostics);
        encode(&pass1.expanded, &pass1.symbols, pass1.code_lines, pass1.data_lines)
    }

    #[test]
    fn register_pair_compresses_to_two_words() {
        let result = run("mov r1, r2");
        assert_eq!(result.object_lines.len(), 3); // header + 2 words
        let expected_header = (0u16 << 11) | (8 << 7) | (8 << 3) | isa::ABSOLUTE;
        assert_eq!(result.object_lines[1], format!("100 {expected_header:05o}"));
        let expected_operand = (1u16 << 6) | (2 << 3) | isa::ABSOLUTE;
        assert_eq!(result.object_lines[2], format!("101 {expected_operand:05o}"));
    }

    #[test]
    fn data_directive_round_trips_values() {
        let result = run("LIST: .data 7, -3");
        assert_eq!(result.object_lines[0], "0 2");
        assert_eq!(result.object_lines[1], "100 00007");
        assert_eq!(result.object_lines[2], format!("101 {:05o}", isa::mask15(-3)));
    }

    #[test]
    fn string_directive_emits_chars_and_terminator() {
        let result = run(r#"MSG: .string "ab""#);
        assert_eq!(result.object_lines[1], "100 00141");
        assert_eq!(result.object_lines[2], "101 00142");
        assert_eq!(result.object_lines[3], "102 00000");
    }

    #[test]
    fn extern_reference_is_recorded_at_operand_word_ic() {
        let result = run(".extern X\njmp X");
        assert_eq!(result.extern_lines, vec!["X 0101"]);
    }

    #[test]
    fn entries_are_sorted_by_resolved_address() {
        let pass1 = preprocess("B: stop\nA: stop\n.entry B\n.entry A");
        assert_eq!(pass1.diagnostics, Vec::new());
        let result = encode(&pass1.expanded, &pass1.symbols, pass1.code_lines, pass1.data_lines);
        assert_eq!(result.entry_lines, vec!["B 100", "A 101"]);
    }
}
