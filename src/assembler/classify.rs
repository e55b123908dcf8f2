//! Shared line classification: stripping leading labels and recognizing
//! the remainder as an instruction or a directive.
//!
//! Both passes classify a line the same way — pass 1 to size it and
//! validate it, pass 2 to re-derive the same structure for encoding — so
//! the logic lives here once.

use super::isa::{self, Arity, Directive, Instruction};

/// Peels off every leading `NAME :` pair from `tokens`, returning the
/// label names found (in order) and whatever tokens remain.
///
/// A line can define more than one label at the same address
/// (`A: B: mov r1, r2`), so this keeps going as long as the pattern
/// matches.
pub fn strip_labels(tokens: &[String]) -> (Vec<String>, &[String]) {
    let mut labels = Vec::new();
    let mut rest = tokens;
    while rest.len() >= 2 && rest[1] == ":" {
        labels.push(rest[0].clone());
        rest = &rest[2..];
    }
    (labels, rest)
}

/// What a line (after its labels have been stripped) turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Instruction { instr: Instruction, operands: Vec<String> },
    Data { values: Vec<String> },
    Str { literal: String },
    Entry { name: String },
    Extern { name: String },
    Invalid,
}

/// Classifies the tokens remaining after label-stripping.
///
/// An empty slice is not a valid argument here — callers should treat a
/// label-only line as "nothing more to classify" before reaching this.
pub fn classify(tokens: &[String]) -> Classification {
    if tokens.is_empty() {
        return Classification::Invalid;
    }

    if let Some(instr) = isa::lookup_instruction(&tokens[0]) {
        if let Some(operands) = instruction_operands(instr, tokens) {
            return Classification::Instruction { instr, operands };
        }
    }

    if let Some(directive) = isa::lookup_directive(&tokens[0]) {
        if let Some(classification) = directive_classification(directive, tokens) {
            return classification;
        }
    }

    Classification::Invalid
}

fn instruction_operands(instr: Instruction, tokens: &[String]) -> Option<Vec<String>> {
    match instr.arity {
        Arity::Zero => (tokens.len() == 1).then(Vec::new),
        Arity::One => (tokens.len() == 2).then(|| vec![tokens[1].clone()]),
        Arity::Two => {
            (tokens.len() == 4 && tokens[2] == ",").then(|| vec![tokens[1].clone(), tokens[3].clone()])
        }
    }
}

fn directive_classification(directive: Directive, tokens: &[String]) -> Option<Classification> {
    match directive {
        Directive::Data => data_values(tokens).map(|values| Classification::Data { values }),
        Directive::String => {
            if tokens.len() != 2 {
                return None;
            }
            let literal = &tokens[1];
            (literal.len() >= 2 && literal.starts_with('"') && literal.ends_with('"'))
                .then(|| Classification::Str { literal: literal.clone() })
        }
        Directive::Entry => (tokens.len() == 2).then(|| Classification::Entry { name: tokens[1].clone() }),
        Directive::Extern => (tokens.len() == 2).then(|| Classification::Extern { name: tokens[1].clone() }),
    }
}

/// Validates and extracts the comma-separated integer list after
/// `.data`: an even token count, with a literal comma at every odd
/// position among the operands.
fn data_values(tokens: &[String]) -> Option<Vec<String>> {
    if tokens.len() < 2 || tokens.len() % 2 != 0 {
        return None;
    }
    let mut values = Vec::new();
    let mut i = 1;
    while i < tokens.len() {
        values.push(tokens[i].clone());
        i += 1;
        if i < tokens.len() {
            if tokens[i] != "," {
                return None;
            }
            i += 1;
        }
    }
    Some(values)
}

/// The word count a classified line contributes to the instruction
/// counter: one opcode word plus operand words (with the register-pair
/// sharing rule), or the directive-specific word count. `.entry` and
/// `.extern` contribute nothing.
pub fn word_count(classification: &Classification) -> usize {
    match classification {
        Classification::Instruction { operands, .. } => 1 + operand_word_count(operands),
        Classification::Data { values } => values.len(),
        Classification::Str { literal } => literal.len() - 1,
        Classification::Entry { .. } | Classification::Extern { .. } => 0,
        Classification::Invalid => 0,
    }
}

fn operand_word_count(operands: &[String]) -> usize {
    match operands.len() {
        0 => 0,
        1 => 1,
        2 => {
            let both_register_like =
                isa::OperandKind::classify(&operands[0]).is_register_like()
                    && isa::OperandKind::classify(&operands[1]).is_register_like();
            if both_register_like { 1 } else { 2 }
        }
        _ => unreachable!("instruction_operands never returns more than two operands"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_label() {
        let tokens = vec!["LOOP".to_string(), ":".to_string(), "mov".to_string(), "r1".to_string()];
        let (labels, rest) = strip_labels(&tokens);
        assert_eq!(labels, vec!["LOOP"]);
        assert_eq!(rest, &["mov", "r1"]);
    }

    #[test]
    fn strips_multiple_labels_on_one_line() {
        let tokens: Vec<String> = "A : B : rts".split(' ').map(String::from).collect();
        let (labels, rest) = strip_labels(&tokens);
        assert_eq!(labels, vec!["A", "B"]);
        assert_eq!(rest, &["rts"]);
    }

    #[test]
    fn classifies_two_operand_instruction() {
        let tokens: Vec<String> = vec!["mov".into(), "r1".into(), ",".into(), "r2".into()];
        match classify(&tokens) {
            Classification::Instruction { instr, operands } => {
                assert_eq!(instr.opcode, 0);
                assert_eq!(operands, vec!["r1", "r2"]);
            }
            other => panic!("expected instruction, got {other:?}"),
        }
    }

    #[test]
    fn rejects_instruction_with_wrong_arity() {
        let tokens: Vec<String> = vec!["mov".into()];
        assert_eq!(classify(&tokens), Classification::Invalid);
    }

    #[test]
    fn classifies_data_directive() {
        let tokens: Vec<String> = vec![".data".into(), "1".into(), ",".into(), "-3".into()];
        assert_eq!(classify(&tokens), Classification::Data { values: vec!["1".into(), "-3".into()] });
    }

    #[test]
    fn rejects_data_with_missing_comma() {
        let tokens: Vec<String> = vec![".data".into(), "1".into(), "2".into()];
        assert_eq!(classify(&tokens), Classification::Invalid);
    }

    #[test]
    fn word_count_compresses_register_pairs() {
        let reg_pair = Classification::Instruction {
            instr: isa::lookup_instruction("mov").unwrap(),
            operands: vec!["r1".into(), "r2".into()],
        };
        assert_eq!(word_count(&reg_pair), 2);

        let mixed = Classification::Instruction {
            instr: isa::lookup_instruction("mov").unwrap(),
            operands: vec!["r1".into(), "LOOP".into()],
        };
        assert_eq!(word_count(&mixed), 3);
    }

    #[test]
    fn word_count_for_string_includes_null_terminator() {
        let str_directive = Classification::Str { literal: "\"ab\"".into() };
        assert_eq!(word_count(&str_directive), 3);
    }
}
