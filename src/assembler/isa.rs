//! Fixed instruction set: the 16 mnemonics, the 4 directives, and operand
//! classification.

use regex::Regex;
use std::sync::OnceLock;

/// Number of operands a mnemonic expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Zero,
    One,
    Two,
}

/// A resolved instruction descriptor: opcode and arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: u8,
    pub arity: Arity,
}

/// Looks up a mnemonic, returning its opcode and operand arity.
///
/// Dispatches on the mnemonic text the same way the reference's
/// instruction table does, just expressed as a `match` instead of a
/// linear scan over a C array.
pub fn lookup_instruction(mnemonic: &str) -> Option<Instruction> {
    use Arity::*;
    let (opcode, arity) = match mnemonic {
        "mov" => (0, Two),
        "cmp" => (1, Two),
        "add" => (2, Two),
        "sub" => (3, Two),
        "lea" => (4, Two),
        "clr" => (5, One),
        "not" => (6, One),
        "inc" => (7, One),
        "dec" => (8, One),
        "jmp" => (9, One),
        "bne" => (10, One),
        "red" => (11, One),
        "prn" => (12, One),
        "jsr" => (13, One),
        "rts" => (14, Zero),
        "stop" => (15, Zero),
        _ => return None,
    };
    Some(Instruction { opcode, arity })
}

/// Linkage bit-flags occupying the low 3 bits of every encoded word.
/// Exactly one is set per word.
pub const ABSOLUTE: u16 = 0x4;
pub const RELOCATABLE: u16 = 0x2;
pub const EXTERNAL: u16 = 0x1;

/// Masks a word down to the machine's 15-bit width, as done immediately
/// before every value is written out.
pub fn mask15(value: i64) -> u16 {
    (value & 0x7FFF) as u16
}

/// One of the four assembler directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Data,
    Entry,
    Extern,
    String,
}

pub fn lookup_directive(word: &str) -> Option<Directive> {
    match word {
        ".data" => Some(Directive::Data),
        ".entry" => Some(Directive::Entry),
        ".extern" => Some(Directive::Extern),
        ".string" => Some(Directive::String),
        _ => None,
    }
}

/// True if `word` is one of the 16 mnemonics or 4 directives: names
/// reserved away from labels and macros.
pub fn is_reserved_word(word: &str) -> bool {
    lookup_instruction(word).is_some() || lookup_directive(word).is_some()
}

/// An operand's addressing mode, classified from the leading character(s)
/// of its token text. The numeric values double as the bit-flags used in
/// the encoded instruction word (immediate=1, direct=2, indirect-reg=4,
/// register=8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandKind {
    Immediate(i64),
    Direct(String),
    IndirectRegister(u8),
    Register(u8),
}

impl OperandKind {
    /// The addressing-mode bit-flag used in opcode words.
    pub fn mode_flag(&self) -> u16 {
        match self {
            OperandKind::Immediate(_) => 1,
            OperandKind::Direct(_) => 2,
            OperandKind::IndirectRegister(_) => 4,
            OperandKind::Register(_) => 8,
        }
    }

    /// True for the two modes that share a single operand word when both
    /// operands of a two-operand instruction use one of them.
    pub fn is_register_like(&self) -> bool {
        matches!(self, OperandKind::Register(_) | OperandKind::IndirectRegister(_))
    }

    /// Classifies a raw operand token into its addressing mode, purely
    /// from its leading character(s) — the same rule the reference
    /// assembler uses, with no range-checking of the register digit at
    /// classification time.
    pub fn classify(token: &str) -> OperandKind {
        let mut chars = token.chars();
        match chars.next() {
            Some('#') => OperandKind::Immediate(parse_signed_int(chars.as_str())),
            Some('*') => {
                // `*rN`: skip the `*` and the `r` before reading digits.
                let after_r = chars.as_str().strip_prefix('r').unwrap_or(chars.as_str());
                OperandKind::IndirectRegister(parse_register_digits(after_r))
            }
            Some('r') => OperandKind::Register(parse_register_digits(chars.as_str())),
            _ => OperandKind::Direct(token.to_string()),
        }
    }
}

fn int_literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d+$").unwrap())
}

/// Parses a signed decimal integer, the same grammar accepted for `.data`
/// values and `#immediate` operands. Returns 0 on malformed input; pass 1
/// is expected to have already rejected syntactically invalid lines, so
/// this is only reached for source that passed validation.
pub fn parse_signed_int(text: &str) -> i64 {
    if int_literal_re().is_match(text) {
        text.parse().unwrap_or(0)
    } else {
        0
    }
}

pub fn is_int_literal(text: &str) -> bool {
    int_literal_re().is_match(text)
}

fn register_digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+").unwrap())
}

/// Parses the leading run of digits in `text` as a register number.
///
/// Mirrors the reference's `sscanf("%d", ...)` call: it does not verify
/// the result is in `0..=7`, so `r9` parses to `9` rather than being
/// rejected here. A register out of range only matters once it is
/// shifted into an encoded word, which is no worse than the reference.
fn parse_register_digits(text: &str) -> u8 {
    register_digits_re()
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
