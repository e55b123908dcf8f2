//! Line tokenizer
//!
//! Splits a single source line into whitespace-separated tokens, treating
//! `,` and `:` as standalone single-character tokens and `;` as the start
//! of a comment that swallows the rest of the line.

/// A single token lexed out of a source line.
///
/// Separators (`,` and `:`) are kept as their own one-character tokens so
/// that callers can pattern-match on them without re-inspecting the raw
/// line text.
pub type Token = String;

/// Splits `line` into tokens, in order, ignoring anything from the first
/// unescaped `;` onward.
///
/// This is the single source of truth for tokenization; [`token_count`]
/// and [`nth_token`] are both expressed in terms of it so that indexing
/// and counting can never disagree.
pub fn tokenize(line: &str) -> Vec<Token> {
    let line = match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    };

    let mut tokens = Vec::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        if chars[i] == ',' || chars[i] == ':' {
            tokens.push(chars[i].to_string());
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() && chars[i] != ',' && chars[i] != ':' {
            i += 1;
        }
        tokens.push(chars[start..i].iter().collect());
    }

    tokens
}

/// Total number of tokens on `line`.
pub fn token_count(line: &str) -> usize {
    tokenize(line).len()
}

/// The token at `index`, or an empty string once past the end of the line.
///
/// Mirrors the reference assembler's "always-returns-a-token" convention
/// so that callers can probe a fixed number of leading positions without
/// first checking the length.
pub fn nth_token(line: &str, index: usize) -> Token {
    tokenize(line).into_iter().nth(index).unwrap_or_default()
}
