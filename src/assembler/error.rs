//! Diagnostics accumulated while assembling.

use std::fmt;

/// The kind of problem found on a source line, independent of where the
/// line came from (a plain line, or one expanded from a macro body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// `endmacr` appeared while not recording a macro.
    EndMacroOutsideMacro,
    /// A lone token that is neither a reserved word nor a known macro name.
    UndefinedMacroUse { name: String },
    /// `macr <name>` where `<name>` is already defined.
    DuplicateMacro { name: String },
    /// A label name collides with a mnemonic or directive.
    ReservedLabel { name: String },
    /// A label name is already bound.
    DuplicateLabel { name: String },
    /// The line is neither a valid instruction nor a valid directive.
    InvalidSyntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::EndMacroOutsideMacro => write!(f, "\"endmacr\" outside of a macro definition"),
            ErrorKind::UndefinedMacroUse { name } => write!(f, "undefined macro usage \"{name}\""),
            ErrorKind::DuplicateMacro { name } => write!(f, "duplicate macro name definition \"{name}\""),
            ErrorKind::ReservedLabel { name } => write!(f, "label \"{name}\" reuses a reserved word"),
            ErrorKind::DuplicateLabel { name } => write!(f, "duplicate label definition \"{name}\""),
            ErrorKind::InvalidSyntax => write!(f, "invalid syntax"),
        }
    }
}

/// A single accumulated diagnostic, tied to the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub line_number: usize,
    pub line_text: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.kind)
    }
}

/// Fatal I/O failures that abort the driver outright, as opposed to the
/// accumulated, per-line [`Diagnostic`]s produced by pass 1.
#[derive(Debug)]
pub enum IoFailure {
    OpenInput(std::io::Error),
    WriteOutput { path: String, source: std::io::Error },
}

impl fmt::Display for IoFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoFailure::OpenInput(err) => write!(f, "failed to open source file: {err}"),
            IoFailure::WriteOutput { path, source } => {
                write!(f, "failed to write \"{path}\": {source}")
            }
        }
    }
}

impl std::error::Error for IoFailure {}
