//! Pretty-printing messages to the console

use colored::Colorize;

use crate::assembler::error::Diagnostic;

/// Pretty-print an error message to the console
pub fn error(error_message: String) {
    let error_title = "error:".red().bold();
    eprintln!("{} {}", error_title, error_message);
}

/// Pretty-print a warning message to the console
pub fn warning(message: String, line_number: usize) {
    let warning = "warning:".yellow().bold();
    eprintln!("{} line {}: {}", warning, line_number, message);
}

/// Pretty-print one accumulated pass-1 diagnostic, with the offending
/// source line echoed beneath it.
pub fn diagnostic(diagnostic: &Diagnostic) {
    let error_title = "error:".red().bold();
    eprintln!("{} line {}: {}", error_title, diagnostic.line_number, diagnostic.kind);
    eprintln!("  {}", diagnostic.line_text.trim().dimmed());
}

/// Pretty-print the final success/failure line once assembly finishes.
pub fn summary(n_errors: usize) {
    if n_errors == 0 {
        println!("{}", "assembly succeeded".green().bold());
    } else {
        let word = if n_errors == 1 { "error" } else { "errors" };
        println!("{}", format!("assembly failed with {n_errors} {word}").red().bold());
    }
}

/// Verbose-only progress line naming a file that was opened or written.
pub fn verbose(message: &str) {
    println!("{} {}", "note:".blue().bold(), message);
}
