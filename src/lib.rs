//! A two-pass assembler for a small, fixed instruction set, featuring:
//! - a line tokenizer and macro preprocessor
//! - first-pass symbol collection and instruction-counter sizing
//! - second-pass binary encoding with absolute/relocatable/external linkage
//! - a `clap`-driven command-line driver

pub mod assembler;
pub mod cli;
pub mod logging;
