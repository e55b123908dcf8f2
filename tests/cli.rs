//! End-to-end tests driving the `vasm` binary against real source files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn vasm_bin() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_BIN_EXE_vasm"))
}

/// Writes `source` to `<dir>/<name>.as` and returns the base path (without
/// extension) the CLI expects as its positional argument.
fn write_source(dir: &TempDir, name: &str, source: &str) -> String {
    let path = dir.path().join(format!("{name}.as"));
    fs::write(&path, source).expect("failed to write fixture source");
    dir.path().join(name).display().to_string()
}

#[test]
fn s1_basic_register_instruction_assembles() {
    let dir = TempDir::new().unwrap();
    let base = write_source(&dir, "prog", "mov r1, r2\nstop");

    Command::new(vasm_bin()).arg(&base).assert().success();

    let object = fs::read_to_string(dir.path().join("prog.ob")).unwrap();
    let mut lines = object.lines();
    assert_eq!(lines.next().unwrap(), "3 0");
    assert!(lines.next().unwrap().starts_with("100 "));
    assert!(lines.next().unwrap().starts_with("101 "));
}

#[test]
fn s2_data_directive_binds_label_and_emits_values() {
    let dir = TempDir::new().unwrap();
    let base = write_source(&dir, "prog", "LIST: .data 7, -3");

    Command::new(vasm_bin()).arg(&base).assert().success();

    let object = fs::read_to_string(dir.path().join("prog.ob")).unwrap();
    let lines: Vec<&str> = object.lines().collect();
    assert_eq!(lines[0], "0 2");
    assert_eq!(lines[1], "100 00007");
    assert_eq!(lines[2], format!("101 {:05o}", (-3i64) & 0x7FFF));
}

#[test]
fn s3_string_directive_emits_chars_and_terminator() {
    let dir = TempDir::new().unwrap();
    let base = write_source(&dir, "prog", "MSG: .string \"ab\"");

    Command::new(vasm_bin()).arg(&base).assert().success();

    let object = fs::read_to_string(dir.path().join("prog.ob")).unwrap();
    let lines: Vec<&str> = object.lines().collect();
    assert_eq!(lines[1], "100 00141");
    assert_eq!(lines[2], "101 00142");
    assert_eq!(lines[3], "102 00000");
}

#[test]
fn s4_extern_reference_is_written_to_ext_file() {
    let dir = TempDir::new().unwrap();
    let base = write_source(&dir, "prog", ".extern X\njmp X");

    Command::new(vasm_bin()).arg(&base).assert().success();

    let externs = fs::read_to_string(dir.path().join("prog.ext")).unwrap();
    assert_eq!(externs.trim(), "X 0101");
}

#[test]
fn s5_macro_expansion_matches_inline_equivalent() {
    let dir = TempDir::new().unwrap();
    let macro_base = write_source(&dir, "with_macro", "macr GREET\nprn #1\nendmacr\nGREET");
    let inline_base = write_source(&dir, "inline", "prn #1");

    Command::new(vasm_bin()).arg(&macro_base).assert().success();
    Command::new(vasm_bin()).arg(&inline_base).assert().success();

    let macro_obj = fs::read_to_string(dir.path().join("with_macro.ob")).unwrap();
    let inline_obj = fs::read_to_string(dir.path().join("inline.ob")).unwrap();
    assert_eq!(macro_obj, inline_obj);

    let expanded = fs::read_to_string(dir.path().join("with_macro.am")).unwrap();
    assert!(expanded.contains("prn #1"));
}

#[test]
fn s6_invalid_syntax_reports_error_and_skips_object_file() {
    let dir = TempDir::new().unwrap();
    let base = write_source(&dir, "prog", "mov");

    Command::new(vasm_bin())
        .arg(&base)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid syntax"));

    assert!(!dir.path().join("prog.ob").exists());
    // the expanded stream is still written even though pass 1 failed.
    assert!(dir.path().join("prog.am").exists());
}

#[test]
fn check_flag_reports_without_writing_files() {
    let dir = TempDir::new().unwrap();
    let base = write_source(&dir, "prog", "mov r1, r2\nstop");

    Command::new(vasm_bin()).arg(&base).arg("--check").assert().success();

    assert!(!dir.path().join("prog.ob").exists());
    assert!(!dir.path().join("prog.am").exists());
}

#[test]
fn entry_and_extern_files_are_absent_when_empty() {
    let dir = TempDir::new().unwrap();
    let base = write_source(&dir, "prog", "mov r1, r2\nstop");

    Command::new(vasm_bin()).arg(&base).assert().success();

    assert!(dir.path().join("prog.ob").exists());
    assert!(!dir.path().join("prog.ent").exists());
    assert!(!dir.path().join("prog.ext").exists());
}

#[test]
fn output_dir_flag_redirects_generated_files() {
    let dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let base = write_source(&dir, "prog", "stop");

    Command::new(vasm_bin())
        .arg(&base)
        .arg("-o")
        .arg(out_dir.path())
        .assert()
        .success();

    assert!(out_dir.path().join("prog.ob").exists());
}

#[test]
fn missing_source_file_is_a_fatal_io_error() {
    let dir = TempDir::new().unwrap();

    Command::new(vasm_bin())
        .arg(dir.path().join("does_not_exist").display().to_string())
        .assert()
        .failure()
        .code(2);
}
