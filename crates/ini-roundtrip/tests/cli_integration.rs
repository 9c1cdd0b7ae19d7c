//! Integration tests for the `ini-roundtrip` binary.
//!
//! Each test pipes INI text into the built binary and checks the exit status
//! and what landed on stdout and stderr.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Runs the binary with `input` on stdin.
fn run_binary(input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ini-roundtrip"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary must start");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("write stdin");

    child.wait_with_output().expect("binary must finish")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is UTF-8")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("stderr is UTF-8")
}

// ── Success ───────────────────────────────────────────────────────────────────

#[test]
fn test_single_section_is_echoed() {
    let output = run_binary("[a]\nkey = value\n");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "[a]\nkey = value\n\n");
    assert!(stderr(&output).is_empty(), "stderr: {}", stderr(&output));
}

#[test]
fn test_two_sections_keep_order() {
    let output = run_binary("[a]\nx=1\n[b]\ny=2\n");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "[a]\nx = 1\n\n[b]\ny = 2\n\n");
}

#[test]
fn test_empty_input_gives_empty_output() {
    let output = run_binary("");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_output_fed_back_is_unchanged() {
    let first = run_binary("[DEFAULT]\nroot=/srv\n[s]\nK : v ; note\nlong = a\n  b\n");
    assert!(first.status.success());

    let second = run_binary(&stdout(&first));

    assert!(second.status.success());
    assert_eq!(stdout(&first), stdout(&second));
}

// ── Failure ───────────────────────────────────────────────────────────────────

#[test]
fn test_entry_before_section_fails_with_diagnostic() {
    let output = run_binary("foo = bar\n[a]\nk = v\n");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no output on parse failure");
    let err = stderr(&output);
    assert!(err.contains("line 1"), "stderr: {err}");
    assert!(err.contains("foo = bar"), "stderr: {err}");
}

#[test]
fn test_duplicate_section_fails_with_diagnostic() {
    let output = run_binary("[dup]\nk=1\n[dup]\nk=2\n");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let err = stderr(&output);
    assert!(err.contains("duplicate section"), "stderr: {err}");
    assert!(err.contains("dup"), "stderr: {err}");
}

#[test]
fn test_invalid_utf8_fails() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ini-roundtrip"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary must start");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(&[b'[', 0xC3, 0x28, b']', b'\n'])
        .expect("write stdin");

    let output = child.wait_with_output().expect("binary must finish");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}
