//! End-to-end tests for `commify`, `remove-leading-whitespace` and `trim`.

// `Command::cargo_bin` is deprecated in newer assert_cmd releases.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn bin(name: &str) -> Command {
    Command::cargo_bin(name).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// commify
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn commify_numeric_arguments() {
    bin("commify")
        .args(["132461363141346432", "6643145", "1234"])
        .assert()
        .success()
        .stdout("132,461,363,141,346,432\n6,643,145\n1,234\n");
}

#[test]
fn commify_filter_first_number_only() {
    bin("commify")
        .write_stdin("123456\t./target\n42\t./src 9999\n")
        .assert()
        .success()
        .stdout("123,456\t./target\n42\t./src 9999\n");
}

#[test]
fn commify_filter_all_numbers() {
    bin("commify")
        .args(["--all"])
        .write_stdin("total 1234567 of 7654321.12345\n")
        .assert()
        .success()
        .stdout("total 1,234,567 of 7,654,321.12345\n");
}

#[test]
fn commify_non_numeric_operand_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let sizes = dir.path().join("sizes.txt");
    std::fs::write(&sizes, "1048576 big\n").unwrap();

    bin("commify")
        .arg(&sizes)
        .assert()
        .success()
        .stdout("1,048,576 big\n");
}

#[test]
fn commify_filter_flag_forces_file_mode() {
    bin("commify")
        .args(["--filter", "12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("12345"));
}

// ─────────────────────────────────────────────────────────────────────────────
// remove-leading-whitespace
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn dedent_by_first_line() {
    bin("remove-leading-whitespace")
        .write_stdin("    first\n      second\n    third\n")
        .assert()
        .success()
        .stdout("first\n  second\nthird\n");
}

#[test]
fn dedent_noop_without_indent() {
    let input = "first\n    second\n";
    bin("remove-leading-whitespace")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(input);
}

// ─────────────────────────────────────────────────────────────────────────────
// trim
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn trim_modes() {
    let input = "  a  \n\tb\t\n";
    bin("trim").write_stdin(input).assert().success().stdout("a\nb\n");
    bin("trim")
        .arg("--rstrip")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("  a\n\tb\n");
    bin("trim")
        .arg("-l")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("a  \nb\t\n");
}

#[test]
fn trim_help() {
    bin("trim")
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("--ltrim"));
}
