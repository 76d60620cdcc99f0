//! End-to-end tests for the CLI surface.
//!
//! These cover the paths that never create a window: the help screen,
//! argument validation, and completion generation. Windowed behavior is
//! covered by the unit tests driving the core state machine directly.

use assert_cmd::Command;
use predicates::prelude::*;

fn screentimer() -> Command {
    Command::cargo_bin("screentimer").expect("binary built")
}

#[test]
fn no_arguments_prints_help_and_voices() {
    screentimer()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--sound-timing"))
        .stdout(predicate::str::contains("Available voices:"));
}

#[test]
fn help_flag_prints_help() {
    screentimer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Available voices:"));
}

#[test]
fn question_mark_flag_prints_help() {
    screentimer()
        .arg("-?")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available voices:"));
}

#[test]
fn help_wins_over_other_arguments() {
    screentimer()
        .args(["5", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_flag_fails_with_usage() {
    screentimer()
        .args(["5", "--bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_sound_value_fails() {
    screentimer()
        .args(["5", "--sound=kazoo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--sound"));
}

#[test]
fn unknown_timing_value_fails() {
    screentimer()
        .args(["5", "--speak-timing=sometime"])
        .assert()
        .failure();
}

#[test]
fn completions_are_generated() {
    screentimer()
        .arg("--completions=bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("screentimer"));
}
