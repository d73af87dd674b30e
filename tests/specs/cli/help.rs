//! CLI flag specs.

use crate::prelude::*;

#[test]
fn tsh_help_shows_usage() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--verbose")
        .stdout_has("--no-prompt");
}

#[test]
fn tsh_short_help_shows_usage() {
    cli().args(&["-h"]).passes().stdout_has("Usage:");
}

#[test]
fn tsh_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn prompt_is_printed_by_default() {
    cli().script(&["quit"]).passes().stdout_eq("tsh> ");
}

#[test]
fn no_prompt_flag_suppresses_prompt() {
    tsh().script(&["jobs", "quit"]).passes().stdout_eq("");
}

#[test]
fn end_of_input_exits_cleanly() {
    tsh().script(&[]).passes().stdout_eq("");
}

#[test]
fn verbose_logs_go_to_stderr() {
    let run = tsh()
        .args(&["-v"])
        .script(&["/bin/echo hi"])
        .passes()
        .stdout_eq("hi\n");
    assert!(run.stderr.contains("added job"), "{}", run.stderr);
}
