//! CLI error handling specs
//!
//! Verify exit codes and messages for invalid configuration.

use crate::prelude::*;

#[test]
fn no_paths_is_a_usage_error() {
    cli().args(&[]).fails_with(2).stderr_has("<PATH>");
}

#[test]
fn only_test_args_is_a_usage_error() {
    cli().args(&["--", "-c=3"]).fails_with(2);
}

#[test]
fn unknown_print_selector_is_rejected() {
    cli()
        .args(&["--print-stdout", "sometimes", "t"])
        .fails_with(2)
        .stderr_has("sometimes");
}

#[test]
fn unknown_anomaly_kind_is_rejected() {
    cli()
        .args(&["--halt-on", "flaky-test", "t"])
        .fails_with(2)
        .stderr_has("flaky-test");
}

#[test]
fn halting_and_ignoring_the_same_kind_is_rejected() {
    cli()
        .args(&["--halt-on", "failed-test", "--ignore", "failed_test", "t"])
        .fails_with(2)
        .stderr_has("Error: failed_test is both halted on and ignored");
}

#[test]
fn missing_temp_root_is_an_internal_error() {
    let temp = Project::empty();
    temp.test("t", "exit 0");

    temp.harn()
        .args(&["--temp-root", "does/not/exist", "t"])
        .fails_with(1)
        .stderr_has("temp root does not exist: does/not/exist");
}
