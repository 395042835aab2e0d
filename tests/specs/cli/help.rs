//! CLI help and usage specs

use crate::prelude::*;

#[test]
fn help_exits_zero_and_describes_usage() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage: harn [OPTIONS] <PATH>...")
        .stdout_has("--halt-on <KIND>")
        .stdout_has("--print-stderr <WHEN>");
}

#[test]
fn help_documents_exit_status() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("4  a test path failed validation")
        .stdout_has("8  one or more tests failed");
}

#[test]
fn version_exits_zero() {
    cli()
        .args(&["--version"])
        .passes()
        .stdout_has(concat!("harn ", env!("CARGO_PKG_VERSION")));
}
