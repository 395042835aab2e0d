// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use std::io::IsTerminal;

/// Determine if status lines should be colored.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
/// Status lines go to stderr, so that is the stream checked.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stderr().is_terminal()
}

/// Clap help styles, plain unless color is enabled.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    let header = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
    Styles::styled()
        .header(header)
        .usage(header)
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
