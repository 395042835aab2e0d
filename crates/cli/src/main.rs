// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! harn - run a directory of executables as a test suite

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod env;
mod options;

use anyhow::Result;
use clap::Parser;
use harn_core::{exit_code, ConfigError, Policy, Reporter, RunError};
use options::Cli;
use tokio::signal::unix::{signal, Signal, SignalKind};

const SIGHUP: i32 = 1;
const SIGINT: i32 = 2;
const SIGQUIT: i32 = 3;
const SIGTERM: i32 = 15;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            let msg = format_error(&e);
            if !msg.is_empty() {
                eprintln!("Error: {}", msg);
            }
            error_code(&e)
        }
    };
    std::process::exit(code);
}

/// Map an error onto the documented exit status contract.
fn error_code(err: &anyhow::Error) -> i32 {
    if let Some(run_err) = err.downcast_ref::<RunError>() {
        return run_err.exit_code();
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return exit_code::CONFIG;
    }
    exit_code::INTERNAL
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<i32> {
    // Usage errors exit 2 and --help/--version exit 0 inside clap
    let cli = Cli::parse();
    setup_logging();

    let config = cli.into_config()?;
    let mut reporter = Reporter::new(
        std::io::stdout(),
        std::io::stderr(),
        Policy::from_config(&config),
    )
    .quiet(config.quiet())
    .colorize(color::should_colorize());

    let mut shutdown = Shutdown::install()?;

    // Dropping the run future on a signal kills the in-flight test and
    // removes the workspace before we exit.
    tokio::select! {
        result = harn_core::run(&config, tokio::io::stdin(), &mut reporter) => {
            result?;
            Ok(exit_code::SUCCESS)
        }
        signal = shutdown.recv() => {
            tracing::info!(signal, "run cancelled");
            Ok(128 + signal)
        }
    }
}

/// Listener for the signals that would otherwise kill us without cleanup.
struct Shutdown {
    sighup: Signal,
    sigint: Signal,
    sigquit: Signal,
    sigterm: Signal,
}

impl Shutdown {
    fn install() -> std::io::Result<Self> {
        Ok(Self {
            sighup: signal(SignalKind::hangup())?,
            sigint: signal(SignalKind::interrupt())?,
            sigquit: signal(SignalKind::quit())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for the next signal and return its number.
    async fn recv(&mut self) -> i32 {
        tokio::select! {
            _ = self.sighup.recv() => SIGHUP,
            _ = self.sigint.recv() => SIGINT,
            _ = self.sigquit.recv() => SIGQUIT,
            _ = self.sigterm.recv() => SIGTERM,
        }
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = env::log_filter()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
