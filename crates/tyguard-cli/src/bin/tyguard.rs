#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::{IsTerminal, Write};

use tyguard_cli::args::CliArgs;
use tyguard_cli::driver;

fn main() -> Result<()> {
    // Initialize tracing if TYGUARD_LOG or RUST_LOG is set (zero cost otherwise).
    // Supports TYGUARD_LOG_FORMAT=tree|json|text.
    tyguard_common::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let color = args
        .pretty
        .unwrap_or_else(|| std::io::stderr().is_terminal());

    let output = driver::run(&args, color)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    if !output.stderr.is_empty() {
        eprint!("{}", output.stderr);
    }

    std::process::exit(output.status);
}
