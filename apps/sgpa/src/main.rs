//! # SGPA - THE BINARY
//!
//! Entry point for the `sgpa` command-line calculator.

use clap::Parser;
use sgpa::cli::{Cli, run};
use sgpa::logging::init_tracing;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
