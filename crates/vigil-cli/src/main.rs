//! Vigil command-line interface.
//!
//! Submits source to the Vigil composition-analysis service, waits for the
//! scan to finish and reports findings against severity thresholds.
//!
//! ```bash
//! vigil scan /src/acme-app --project acme-app --fail-on-high 0
//! ```
//!
//! Exit codes: 0 on success, 1 when thresholds were exceeded, 2 when there
//! was nothing to scan, 3 on any other failure.

mod args;
mod file_config;
mod render;
mod run;

use std::process::ExitCode;

use clap::Parser;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan(scan_args) => run::scan(scan_args).await,
    }
}
