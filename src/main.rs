//! stubsmith
//!
//! Schema-driven migration generator: normalized table schemas in, Laravel
//! migration classes out.

use std::process::ExitCode;
use stubsmith_cli::{Cli, Parser};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins; --verbose only moves the default
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(version = stubsmith_cli::VERSION, "stubsmith starting");

    match stubsmith_cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
