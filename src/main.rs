use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zsnow::{SnowError, Snower, cli::*};

/// Logging stays off unless RUST_LOG is set.
fn init_tracing() {
	if std::env::var("RUST_LOG").is_ok() {
		tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
	}
}

fn main() -> ExitCode {
	init_tracing();
	let cli = Cli::parse();
	let snower = Snower::new(cli.options());

	match cli.mode {
		Mode::File { path } => match snower.run_file(&path) {
			Ok(()) => ExitCode::SUCCESS,
			// Already reported.
			Err(SnowError::Diagnostics(_)) => ExitCode::FAILURE,
			Err(e) => {
				eprintln!("Failed run file: {e}");
				ExitCode::FAILURE
			}
		},
		Mode::Repl => {
			snower.run_prompt();
			ExitCode::SUCCESS
		}
	}
}
