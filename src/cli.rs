use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::Options;

#[derive(Parser, Debug)]
#[command(name = "zsnow", version, about, after_long_help = "Set RUST_LOG=zsnow=trace to dump tokens and syntax trees.")]
pub struct Cli {
	/// Maximum number of errors shown for one run
	#[arg(long, global = true, default_value_t = 5)]
	pub max_errors: usize,
	/// Print diagnostics without colors
	#[arg(long, global = true)]
	pub no_color:   bool,
	#[command(subcommand)]
	pub mode:       Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Run a source file
	File { path: PathBuf },
	/// Start an interactive prompt
	Repl,
}

impl Cli {
	pub fn options(&self) -> Options { Options { colors: !self.no_color, max_errors: self.max_errors } }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_arguments() {
		let cli = Cli::try_parse_from(["zsnow", "file", "main.snow"]).unwrap();
		assert!(matches!(cli.mode, Mode::File { ref path } if path == &PathBuf::from("main.snow")));
		assert_eq!(cli.options(), Options::default());

		let cli = Cli::try_parse_from(["zsnow", "--no-color", "repl", "--max-errors", "2"]).unwrap();
		assert!(matches!(cli.mode, Mode::Repl));
		assert_eq!(cli.options(), Options { colors: false, max_errors: 2 });

		assert!(Cli::try_parse_from(["zsnow"]).is_err());
	}
}
