use std::{fs::read_to_string, io::Write, path::Path};

use anyhow::Context;

use crate::{
	SnowError,
	environment::Environment,
	error::Diagnostic,
	interpreter::{Interpreter, value::Value},
	parser::Parser,
	scanner::Scanner,
	source::SourceUnit,
};

/// What running one source unit produced.
///
/// Either list may be empty. Diagnostics abort the run, so when there are any
/// there are no values.
#[derive(Debug, Default)]
pub struct Execution {
	pub values:      Vec<Value>,
	pub diagnostics: Vec<Diagnostic>,
}

impl Execution {
	fn failed(diagnostics: Vec<Diagnostic>) -> Self { Self { values: Vec::new(), diagnostics } }

	pub fn is_ok(&self) -> bool { self.diagnostics.is_empty() }
}

/// Scan, parse and run `code` against `environment`.
///
/// All lexical errors of the unit are reported together. Parsing and running
/// stop at the first error.
pub fn execute(source_name: &str, code: &str, environment: &Environment) -> Execution {
	let source = SourceUnit::new(source_name, code);

	let (tokens, diagnostics) = Scanner::new(&source).scan_tokens();
	tracing::debug!(source = source_name, tokens = tokens.len(), errors = diagnostics.len(), "scanned");
	if !diagnostics.is_empty() {
		return Execution::failed(diagnostics);
	}
	for token in &tokens {
		tracing::trace!(%token, at = %token.span.start);
	}

	let statements = match Parser::new(tokens).parse() {
		Ok(statements) => statements,
		Err(diagnostic) => return Execution::failed(vec![diagnostic]),
	};
	for statement in &statements {
		tracing::trace!(%statement);
	}

	match Interpreter::new(environment).interpret(&statements) {
		Ok(values) => {
			tracing::debug!(source = source_name, values = values.len(), "executed");
			Execution { values, diagnostics: Vec::new() }
		}
		Err(diagnostic) => Execution::failed(vec![diagnostic]),
	}
}

/// Front-end settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
	/// Color the diagnostic headers.
	pub colors:     bool,
	/// How many diagnostics of one run are shown at most.
	pub max_errors: usize,
}

impl Default for Options {
	fn default() -> Self { Self { colors: true, max_errors: 5 } }
}

/// Snower is the command line front-end of the snow interpreter.
pub struct Snower {
	options: Options,
}

impl Snower {
	pub fn new(options: Options) -> Self { Self { options } }

	/// Run a source file, printing every value it produced on its own line.
	pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SnowError> {
		let path = path.as_ref();
		let code = read_to_string(path).with_context(|| format!("Failed open source file '{}'", path.display()))?;
		let name = path.display().to_string();

		let execution = execute(&name, &code, &Environment::root(name.as_str()));
		for value in &execution.values {
			println!("{value}");
		}
		if execution.is_ok() {
			return Ok(());
		}
		eprintln!("{}", self.report(&execution.diagnostics));
		Err(SnowError::Diagnostics(execution.diagnostics))
	}

	/// Run the REPL prompt. Declarations live on from one line to the next.
	pub fn run_prompt(&self) {
		let environment = Environment::root("<repl>");
		let mut input = String::new();
		let stdin = std::io::stdin();
		loop {
			input.clear();
			print!("> ");
			if let Err(e) = std::io::stdout().flush() {
				eprintln!("Failed flush: {e}");
			}
			match stdin.read_line(&mut input) {
				Ok(0) => {
					println!("\nExited zsnow repl");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			let line = input.trim();
			if line.is_empty() {
				continue;
			}

			let execution = execute("<repl>", line, &environment);
			if !execution.is_ok() {
				eprintln!("{}", self.report(&execution.diagnostics));
			} else if !execution.values.is_empty() {
				let values: Vec<String> = execution.values.iter().map(ToString::to_string).collect();
				println!("{}", values.join(" "));
			}
		}
	}

	/// Render diagnostics, at most `max_errors` of them.
	pub fn report(&self, diagnostics: &[Diagnostic]) -> String {
		let shown = diagnostics.len().min(self.options.max_errors);
		let mut blocks: Vec<String> =
			diagnostics.iter().take(shown).map(|diagnostic| diagnostic.render(self.options.colors)).collect();
		if shown < diagnostics.len() {
			blocks.push(format!("Showing {shown}/{} errors", diagnostics.len()));
		}
		blocks.join("\n\n")
	}
}
