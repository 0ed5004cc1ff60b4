pub mod interpreter;
pub mod parser;
pub mod scanner;

use std::fmt::{Display, Write};

use crate::{environment::Environment, source::Span};

/// SnowError is the top-level error type for the command line front-end.
#[derive(thiserror::Error, Debug)]
pub enum SnowError {
	/// Internal or I/O failure, never caused by the program being run
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// Diagnostics reported while running a source unit
	#[error("Generated {} diagnostics", .0.len())]
	Diagnostics(Vec<Diagnostic>),
}

/// The stage a diagnostic was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFamily {
	Lexical,
	Syntax,
	Runtime,
}

/// Kind tag of a [`Diagnostic`], printed as its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	IllegalCharacter,
	TrailingDot,
	MultipleDots,
	UnterminatedInlineComment,
	UnterminatedString,
	ExpectedToken,
	InvalidTokenType,
	TooBigValue,
	BreakOutsideOfLoop,
	ContinueOutsideOfLoop,
	ReturnOutsideOfFunction,
	InvalidOpToken,
	Value,
	DivisionByZero,
	VariableAlreadyDeclared,
	UndefinedVariable,
	ConstantVariableAssignment,
	InvalidAttribute,
	UnableToAssignAttribute,
	InvalidCall,
	Argument,
}

impl ErrorKind {
	pub fn family(&self) -> ErrorFamily {
		use ErrorKind::*;
		match self {
			IllegalCharacter | TrailingDot | MultipleDots | UnterminatedInlineComment | UnterminatedString => {
				ErrorFamily::Lexical
			}
			ExpectedToken | InvalidTokenType | TooBigValue | BreakOutsideOfLoop | ContinueOutsideOfLoop
			| ReturnOutsideOfFunction => ErrorFamily::Syntax,
			InvalidOpToken | Value | DivisionByZero | VariableAlreadyDeclared | UndefinedVariable
			| ConstantVariableAssignment | InvalidAttribute | UnableToAssignAttribute | InvalidCall | Argument => {
				ErrorFamily::Runtime
			}
		}
	}
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ErrorKind::*;
		let name = match self {
			IllegalCharacter => "Illegal character error",
			TrailingDot => "Trailing dot error",
			MultipleDots => "Multiple dots error",
			UnterminatedInlineComment => "Unterminated inline comment error",
			UnterminatedString => "Unterminated string error",
			ExpectedToken => "Expected token error",
			InvalidTokenType => "Invalid token type error",
			TooBigValue => "Too big value error",
			BreakOutsideOfLoop => "Break outside of loop error",
			ContinueOutsideOfLoop => "Continue outside of loop error",
			ReturnOutsideOfFunction => "Return outside of function error",
			InvalidOpToken => "Invalid op token error",
			Value => "Value error",
			DivisionByZero => "Division by zero error",
			VariableAlreadyDeclared => "Variable already declared error",
			UndefinedVariable => "Undefined variable error",
			ConstantVariableAssignment => "Constant variable assignment error",
			InvalidAttribute => "Invalid attribute error",
			UnableToAssignAttribute => "Unable to assign attribute error",
			InvalidCall => "Invalid call error",
			Argument => "Argument error",
		};
		f.write_str(name)
	}
}

/// A located error report.
///
/// Runtime diagnostics keep the environment they were raised in, which is
/// unwound into a call stack when rendered.
#[derive(Debug, Clone)]
pub struct Diagnostic {
	pub kind:    ErrorKind,
	pub message: String,
	pub tip:     Option<String>,
	pub span:    Span,
	pub stack:   Option<Environment>,
}

impl Diagnostic {
	pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
		Self { kind, message: message.into(), tip: None, span, stack: None }
	}

	pub fn with_tip(mut self, tip: Option<String>) -> Self {
		self.tip = tip;
		self
	}

	pub fn with_stack(mut self, environment: &Environment) -> Self {
		self.stack = Some(environment.clone());
		self
	}

	/// Render the diagnostic the way it is shown to a user.
	///
	/// ``` text
	/// Stack with most recent last:
	/// In file 'main.snow'
	/// Division by zero error: unable to divide 'INT' with value of '10' by 'INT' with value of '0'
	/// 1 | 10 / 0
	///     ^^^^^^
	/// ```
	pub fn render(&self, colors: bool) -> String { Rendered { diagnostic: self, colors }.to_string() }

	fn write_to(&self, out: &mut impl Write, colors: bool) -> std::fmt::Result {
		if let Some(environment) = &self.stack {
			out.write_str("Stack with most recent last:\n")?;
			for frame in environment.frames() {
				writeln!(out, "{frame}")?;
			}
		}

		if colors {
			writeln!(out, "\x1b[31m{}\x1b[0m: {}", self.kind, self.message)?;
		} else {
			writeln!(out, "{}: {}", self.kind, self.message)?;
		}

		if let Some(tip) = &self.tip {
			writeln!(out, "{tip}")?;
		}

		let start = self.span.start;
		let end = self.span.end;
		let code = self.span.source.line(start.line).unwrap_or_default();
		let gutter = format!("{} | ", start.line);
		writeln!(out, "{gutter}{code}")?;

		// Tabs are kept so the carets stay aligned whatever the tab width is.
		let padding: String = code.chars().take(start.column).map(|c| if c == '\t' { '\t' } else { ' ' }).collect();
		let width = if end.line == start.line {
			end.column.saturating_sub(start.column)
		} else {
			code.chars().count().saturating_sub(start.column)
		};
		write!(out, "{}{padding}{}", " ".repeat(gutter.len()), "^".repeat(width.max(1)))
	}
}

struct Rendered<'a> {
	diagnostic: &'a Diagnostic,
	colors:     bool,
}

impl Display for Rendered<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.diagnostic.write_to(f, self.colors) }
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.write_to(f, false) }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::source::{Position, SourceUnit};

	fn span(code: &str, line: usize, start: usize, end: usize) -> Span {
		let source = SourceUnit::new("main.snow", code);
		Span::new(Position::new(line, start, 0), Position::new(line, end, 0), source)
	}

	#[test]
	fn render_plain() {
		let diagnostic = Diagnostic::new(ErrorKind::IllegalCharacter, "illegal character '@'", span("1 @ 2", 1, 2, 3));
		assert_eq!(diagnostic.render(false), "Illegal character error: illegal character '@'\n1 | 1 @ 2\n      ^");
	}

	#[test]
	fn render_tip_and_colors() {
		let diagnostic = Diagnostic::new(ErrorKind::TrailingDot, "trailing dots are not allowed", span("x\n3.", 2, 1, 2))
			.with_tip(Some("To define a float add a zero after: '3.0'".to_string()));
		assert_eq!(
			diagnostic.render(true),
			"\x1b[31mTrailing dot error\x1b[0m: trailing dots are not allowed\nTo define a float add a zero after: \
			 '3.0'\n2 | 3.\n     ^"
		);
	}

	#[test]
	fn display_is_the_plain_rendering() {
		let diagnostic = Diagnostic::new(ErrorKind::Value, "boom", span("1 + true", 1, 0, 8))
			.with_stack(&Environment::root("main.snow"))
			.with_tip(Some("tip".to_string()));
		let mut written = String::new();
		write!(written, "{diagnostic}").unwrap();
		assert_eq!(written, diagnostic.render(false));
		assert_eq!(
			written,
			"Stack with most recent last:\nIn file 'main.snow'\nValue error: boom\ntip\n1 | 1 + true\n    ^^^^^^^^"
		);
	}

	#[test]
	fn render_keeps_tabs() {
		let diagnostic = Diagnostic::new(ErrorKind::UndefinedVariable, "missing", span("\tfoo", 1, 1, 4));
		assert_eq!(diagnostic.to_string(), "Undefined variable error: missing\n1 | \tfoo\n    \t^^^");
	}

	#[test]
	fn render_multi_line_span() {
		let source = SourceUnit::new("main.snow", "while x {\n  y\n}");
		let span = Span::new(Position::new(1, 0, 0), Position::new(3, 1, 15), source);
		let diagnostic = Diagnostic::new(ErrorKind::Value, "boom", span);
		assert_eq!(diagnostic.to_string(), "Value error: boom\n1 | while x {\n    ^^^^^^^^^");
	}

	#[test]
	fn render_stack() {
		let root = Environment::root("main.snow");
		let function = root.child(Some("add"), 3, "main.snow");
		let block = function.child(None, 4, "main.snow");
		let diagnostic = Diagnostic::new(ErrorKind::Value, "boom", span("a", 1, 0, 1)).with_stack(&block);
		assert_eq!(
			diagnostic.to_string(),
			"Stack with most recent last:\nIn file 'main.snow'\nIn 'add' starting at line 3 in file 'main.snow'\nIn \
			 anonymous block starting at line 4 in file 'main.snow'\nValue error: boom\n1 | a\n    ^"
		);
	}

	#[test]
	fn families() {
		assert_eq!(ErrorKind::UnterminatedString.family(), ErrorFamily::Lexical);
		assert_eq!(ErrorKind::TooBigValue.family(), ErrorFamily::Syntax);
		assert_eq!(ErrorKind::DivisionByZero.family(), ErrorFamily::Runtime);
	}
}
