use crate::{
	error::{Diagnostic, ErrorKind},
	source::Span,
};

/// Types of scanning errors.
///
/// None of them stop the scanner, they are collected and reported together.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorType {
	/// A character that starts no token.
	#[error("illegal character '{0}'")]
	IllegalCharacter(char),
	/// `3.` with no digit after the dot.
	#[error("trailing dots are not allowed")]
	TrailingDot { number: String },
	/// `1.2.3` or `1.2.`
	#[error("more than one dot while defining a float is not allowed")]
	MultipleDots { number: String },
	/// `#/` without a closing `/#`.
	#[error("the inline comment was never closed")]
	UnterminatedInlineComment,
	/// A string hit a newline or the end of input before its delimiter.
	#[error("the string was never closed")]
	UnterminatedString { delimiter: char, content: String },
}

impl ScanErrorType {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::IllegalCharacter(_) => ErrorKind::IllegalCharacter,
			Self::TrailingDot { .. } => ErrorKind::TrailingDot,
			Self::MultipleDots { .. } => ErrorKind::MultipleDots,
			Self::UnterminatedInlineComment => ErrorKind::UnterminatedInlineComment,
			Self::UnterminatedString { .. } => ErrorKind::UnterminatedString,
		}
	}

	pub fn tip(&self) -> Option<String> {
		match self {
			Self::IllegalCharacter(_) => None,
			Self::TrailingDot { number } => Some(format!("To define a float add a zero after: '{number}.0'")),
			Self::MultipleDots { number } => Some(format!("Remove the dot: '{number}'")),
			Self::UnterminatedInlineComment => Some("Add '/#' to close the inline comment".to_string()),
			Self::UnterminatedString { delimiter, content } => {
				let quoted = if *delimiter == '"' { format!("'\"{content}\"'") } else { format!("\"'{content}'\"") };
				Some(format!("Add a closing quote to the end of the string: {quoted}"))
			}
		}
	}

	pub fn at(self, span: Span) -> Diagnostic {
		Diagnostic::new(self.kind(), self.to_string(), span).with_tip(self.tip())
	}
}
