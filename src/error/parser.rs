use crate::{
	error::{Diagnostic, ErrorKind},
	scanner::TokenType,
	source::Span,
};

/// Syntax errors. The first one aborts parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseErrorType {
	#[error("expected token of type '{expected}', not token of type '{found}'")]
	ExpectedToken { expected: TokenType, found: TokenType },
	#[error("token of type '{0}' is invalid")]
	InvalidToken(TokenType),
	#[error("the value of number of type {0} is too big")]
	TooBigValue(TokenType),
	#[error("break statement found outside of loop")]
	BreakOutsideLoop,
	#[error("continue statement found outside of loop")]
	ContinueOutsideLoop,
	#[error("return statement found outside of function")]
	ReturnOutsideFunction,
}

impl ParseErrorType {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::ExpectedToken { .. } => ErrorKind::ExpectedToken,
			Self::InvalidToken(_) => ErrorKind::InvalidTokenType,
			Self::TooBigValue(_) => ErrorKind::TooBigValue,
			Self::BreakOutsideLoop => ErrorKind::BreakOutsideOfLoop,
			Self::ContinueOutsideLoop => ErrorKind::ContinueOutsideOfLoop,
			Self::ReturnOutsideFunction => ErrorKind::ReturnOutsideOfFunction,
		}
	}

	pub fn tip(&self) -> Option<String> {
		match self {
			Self::BreakOutsideLoop => Some("Break statements can only be used inside of loops".to_string()),
			Self::ContinueOutsideLoop => Some("Continue statements can only be used inside of loops".to_string()),
			Self::ReturnOutsideFunction => Some("Return statements can only be used inside of functions".to_string()),
			Self::TooBigValue(TokenType::Int) => Some(format!("Integers must lie between {} and {}", i64::MIN, i64::MAX)),
			_ => None,
		}
	}

	pub fn at(self, span: Span) -> Diagnostic {
		Diagnostic::new(self.kind(), self.to_string(), span).with_tip(self.tip())
	}
}
