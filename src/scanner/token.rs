use std::fmt::Display;

use crate::source::Span;

/// A token produced by the scanner
#[derive(Debug, Clone)]
pub struct Token {
	pub r#type: TokenType,
	/// Raw text of the token, string literals without their quotes.
	pub lexeme: String,
	pub span:   Span,
}

impl Token {
	pub fn new(r#type: TokenType, lexeme: impl Into<String>, span: Span) -> Self {
		Self { r#type, lexeme: lexeme.into(), span }
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use TokenType::*;
		match self.r#type {
			Int | Float | Identifier => write!(f, "({}: {})", self.r#type, self.lexeme),
			String => write!(f, "({}: \"{}\")", self.r#type, self.lexeme),
			NewLine | Eof => write!(f, "({})", self.r#type),
			kind if kind.is_keyword() => write!(f, "(KEYWORD: {})", self.lexeme),
			kind => f.write_str(kind.symbol().unwrap_or_default()),
		}
	}
}

/// The different types of tokens in snow, The copying is lightweight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
	/// Plus `+`.
	Plus,
	/// Dash `-`, binary minus or unary negation.
	Dash,
	/// Star `*`.
	Star,
	/// Slash `/`.
	Slash,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Left curly bracket `{`.
	LeftBrace,
	/// Right curly bracket `}`.
	RightBrace,
	/// Single equals `=`.
	Equal,
	/// Equal equal `==`.
	EqualEqual,
	/// Not equal `!=`.
	BangEqual,
	/// Greater than `>`.
	Greater,
	/// Greater than or equal `>=`.
	GreaterEqual,
	/// Less than `<`.
	Less,
	/// Less than or equal `<=`.
	LessEqual,
	/// Dot `.`.
	Dot,
	/// Comma `,`.
	Comma,
	/// Integer literal, e.g. `42`.
	Int,
	/// Float literal, e.g. `4.2`.
	Float,
	/// String literal, e.g. `"hello"`.
	String,
	/// Identifier, e.g. variable or function name.
	Identifier,
	Not,
	True,
	False,
	Var,
	Const,
	While,
	Continue,
	Break,
	Function,
	Return,
	If,
	Elif,
	Else,
	And,
	Or,
	/// New line character, the statement separator.
	NewLine,
	/// End of file/input.
	Eof,
}

impl TokenType {
	pub fn keyword_or_identifier(value: &str) -> Self {
		match value {
			"not" => TokenType::Not,
			"true" => TokenType::True,
			"false" => TokenType::False,
			"var" => TokenType::Var,
			"const" => TokenType::Const,
			"while" => TokenType::While,
			"continue" => TokenType::Continue,
			"break" => TokenType::Break,
			"function" => TokenType::Function,
			"return" => TokenType::Return,
			"if" => TokenType::If,
			"elif" => TokenType::Elif,
			"else" => TokenType::Else,
			"and" => TokenType::And,
			"or" => TokenType::Or,
			_ => TokenType::Identifier,
		}
	}

	pub fn is_keyword(&self) -> bool {
		use TokenType::*;
		matches!(
			self,
			Not | True | False | Var | Const | While | Continue | Break | Function | Return | If | Elif | Else | And | Or
		)
	}

	/// Source text of operators and delimiters.
	pub fn symbol(&self) -> Option<&'static str> {
		use TokenType::*;
		Some(match self {
			Plus => "+",
			Dash => "-",
			Star => "*",
			Slash => "/",
			LeftParen => "(",
			RightParen => ")",
			LeftBrace => "{",
			RightBrace => "}",
			Equal => "=",
			EqualEqual => "==",
			BangEqual => "!=",
			Greater => ">",
			GreaterEqual => ">=",
			Less => "<",
			LessEqual => "<=",
			Dot => ".",
			Comma => ",",
			_ => return None,
		})
	}
}

impl Display for TokenType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use TokenType::*;
		let name = match self {
			Plus => "PLUS",
			Dash => "DASH",
			Star => "STAR",
			Slash => "SLASH",
			LeftParen => "LPAREN",
			RightParen => "RPAREN",
			LeftBrace => "LCURLYBRACKET",
			RightBrace => "RCURLYBRACKET",
			Equal => "SINGLE_EQUALS",
			EqualEqual => "EQUALS",
			BangEqual => "NOT_EQUALS",
			Greater => "GREATER_THAN",
			GreaterEqual => "GREATER_THAN_EQUALS",
			Less => "LESS_THAN",
			LessEqual => "LESS_THAN_EQUALS",
			Dot => "DOT",
			Comma => "COMMA",
			Int => "INT",
			Float => "FLOAT",
			String => "STRING",
			Identifier => "IDENTIFIER",
			Not => "NOT",
			True => "TRUE",
			False => "FALSE",
			Var => "VAR",
			Const => "CONST",
			While => "WHILE",
			Continue => "CONTINUE",
			Break => "BREAK",
			Function => "FUNCTION",
			Return => "RETURN",
			If => "IF",
			Elif => "ELIF",
			Else => "ELSE",
			And => "AND",
			Or => "OR",
			NewLine => "NEWLINE",
			Eof => "EOF",
		};
		f.write_str(name)
	}
}
