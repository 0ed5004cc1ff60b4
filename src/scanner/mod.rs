//! Turns a source unit into tokens.
//!
//! The scanner walks the characters once with a single character of
//! lookahead. It never gives up: every lexical error becomes a diagnostic and
//! scanning resumes right after it, so one pass reports all of them.
//!
//! Whitespace is dropped except for `\n`, which is the statement separator
//! and becomes a `NEWLINE` token. `#` starts a comment running to the end of
//! the line, `#/ ... /#` an inline comment that may span lines.
//!
//! We can’t easily detect a `reserved word` until we’ve reached the end of what
//! might instead be an identifier, this is `maximal munch`.
mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
pub use token::*;

use crate::{
	error::{Diagnostic, scanner::ScanErrorType},
	source::{Position, SourceUnit, Span},
};

/// A scanner for snow source code
pub struct Scanner<'a> {
	source:      &'a SourceUnit,
	/// User input source code
	code:        &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       Position,
	/// Points at the character currently being considered
	position:    Position,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a SourceUnit) -> Self {
		let code = source.code();
		let source_iter = code.char_indices().peekable();
		let start = Position::new(1, 0, 0);

		Self { source, code, source_iter, start, position: start }
	}

	/// Scan all tokens from the source code, together with every lexical error
	/// found on the way. The token list always ends with `EOF`.
	pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
		let mut tokens = Vec::new();
		let mut errors = Vec::new();
		while self.source_iter.peek().is_some() {
			// We are at the beginning of the next lexeme.
			self.start = self.position;
			if let Err(e) = self.scan_token(&mut tokens) {
				tracing::debug!(at = %e.span, "scan error: {}", e.message);
				errors.push(e);
			}
		}
		self.start = self.position;
		tokens.push(Token::new(Eof, "", self.span()));
		(tokens, errors)
	}

	/// Scan a single token from the source code
	fn scan_token(&mut self, tokens: &mut Vec<Token>) -> Result<(), Diagnostic> {
		let Some(next_char) = self.advance() else { return Ok(()) };
		#[rustfmt::skip]
		let r#type = match next_char {
			'\n' => {
				// Keep the newline on the line it ends.
				let end = Position::new(self.start.line, self.start.column + 1, self.position.index);
				tokens.push(Token::new(NewLine, "\n", Span::new(self.start, end, self.source.clone())));
				return Ok(());
			}
			' ' | '\r' | '\t' => return Ok(()),
			'#' => return self.comment(),
			'.' => Dot,
			',' => Comma,
			'+' => Plus,
			'-' => Dash,
			'*' => Star,
			'/' => Slash,
			'(' => LeftParen,
			')' => RightParen,
			'{' => LeftBrace,
			'}' => RightBrace,
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('=') { LessEqual } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else { Greater },
			'!' => if self.match_next('=') { BangEqual } else { return Err(self.illegal('!')) },
			'"' | '\'' => {
				let content = self.string(next_char)?;
				tokens.push(Token::new(String, content, self.span()));
				return Ok(());
			}
			c if c.is_ascii_digit() => self.number()?,
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			c => return Err(self.illegal(c)),
		};

		tokens.push(Token::new(r#type, self.lexeme(), self.span()));
		Ok(())
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		if self.peek() != Some(expected) {
			return false;
		}
		self.advance();
		true
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.position.index = i + c.len_utf8();
		if c == '\n' {
			self.position.line += 1;
			self.position.column = 0;
		} else {
			// A tab counts as a single column as well.
			self.position.column += 1;
		}
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}

	/// Text of the current lexeme
	fn lexeme(&self) -> &'a str { &self.code[self.start.index..self.position.index] }

	/// Span of the current lexeme
	fn span(&self) -> Span { self.span_from(self.start) }

	fn span_from(&self, start: Position) -> Span { Span::new(start, self.position, self.source.clone()) }

	fn illegal(&self, c: char) -> Diagnostic { ScanErrorType::IllegalCharacter(c).at(self.span()) }

	/// Skip a `#` line comment or a `#/ ... /#` inline comment
	fn comment(&mut self) -> Result<(), Diagnostic> {
		if !self.match_next('/') {
			while self.peek().is_some_and(|c| c != '\n') {
				self.advance();
			}
			return Ok(());
		}

		while let Some(c) = self.advance() {
			if c == '/' && self.match_next('#') {
				return Ok(());
			}
		}
		Err(ScanErrorType::UnterminatedInlineComment.at(self.span()))
	}

	/// Scan a string literal, returns its content without the quotes
	fn string(&mut self, delimiter: char) -> Result<std::string::String, Diagnostic> {
		let content_start = self.position.index;
		while self.peek().is_some_and(|c| c != delimiter && c != '\n') {
			self.advance();
		}
		let content = self.code[content_start..self.position.index].to_string();

		if self.peek() != Some(delimiter) {
			return Err(ScanErrorType::UnterminatedString { delimiter, content }.at(self.span()));
		}
		self.advance(); // The closing delimiter
		Ok(content)
	}

	/// Scan a number literal
	fn number(&mut self) -> Result<TokenType, Diagnostic> {
		let mut is_float = false;
		loop {
			match self.peek() {
				Some(c) if c.is_ascii_digit() => {}
				// Look for a fractional part.
				Some('.') if !is_float && self.peek_second().is_some_and(|c| c.is_ascii_digit()) => is_float = true,
				_ => break,
			}
			self.advance();
		}

		if self.peek() != Some('.') {
			return Ok(if is_float { Float } else { Int });
		}

		// A dot that cannot be part of the number: `3.` or `1.2.3`.
		let number = self.lexeme().to_string();
		let dot = self.position;
		self.advance();
		let dot = self.span_from(dot);
		while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
			self.advance();
		}

		let error = if is_float { ScanErrorType::MultipleDots { number } } else { ScanErrorType::TrailingDot { number } };
		Err(error.at(dot))
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> TokenType {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		TokenType::keyword_or_identifier(self.lexeme())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;

	fn scan_source(input: &str) -> (Vec<Token>, Vec<Diagnostic>) {
		let source = SourceUnit::new("test", input);
		Scanner::new(&source).scan_tokens()
	}

	fn scan(input: &str, ok: bool) {
		let (_, errors) = scan_source(input);
		assert!(errors.is_empty() == ok, "{input:?}: {errors:?}");
	}

	fn types(input: &str) -> Vec<TokenType> {
		let (tokens, errors) = scan_source(input);
		assert!(errors.is_empty(), "{input:?}: {errors:?}");
		tokens.into_iter().map(|t| t.r#type).collect()
	}

	fn error_kinds(input: &str) -> Vec<ErrorKind> { scan_source(input).1.into_iter().map(|e| e.kind).collect() }

	#[test]
	fn scan_tokens() {
		scan("", true);
		scan("(", true);
		scan("(){}", true);
		scan(" ( ) ", true);
		scan("@", false);
		scan("你好", false);
		scan(r#""世界""#, true);
		scan("12345", true);
		scan("user", true);
		scan("function", true);
	}

	#[test]
	fn carriage_returns_are_whitespace() {
		let (tokens, errors) = scan_source("1\r\n2");
		assert!(errors.is_empty(), "{errors:?}");
		let types: Vec<TokenType> = tokens.iter().map(|t| t.r#type).collect();
		assert_eq!(types, vec![Int, NewLine, Int, Eof]);
		assert_eq!(tokens[0].lexeme, "1");
		assert_eq!(tokens[2].span.line(), 2);
	}

	#[test]
	fn scan_operators() {
		assert_eq!(types("+ - * /"), vec![Plus, Dash, Star, Slash, Eof]);
		assert_eq!(types("= == != < <= > >="), vec![
			Equal,
			EqualEqual,
			BangEqual,
			Less,
			LessEqual,
			Greater,
			GreaterEqual,
			Eof
		]);
		assert_eq!(types("a.b(c, d)"), vec![
			Identifier, Dot, Identifier, LeftParen, Identifier, Comma, Identifier, RightParen, Eof
		]);
		assert_eq!(types("1==2"), vec![Int, EqualEqual, Int, Eof]);
		scan("!", false);
		scan("!=", true);
	}

	#[test]
	fn scan_numbers() {
		assert_eq!(types("0"), vec![Int, Eof]);
		assert_eq!(types("42"), vec![Int, Eof]);
		assert_eq!(types("3.14"), vec![Float, Eof]);
		assert_eq!(types("123.456"), vec![Float, Eof]);
		assert_eq!(types("-5"), vec![Dash, Int, Eof]);
		assert_eq!(types(".5"), vec![Dot, Int, Eof]);
	}

	#[test]
	fn scan_bad_numbers() {
		assert_eq!(error_kinds("3."), vec![ErrorKind::TrailingDot]);
		assert_eq!(error_kinds("3.x"), vec![ErrorKind::TrailingDot]);
		assert_eq!(error_kinds("1.2.3"), vec![ErrorKind::MultipleDots]);
		assert_eq!(error_kinds("1.2."), vec![ErrorKind::MultipleDots]);

		let (tokens, errors) = scan_source("3.\n");
		assert_eq!(tokens.iter().map(|t| t.r#type).collect::<Vec<_>>(), vec![NewLine, Eof]);
		assert_eq!(errors[0].message, "trailing dots are not allowed");
		assert_eq!(errors[0].tip.as_deref(), Some("To define a float add a zero after: '3.0'"));
		assert_eq!(errors[0].span.start.column, 1);

		// The rest of a malformed literal does not turn into more tokens.
		let (tokens, _) = scan_source("1.2.34 + 1");
		assert_eq!(tokens.iter().map(|t| t.r#type).collect::<Vec<_>>(), vec![Plus, Int, Eof]);
	}

	#[test]
	fn scan_strings() {
		let (tokens, errors) = scan_source(r#""hello" 'world'"#);
		assert!(errors.is_empty());
		assert_eq!(tokens[0].r#type, String);
		assert_eq!(tokens[0].lexeme, "hello");
		assert_eq!(tokens[0].span.text(), "\"hello\"");
		assert_eq!(tokens[1].lexeme, "world");
		assert_eq!(types(r#""it's""#), vec![String, Eof]);
		assert_eq!(types(r#""""#), vec![String, Eof]);
	}

	#[test]
	fn scan_unterminated_strings() {
		let (tokens, errors) = scan_source("\"abc\nx");
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].kind, ErrorKind::UnterminatedString);
		assert_eq!(errors[0].tip.as_deref(), Some("Add a closing quote to the end of the string: '\"abc\"'"));
		assert_eq!(tokens.iter().map(|t| t.r#type).collect::<Vec<_>>(), vec![NewLine, Identifier, Eof]);

		let (_, errors) = scan_source("'abc");
		assert_eq!(errors[0].tip.as_deref(), Some("Add a closing quote to the end of the string: \"'abc'\""));
	}

	#[test]
	fn scan_keywords() {
		assert_eq!(types("not true false var const while continue break function"), vec![
			Not, True, False, Var, Const, While, Continue, Break, Function, Eof
		]);
		assert_eq!(types("return if elif else and or"), vec![Return, If, Elif, Else, And, Or, Eof]);
	}

	#[test]
	fn scan_identifiers() {
		for name in ["x", "_name", "myVariable123", "snake_case", "CamelCase", "while2", "var_"] {
			assert_eq!(types(name), vec![Identifier, Eof], "{name}");
		}
	}

	#[test]
	fn scan_comments() {
		assert_eq!(types("# single line comment"), vec![Eof]);
		assert_eq!(types("1 # comment\n2"), vec![Int, NewLine, Int, Eof]);
		assert_eq!(types("1 #/ inline /# + 2"), vec![Int, Plus, Int, Eof]);
		assert_eq!(types("#/ multi\nline\ncomment /#"), vec![Eof]);
		assert_eq!(types("#//#"), vec![Eof]);
		assert_eq!(error_kinds("#/ unterminated"), vec![ErrorKind::UnterminatedInlineComment]);
		assert_eq!(error_kinds("#/#"), vec![ErrorKind::UnterminatedInlineComment]);
	}

	#[test]
	fn scan_whitespace() {
		assert_eq!(types(" \t\r"), vec![Eof]);
		assert_eq!(types("\n\n"), vec![NewLine, NewLine, Eof]);
	}

	#[test]
	fn collects_every_error() {
		assert_eq!(error_kinds("@ 1 $ 2. !"), vec![
			ErrorKind::IllegalCharacter,
			ErrorKind::IllegalCharacter,
			ErrorKind::TrailingDot,
			ErrorKind::IllegalCharacter
		]);
	}

	#[test]
	fn positions() {
		let (tokens, _) = scan_source("var x\n  yy = 1.5\n\tz");
		let yy = &tokens[3];
		assert_eq!(yy.lexeme, "yy");
		assert_eq!(yy.span.start, Position::new(2, 2, 8));
		assert_eq!(yy.span.end, Position::new(2, 4, 10));
		let float = &tokens[5];
		assert_eq!(float.r#type, Float);
		assert_eq!((float.span.start.column, float.span.end.column), (7, 10));
		let z = &tokens[7];
		assert_eq!(z.lexeme, "z");
		assert_eq!(z.span.start, Position::new(3, 1, 18));
		assert_eq!(tokens.last().map(|t| t.r#type), Some(Eof));
	}

	#[test]
	fn token_display() {
		let (tokens, _) = scan_source("var x = 1.5 + 'a'\n");
		let rendered: Vec<std::string::String> = tokens.iter().map(|t| t.to_string()).collect();
		assert_eq!(rendered, vec![
			"(KEYWORD: var)",
			"(IDENTIFIER: x)",
			"=",
			"(FLOAT: 1.5)",
			"+",
			"(STRING: \"a\")",
			"(NEWLINE)",
			"(EOF)"
		]);
	}
}
