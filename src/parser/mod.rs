//! The `Scanner` use `Lexical grammar`, implement `alphabet` as `Characters`,
//! `string` as `Lexme` or `Token`
//! The `Parser` use `Syntactic grammar`, implement `alphabet` as `Tokens`,
//! `string` as `Expression` and `Statement`
//!
//! |Name|Operators|Associates
//! --|--|--
//! Assignment|=|Right
//! Or|or|Left
//! And|and|Left
//! Equality|== !=|Left
//! Comparison|< > <= >=|Left
//! Term|+ -|Left
//! Factor|* /|Left
//! Unary|not -|Right
//! Call|() .|Left
//!
//! Expression grammar:
//!
//! ``` BNF
//! expression     → assignment ;
//! assignment     → logic_or ( "=" expression )? ;
//! logic_or       → logic_and ( "or" logic_and )* ;
//! logic_and      → equality ( "and" equality )* ;
//! equality       → comparison ( ( "!=" | "==" ) comparison )* ;
//! comparison     → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
//! term           → factor ( ( "-" | "+" ) factor )* ;
//! factor         → unary ( ( "/" | "*" ) unary )* ;
//! unary          → ( "not" | "-" ) unary | call ;
//! call           → primary ( "." IDENTIFIER | "(" arguments? ")" )* ;
//! primary        → INT | FLOAT | "true" | "false" | "(" expression ")" | IDENTIFIER ;
//! ```
//!
//! Statement grammar:
//!
//! ``` BNF
//! declaration    → var_decl | fun_decl | statement ;
//! var_decl       → ( "var" | "const" ) IDENTIFIER "=" expression ;
//! fun_decl       → "function" IDENTIFIER "(" parameters? ")" block ;
//! statement      → block | while | if | "break" | "continue" | return | expression ;
//! block          → "{" declaration* "}" ;
//! while          → "while" expression statement ;
//! if             → "if" expression statement ( "elif" expression statement )* ( "else" statement )? ;
//! return         → "return" expression? ;
//! ```
//!
//! Declarations are separated by newlines. The last one in a block may be
//! closed by the `}` instead, the last one in the file by the end of input.

pub mod expression;

use std::rc::Rc;

use TokenType::*;
use expression::{Expression, LiteralValue};

use crate::{
	error::{Diagnostic, parser::ParseErrorType},
	scanner::{Token, TokenType},
	source::{Position, SourceUnit, Span},
	statement::{self, Statement},
};

type ParseResult<T> = Result<T, Diagnostic>;

/// Recursive descent parser over the tokens of one source unit. The first
/// syntax error stops it.
pub struct Parser {
	/// The tokens to parse, always ending with `EOF`.
	tokens:         Vec<Token>,
	current:        usize,
	/// Open `{` around the current token.
	block_depth:    usize,
	/// Loops around the current token, reset inside function bodies.
	loop_depth:     usize,
	function_depth: usize,
}

impl Parser {
	pub fn new(mut tokens: Vec<Token>) -> Self {
		if tokens.last().is_none_or(|token| token.r#type != Eof) {
			let span = match tokens.last() {
				Some(last) => Span::new(last.span.end, last.span.end, last.span.source.clone()),
				None => Span::new(Position::new(1, 0, 0), Position::new(1, 0, 0), SourceUnit::new("", "")),
			};
			tokens.push(Token::new(Eof, "", span));
		}
		Self { tokens, current: 0, block_depth: 0, loop_depth: 0, function_depth: 0 }
	}

	/// Parse the whole program.
	pub fn parse(mut self) -> ParseResult<Vec<Statement>> {
		let mut statements = Vec::new();
		loop {
			self.skip_newlines();
			if self.check(Eof) {
				break;
			}
			statements.push(self.declaration()?);
			self.terminate_statement()?;
		}
		tracing::debug!(count = statements.len(), "parsed statements");
		Ok(statements)
	}

	fn declaration(&mut self) -> ParseResult<Statement> {
		match self.peek().r#type {
			Var | Const => self.var_declaration(),
			Function => self.function_declaration(),
			_ => self.statement(),
		}
	}

	fn var_declaration(&mut self) -> ParseResult<Statement> {
		let keyword = self.advance();
		let name = self.expect(Identifier)?;
		self.expect(Equal)?;
		let initializer = self.expression()?;
		let span = keyword.span.to(initializer.span());
		Ok(Statement::VarDeclaration { constant: keyword.r#type == Const, name: name.lexeme, initializer, span })
	}

	fn function_declaration(&mut self) -> ParseResult<Statement> {
		let keyword = self.advance();
		let name = self.expect(Identifier)?;
		self.expect(LeftParen)?;
		let mut parameters = Vec::new();
		if !self.check(RightParen) {
			loop {
				parameters.push(self.expect(Identifier)?.lexeme);
				if !self.match_next(Comma) {
					break;
				}
			}
		}
		self.expect(RightParen)?;

		// A loop around the declaration does not reach into its body.
		let loop_depth = std::mem::take(&mut self.loop_depth);
		self.function_depth += 1;
		let body = self.block_body();
		self.function_depth -= 1;
		self.loop_depth = loop_depth;

		let (body, body_span) = body?;
		let span = keyword.span.to(&body_span);
		Ok(Statement::FunDecl(Rc::new(statement::Function { name: name.lexeme, parameters, body, span })))
	}

	fn statement(&mut self) -> ParseResult<Statement> {
		match self.peek().r#type {
			LeftBrace => {
				let (statements, span) = self.block_body()?;
				Ok(Statement::Block { statements, span })
			}
			While => self.while_statement(),
			If => self.if_statement(),
			Break => {
				let token = self.advance();
				if self.loop_depth == 0 {
					return Err(ParseErrorType::BreakOutsideLoop.at(token.span));
				}
				Ok(Statement::Break(token.span))
			}
			Continue => {
				let token = self.advance();
				if self.loop_depth == 0 {
					return Err(ParseErrorType::ContinueOutsideLoop.at(token.span));
				}
				Ok(Statement::Continue(token.span))
			}
			Return => self.return_statement(),
			_ => Ok(Statement::Expression(self.expression()?)),
		}
	}

	/// `{ ... }`, returns the statements and the span from brace to brace.
	fn block_body(&mut self) -> ParseResult<(Vec<Statement>, Span)> {
		let open = self.expect(LeftBrace)?;
		self.block_depth += 1;
		let mut statements = Vec::new();
		loop {
			self.skip_newlines();
			if self.check(RightBrace) || self.check(Eof) {
				break;
			}
			statements.push(self.declaration()?);
			self.terminate_statement()?;
		}
		let close = self.expect(RightBrace)?;
		self.block_depth -= 1;
		Ok((statements, open.span.to(&close.span)))
	}

	fn while_statement(&mut self) -> ParseResult<Statement> {
		let keyword = self.advance();
		let condition = self.expression()?;
		self.loop_depth += 1;
		let body = self.statement();
		self.loop_depth -= 1;
		let body = body?;
		let span = keyword.span.to(body.span());
		Ok(Statement::While { condition, body: Box::new(body), span })
	}

	fn if_statement(&mut self) -> ParseResult<Statement> {
		let keyword = self.advance();
		let condition = self.expression()?;
		let mut branches = vec![(condition, self.statement()?)];
		let mut else_branch = None;

		loop {
			// `elif` and `else` may also start the next line.
			if self.check(NewLine) && matches!(self.peek_next().r#type, Elif | Else) {
				self.advance();
			}
			match self.peek().r#type {
				Elif => {
					self.advance();
					let condition = self.expression()?;
					branches.push((condition, self.statement()?));
				}
				Else => {
					self.advance();
					else_branch = Some(Box::new(self.statement()?));
					break;
				}
				_ => break,
			}
		}

		let last = match (&else_branch, branches.last()) {
			(Some(statement), _) => statement.span(),
			(None, Some((_, statement))) => statement.span(),
			(None, None) => &keyword.span,
		};
		let span = keyword.span.to(last);
		Ok(Statement::If { branches, else_branch, span })
	}

	fn return_statement(&mut self) -> ParseResult<Statement> {
		let keyword = self.advance();
		if self.function_depth == 0 {
			return Err(ParseErrorType::ReturnOutsideFunction.at(keyword.span));
		}
		if self.at_terminator() {
			return Ok(Statement::Return { value: None, span: keyword.span });
		}
		let value = self.expression()?;
		let span = keyword.span.to(value.span());
		Ok(Statement::Return { value: Some(value), span })
	}

	/// Every declaration ends with a newline, the closing brace of its block or
	/// the end of input.
	fn terminate_statement(&mut self) -> ParseResult<()> {
		if self.match_next(NewLine) || self.at_terminator() {
			return Ok(());
		}
		let found = self.peek();
		Err(ParseErrorType::ExpectedToken { expected: NewLine, found: found.r#type }.at(found.span.clone()))
	}

	fn at_terminator(&self) -> bool {
		match self.peek().r#type {
			NewLine | Eof => true,
			RightBrace => self.block_depth > 0,
			_ => false,
		}
	}

	fn expression(&mut self) -> ParseResult<Expression> { self.assignment() }

	fn assignment(&mut self) -> ParseResult<Expression> {
		let target = self.logic_or()?;
		if !self.check(Equal) {
			return Ok(target);
		}
		Ok(match target {
			Expression::Variable { name, span } => {
				self.advance();
				Expression::assign(name, &span, self.expression()?)
			}
			Expression::AttributeGet { object, name, span } => {
				self.advance();
				Expression::set(object, name, &span, self.expression()?)
			}
			// The stray `=` is reported by whoever expected the expression to end.
			target => target,
		})
	}

	fn logic_or(&mut self) -> ParseResult<Expression> { self.fold(&[Or], Self::logic_and, Expression::logical) }

	fn logic_and(&mut self) -> ParseResult<Expression> { self.fold(&[And], Self::equality, Expression::logical) }

	/// Parse equality expressions.
	fn equality(&mut self) -> ParseResult<Expression> {
		self.fold(&[EqualEqual, BangEqual], Self::comparison, Expression::binary)
	}

	/// Parse comparison expressions.
	fn comparison(&mut self) -> ParseResult<Expression> {
		self.fold(&[Greater, GreaterEqual, Less, LessEqual], Self::term, Expression::binary)
	}

	/// Parse term expressions.
	fn term(&mut self) -> ParseResult<Expression> { self.fold(&[Plus, Dash], Self::factor, Expression::binary) }

	/// Parse factor expressions.
	fn factor(&mut self) -> ParseResult<Expression> { self.fold(&[Star, Slash], Self::unary, Expression::binary) }

	/// A left associative level of binary operators.
	fn fold(
		&mut self,
		operators: &[TokenType],
		operand: fn(&mut Self) -> ParseResult<Expression>,
		combine: fn(Expression, Token, Expression) -> Expression,
	) -> ParseResult<Expression> {
		let mut expression = operand(self)?;
		while operators.contains(&self.peek().r#type) {
			let operator = self.advance();
			expression = combine(expression, operator, operand(self)?);
		}
		Ok(expression)
	}

	/// Parse unary expressions.
	fn unary(&mut self) -> ParseResult<Expression> {
		if matches!(self.peek().r#type, Not | Dash) {
			let operator = self.advance();
			return Ok(Expression::unary(operator, self.unary()?));
		}
		self.call()
	}

	fn call(&mut self) -> ParseResult<Expression> {
		let mut expression = self.primary()?;
		loop {
			if self.match_next(Dot) {
				let name = self.expect(Identifier)?;
				expression = Expression::get(expression, &name);
			} else if self.match_next(LeftParen) {
				let mut arguments = Vec::new();
				if !self.check(RightParen) {
					loop {
						arguments.push(self.expression()?);
						if !self.match_next(Comma) {
							break;
						}
					}
				}
				let close = self.expect(RightParen)?;
				expression = Expression::call(expression, arguments, &close.span);
			} else {
				return Ok(expression);
			}
		}
	}

	/// Parse primary expressions.
	fn primary(&mut self) -> ParseResult<Expression> {
		let token = self.advance();
		let value = match token.r#type {
			Int => match token.lexeme.parse::<i64>() {
				Ok(n) => LiteralValue::Int(n),
				Err(_) => return Err(ParseErrorType::TooBigValue(Int).at(token.span)),
			},
			Float => match token.lexeme.parse::<f64>() {
				Ok(n) if n.is_finite() => LiteralValue::Float(n),
				_ => return Err(ParseErrorType::TooBigValue(Float).at(token.span)),
			},
			True => LiteralValue::Bool(true),
			False => LiteralValue::Bool(false),
			Identifier => return Ok(Expression::Variable { name: token.lexeme, span: token.span }),
			LeftParen => {
				let expression = self.expression()?;
				let close = self.expect(RightParen)?;
				return Ok(Expression::grouping(expression, token.span.to(&close.span)));
			}
			other => return Err(ParseErrorType::InvalidToken(other).at(token.span)),
		};
		Ok(Expression::Literal { value, span: token.span })
	}

	/// Consume the current token if it has the expected type, or fail.
	fn expect(&mut self, expected: TokenType) -> ParseResult<Token> {
		if self.check(expected) {
			return Ok(self.advance());
		}
		let found = self.peek();
		Err(ParseErrorType::ExpectedToken { expected, found: found.r#type }.at(found.span.clone()))
	}

	fn match_next(&mut self, expected: TokenType) -> bool {
		if !self.check(expected) {
			return false;
		}
		self.advance();
		true
	}

	fn check(&self, expected: TokenType) -> bool { self.peek().r#type == expected }

	fn skip_newlines(&mut self) {
		while self.match_next(NewLine) {}
	}

	/// Advance to the next token, `EOF` is never consumed.
	fn advance(&mut self) -> Token {
		let token = self.peek().clone();
		if token.r#type != Eof {
			self.current += 1;
		}
		token
	}

	/// Peek at the current token.
	fn peek(&self) -> &Token { &self.tokens[self.current] }

	/// Peek one token past the current one.
	fn peek_next(&self) -> &Token { self.tokens.get(self.current + 1).unwrap_or_else(|| self.peek()) }
}
