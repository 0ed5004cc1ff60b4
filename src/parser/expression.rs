//! Expression AST nodes
//!
//! An `Expression` is a tree structure representing code like `-123 *
//! (45.67)` as nested nodes. Every node knows the span of source it was
//! parsed from, binary nodes span from their left operand to their right one.

use Expression::*;

use crate::{scanner::Token, source::Span};

/// Expression AST nodes
#[derive(Debug, Clone)]
pub enum Expression {
	Literal { value: LiteralValue, span: Span },
	Variable { name: String, span: Span },
	Assign { name: String, value: Box<Expression>, span: Span },
	AttributeGet { object: Box<Expression>, name: String, span: Span },
	AttributeSet { object: Box<Expression>, name: String, value: Box<Expression>, span: Span },
	Unary { operator: Token, right: Box<Expression>, span: Span },
	Binary { left: Box<Expression>, operator: Token, right: Box<Expression>, span: Span },
	/// `and` / `or`, the right side is only evaluated when needed.
	Logical { left: Box<Expression>, operator: Token, right: Box<Expression>, span: Span },
	Grouping { expression: Box<Expression>, span: Span },
	Call { callee: Box<Expression>, arguments: Vec<Expression>, span: Span },
}

impl Expression {
	pub fn unary(operator: Token, right: Expression) -> Self {
		let span = operator.span.to(right.span());
		Unary { operator, right: Box::new(right), span }
	}

	pub fn binary(left: Expression, operator: Token, right: Expression) -> Self {
		let span = left.span().to(right.span());
		Binary { left: Box::new(left), operator, right: Box::new(right), span }
	}

	pub fn logical(left: Expression, operator: Token, right: Expression) -> Self {
		let span = left.span().to(right.span());
		Logical { left: Box::new(left), operator, right: Box::new(right), span }
	}

	pub fn grouping(expression: Expression, span: Span) -> Self { Grouping { expression: Box::new(expression), span } }

	pub fn call(callee: Expression, arguments: Vec<Expression>, close: &Span) -> Self {
		let span = callee.span().to(close);
		Call { callee: Box::new(callee), arguments, span }
	}

	pub fn get(object: Expression, name: &Token) -> Self {
		let span = object.span().to(&name.span);
		AttributeGet { object: Box::new(object), name: name.lexeme.clone(), span }
	}

	pub fn assign(name: String, target: &Span, value: Expression) -> Self {
		let span = target.to(value.span());
		Assign { name, value: Box::new(value), span }
	}

	pub fn set(object: Box<Expression>, name: String, target: &Span, value: Expression) -> Self {
		let span = target.to(value.span());
		AttributeSet { object, name, value: Box::new(value), span }
	}

	pub fn span(&self) -> &Span {
		match self {
			Literal { span, .. }
			| Variable { span, .. }
			| Assign { span, .. }
			| AttributeGet { span, .. }
			| AttributeSet { span, .. }
			| Unary { span, .. }
			| Binary { span, .. }
			| Logical { span, .. }
			| Grouping { span, .. }
			| Call { span, .. } => span,
		}
	}
}

/// Literal values in the AST
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
	Int(i64),
	Float(f64),
	Bool(bool),
}

impl std::fmt::Display for Expression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal { value, .. } => write!(f, "{value}"),
			Variable { name, .. } => f.write_str(name),
			Assign { name, value, .. } => write!(f, "(= {name} {value})"),
			AttributeGet { object, name, .. } => write!(f, "(get {object}.{name})"),
			AttributeSet { object, name, value, .. } => write!(f, "(set {object}.{name}={value})"),
			Unary { operator, right, .. } => write!(f, "({} {right})", operator.lexeme),
			Binary { left, operator, right, .. } | Logical { left, operator, right, .. } => {
				write!(f, "({} {left} {right})", operator.lexeme)
			}
			Grouping { expression, .. } => write!(f, "(group {expression})"),
			Call { callee, arguments, .. } => write!(
				f,
				"(call {callee} ({}))",
				arguments.iter().map(|arg| format!("{arg}")).collect::<Vec<String>>().join(" ")
			),
		}
	}
}

impl std::fmt::Display for LiteralValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LiteralValue::Int(n) => write!(f, "{n}"),
			LiteralValue::Float(n) => write!(f, "{n:?}"),
			LiteralValue::Bool(b) => write!(f, "{b}"),
		}
	}
}
