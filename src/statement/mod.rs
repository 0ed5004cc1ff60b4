//! There is no place in the grammar where both an expression and a statement
//! are allowed. The operands of, say, `+` are always expressions, never
//! statements. The body of a `while` loop is always a statement.

use std::{fmt::Display, rc::Rc};

use crate::{parser::expression::Expression, source::Span};

/// A statement in the programming language.
#[derive(Debug, Clone)]
pub enum Statement {
	/// An expression used as a statement.
	Expression(Expression),
	/// `var x = ...` or `const x = ...`.
	VarDeclaration {
		constant:    bool,
		name:        String,
		initializer: Expression,
		span:        Span,
	},
	/// A block of statements with its own scope.
	Block {
		statements: Vec<Statement>,
		span:       Span,
	},
	While {
		condition: Expression,
		body:      Box<Statement>,
		span:      Span,
	},
	/// `if` followed by any number of `elif` branches, the first truthy
	/// condition wins.
	If {
		branches:    Vec<(Expression, Statement)>,
		else_branch: Option<Box<Statement>>,
		span:        Span,
	},
	/// A break statement to exit loops.
	Break(Span),
	Continue(Span),
	/// A return statement.
	Return {
		value: Option<Expression>,
		span:  Span,
	},
	FunDecl(Rc<Function>),
}

/// A function declaration, shared with every function value created from it.
#[derive(Debug)]
pub struct Function {
	pub name:       String,
	pub parameters: Vec<String>,
	pub body:       Vec<Statement>,
	pub span:       Span,
}

impl Statement {
	pub fn span(&self) -> &Span {
		match self {
			Statement::Expression(expression) => expression.span(),
			Statement::VarDeclaration { span, .. }
			| Statement::Block { span, .. }
			| Statement::While { span, .. }
			| Statement::If { span, .. }
			| Statement::Break(span)
			| Statement::Continue(span)
			| Statement::Return { span, .. } => span,
			Statement::FunDecl(function) => &function.span,
		}
	}
}

fn write_block(f: &mut std::fmt::Formatter<'_>, statements: &[Statement]) -> std::fmt::Result {
	f.write_str("(block")?;
	for statement in statements {
		write!(f, " {statement}")?;
	}
	f.write_str(")")
}

impl Display for Statement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Statement::Expression(expression) => write!(f, "{expression}"),
			Statement::VarDeclaration { constant, name, initializer, .. } => {
				write!(f, "({} {name} {initializer})", if *constant { "const" } else { "var" })
			}
			Statement::Block { statements, .. } => write_block(f, statements),
			Statement::While { condition, body, .. } => write!(f, "(while {condition} {body})"),
			Statement::If { branches, else_branch, .. } => {
				for (i, (condition, branch)) in branches.iter().enumerate() {
					match i {
						0 => write!(f, "(if {condition} {branch}")?,
						_ => write!(f, " (elif {condition} {branch})")?,
					}
				}
				if let Some(else_branch) = else_branch {
					write!(f, " (else {else_branch})")?;
				}
				f.write_str(")")
			}
			Statement::Break(_) => f.write_str("(break)"),
			Statement::Continue(_) => f.write_str("(continue)"),
			Statement::Return { value: Some(value), .. } => write!(f, "(return {value})"),
			Statement::Return { value: None, .. } => f.write_str("(return)"),
			Statement::FunDecl(function) => {
				write!(f, "(function {} ({}) ", function.name, function.parameters.join(" "))?;
				write_block(f, &function.body)?;
				f.write_str(")")
			}
		}
	}
}
