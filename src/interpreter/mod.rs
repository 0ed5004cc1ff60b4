//! snow tree-walking interpreter.
//!
//! The interpreter walks the statements produced by the parser, recursively
//! evaluating each expression and computing its runtime value.
//!
//! # Expression Types
//!
//! - **Literals**: booleans, integers, floats
//! - **Unary**: `-` (negation), `not`
//! - **Binary**: `+`, `-`, `*`, `/`, comparisons, equality
//! - **Logical**: `and`, `or`, short-circuiting
//! - **Grouping**: Parenthesized expressions
//! - **Calls** and attribute access
//!
//! `break`, `continue` and `return` travel back up as a [`ControlSignal`]
//! returned by every statement, errors travel as a [`Diagnostic`].

pub mod callable;
pub mod value;

use std::rc::Rc;

use Expression::*;
use callable::FunctionValue;
use value::{Value, ValueKind};

use crate::{
	environment::Environment,
	error::{Diagnostic, interpreter::RuntimeErrorType},
	parser::expression::{Expression, LiteralValue},
	scanner::TokenType,
	statement::Statement,
};

/// How a statement finished.
#[derive(Debug, Clone)]
pub enum ControlSignal {
	/// Ran to the end, with the value of the statement if it has one.
	Normal(Option<Value>),
	Break,
	Continue,
	Return(Option<Value>),
}

type RuntimeResult<T> = Result<T, Diagnostic>;

/// Interpreter that evaluates snow statements against a scope.
pub struct Interpreter {
	/// The innermost scope, swapped while blocks and calls run.
	environment: Environment,
}

impl Interpreter {
	pub fn new(environment: &Environment) -> Self { Self { environment: environment.clone() } }

	pub fn environment(&self) -> &Environment { &self.environment }

	/// Run top level statements, collecting the value of each one that has
	/// one. The first runtime error stops everything.
	pub fn interpret(&mut self, statements: &[Statement]) -> RuntimeResult<Vec<Value>> {
		let mut values = Vec::new();
		for statement in statements {
			if let ControlSignal::Normal(Some(value)) = self.execute(statement)? {
				tracing::trace!(value = %value.debug_form(), "statement value");
				values.push(value);
			}
		}
		Ok(values)
	}

	fn execute(&mut self, statement: &Statement) -> RuntimeResult<ControlSignal> {
		Ok(match statement {
			Statement::Expression(expression) => ControlSignal::Normal(self.evaluate(expression)?),
			Statement::VarDeclaration { constant, name, initializer, span } => {
				let value = self.evaluate_value(initializer)?;
				self.environment.declare(*constant, name, value.clone(), span)?;
				ControlSignal::Normal(Some(value))
			}
			Statement::FunDecl(function) => {
				let kind = ValueKind::Function(Rc::new(FunctionValue::new(function.clone(), self.environment.clone())));
				let value = Value::new(kind, &self.environment);
				self.environment.declare(true, &function.name, value, &function.span)?;
				ControlSignal::Normal(None)
			}
			Statement::Block { statements, span } => {
				let scope = self.environment.child(None, span.line(), span.file_name());
				self.execute_block(statements, scope)?
			}
			Statement::While { condition, body, .. } => {
				while self.evaluate_value(condition)?.to_bool() {
					match self.execute(body)? {
						ControlSignal::Break => break,
						signal @ ControlSignal::Return(_) => return Ok(signal),
						ControlSignal::Normal(_) | ControlSignal::Continue => {}
					}
				}
				ControlSignal::Normal(None)
			}
			Statement::If { branches, else_branch, .. } => {
				for (condition, branch) in branches {
					if self.evaluate_value(condition)?.to_bool() {
						return self.execute(branch);
					}
				}
				match else_branch {
					Some(branch) => self.execute(branch)?,
					None => ControlSignal::Normal(None),
				}
			}
			Statement::Break(_) => ControlSignal::Break,
			Statement::Continue(_) => ControlSignal::Continue,
			Statement::Return { value, .. } => match value {
				Some(expression) => ControlSignal::Return(self.evaluate(expression)?),
				None => ControlSignal::Return(None),
			},
		})
	}

	/// Run statements inside `environment`. A block has no value of its own,
	/// only the signals that cut it short travel on.
	fn execute_block(&mut self, statements: &[Statement], environment: Environment) -> RuntimeResult<ControlSignal> {
		Ok(match self.execute_body(statements, environment)? {
			ControlSignal::Normal(_) => ControlSignal::Normal(None),
			signal => signal,
		})
	}

	/// Run a function body inside `environment`, which is left again
	/// afterwards whatever happened. Gives the value of the last statement.
	pub(crate) fn execute_body(
		&mut self,
		statements: &[Statement],
		environment: Environment,
	) -> RuntimeResult<ControlSignal> {
		let previous = std::mem::replace(&mut self.environment, environment);
		let result = self.execute_statements(statements);
		self.environment = previous;
		result
	}

	fn execute_statements(&mut self, statements: &[Statement]) -> RuntimeResult<ControlSignal> {
		let mut last = None;
		for statement in statements {
			match self.execute(statement)? {
				ControlSignal::Normal(value) => last = value,
				signal => return Ok(signal),
			}
		}
		Ok(ControlSignal::Normal(last))
	}

	/// Evaluate an expression that has to produce a value.
	fn evaluate_value(&mut self, expression: &Expression) -> RuntimeResult<Value> {
		self.evaluate(expression)?.ok_or_else(|| RuntimeErrorType::NoValue.at(expression.span(), &self.environment))
	}

	/// Evaluate the given expression and return its value. Only calls can come
	/// back empty.
	fn evaluate(&mut self, expression: &Expression) -> RuntimeResult<Option<Value>> {
		let at = |error: RuntimeErrorType, environment: &Environment| error.at(expression.span(), environment);

		let value = match expression {
			Literal { value, .. } => {
				let kind = match *value {
					LiteralValue::Int(n) => ValueKind::Int(n),
					LiteralValue::Float(n) => ValueKind::Float(n),
					LiteralValue::Bool(b) => ValueKind::Bool(b),
				};
				Value::new(kind, &self.environment)
			}
			Variable { name, span } => self.environment.get(name, span)?,
			Assign { name, value, span } => {
				let value = self.evaluate_value(value)?;
				self.environment.set(name, value, span)?
			}
			AttributeGet { object, name, .. } => {
				let object = self.evaluate_value(object)?;
				object.attribute(name).map_err(|e| at(e, &self.environment))?
			}
			AttributeSet { object, name, value, .. } => {
				let object = self.evaluate_value(object)?;
				let value = self.evaluate_value(value)?;
				object.set_attribute(name, &value).map_err(|e| at(e, &self.environment))?
			}
			Unary { operator, right, .. } => {
				let right = self.evaluate_value(right)?;
				let result = match operator.r#type {
					TokenType::Dash => right.multiply(&Value::int(-1, &self.environment)),
					TokenType::Not => Ok(right.not()),
					other => Err(RuntimeErrorType::InvalidOperator(other)),
				};
				result.map_err(|e| at(e, &self.environment))?
			}
			Binary { left, operator, right, .. } => {
				let left = self.evaluate_value(left)?;
				let right = self.evaluate_value(right)?;
				left.binary_op(operator.r#type, &right).map_err(|e| at(e, &self.environment))?
			}
			Logical { left, operator, right, .. } => {
				let left = self.evaluate_value(left)?.to_bool();
				let result = match operator.r#type {
					TokenType::Or if left => true,
					TokenType::And if !left => false,
					TokenType::Or | TokenType::And => self.evaluate_value(right)?.to_bool(),
					other => return Err(at(RuntimeErrorType::InvalidOperator(other), &self.environment)),
				};
				Value::bool(result, &self.environment)
			}
			Grouping { expression, .. } => return self.evaluate(expression),
			Call { callee, arguments, span } => {
				let callee = self.evaluate_value(callee)?;
				let arguments =
					arguments.iter().map(|argument| self.evaluate_value(argument)).collect::<RuntimeResult<Vec<_>>>()?;
				return callee.call(self, arguments, span);
			}
		};
		Ok(Some(value))
	}
}
