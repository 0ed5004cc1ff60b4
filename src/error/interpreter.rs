use crate::{
	environment::Environment,
	error::{Diagnostic, ErrorKind},
	interpreter::value::Value,
	scanner::TokenType,
	source::Span,
};

/// Errors that can occur during interpretation
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
	#[error("a variable with the name of '{name}' has already been declared on line {line}")]
	VariableAlreadyDeclared { name: String, line: usize },
	#[error("a variable with the name of '{0}' could not be found")]
	UndefinedVariable(String),
	#[error("the variable '{0}' is a constant and can therefore not be assigned to")]
	ConstantAssignment(String),
	#[error(
		"unable to {} '{}' with value of '{}' {} '{}' with value of '{}'",
		.operation.verb(), .left.type_name, .left.value, .operation.preposition(), .right.type_name, .right.value
	)]
	IncompatibleOperands { operation: Operation, left: Operand, right: Operand },
	#[error("unable to divide '{}' with value of '{}' by '{}' with value of '{}'", .left.type_name, .left.value, .right.type_name, .right.value)]
	DivisionByZero { left: Operand, right: Operand },
	#[error("the expression produced no value")]
	NoValue,
	#[error("object of type '{type_name}' has no attribute called '{name}'")]
	InvalidAttribute { type_name: &'static str, name: String },
	#[error("unable to assign '{name}' of '{type_name}' to a '{}' with value of '{}'", .value.type_name, .value.value)]
	UnableToAssignAttribute { type_name: &'static str, name: String, value: Operand },
	#[error("unable to call object of type '{0}'")]
	InvalidCall(&'static str),
	#[error("too many arguments, object of type '{type_name}' expected {expected} arguments but got {got} arguments")]
	TooManyArguments { type_name: &'static str, expected: usize, got: usize },
	#[error("too few arguments, object of type '{type_name}' expected {expected} arguments but got {got} arguments")]
	TooFewArguments { type_name: &'static str, expected: usize, got: usize },
	#[error("the op token of type '{0}' is not valid here")]
	InvalidOperator(TokenType),
}

impl RuntimeErrorType {
	pub fn kind(&self) -> ErrorKind {
		use RuntimeErrorType::*;
		match self {
			VariableAlreadyDeclared { .. } => ErrorKind::VariableAlreadyDeclared,
			UndefinedVariable(_) => ErrorKind::UndefinedVariable,
			ConstantAssignment(_) => ErrorKind::ConstantVariableAssignment,
			IncompatibleOperands { .. } | NoValue => ErrorKind::Value,
			DivisionByZero { .. } => ErrorKind::DivisionByZero,
			InvalidAttribute { .. } => ErrorKind::InvalidAttribute,
			UnableToAssignAttribute { .. } => ErrorKind::UnableToAssignAttribute,
			InvalidCall(_) => ErrorKind::InvalidCall,
			TooManyArguments { .. } | TooFewArguments { .. } => ErrorKind::Argument,
			InvalidOperator(_) => ErrorKind::InvalidOpToken,
		}
	}

	pub fn tip(&self) -> Option<String> {
		match self {
			Self::ConstantAssignment(name) => {
				Some(format!("Declare '{name}' with 'var' instead of 'const' to allow assigning to it"))
			}
			Self::UndefinedVariable(name) => Some(format!("Declare it first: 'var {name} = ...'")),
			_ => None,
		}
	}

	/// Locate the error and attach the environment it was raised in.
	pub fn at(self, span: &Span, environment: &Environment) -> Diagnostic {
		Diagnostic::new(self.kind(), self.to_string(), span.clone()).with_tip(self.tip()).with_stack(environment)
	}
}

/// The operations a value error can be reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	Add,
	Subtract,
	Multiply,
	Divide,
	Compare,
}

impl Operation {
	fn verb(&self) -> &'static str {
		match self {
			Operation::Add => "add",
			Operation::Subtract => "subtract",
			Operation::Multiply => "multiply",
			Operation::Divide => "divide",
			Operation::Compare => "compare sizes between",
		}
	}

	fn preposition(&self) -> &'static str {
		match self {
			Operation::Add => "to",
			Operation::Subtract | Operation::Multiply | Operation::Divide => "by",
			Operation::Compare => "and",
		}
	}
}

/// Type and display form of a value, captured for an error message.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
	pub type_name: &'static str,
	pub value:     String,
}

impl From<&Value> for Operand {
	fn from(value: &Value) -> Self { Self { type_name: value.type_name(), value: value.to_string() } }
}
