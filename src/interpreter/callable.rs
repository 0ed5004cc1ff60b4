use std::{fmt::Debug, rc::Rc};

use crate::{
	environment::Environment,
	error::{Diagnostic, interpreter::RuntimeErrorType},
	interpreter::{ControlSignal, Interpreter, value::Value},
	source::Span,
	statement::Function,
};

/// A user defined function together with the scope it was declared in.
pub struct FunctionValue {
	declaration: Rc<Function>,
	closure:     Environment,
}

impl Debug for FunctionValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FunctionValue")
			.field("name", &self.declaration.name)
			.field("parameters", &self.declaration.parameters)
			.field("closure", &self.closure)
			.finish()
	}
}

/// Two function values are the same function when they share a name and the
/// scope they were declared in.
impl PartialEq for FunctionValue {
	fn eq(&self, other: &Self) -> bool {
		self.declaration.name == other.declaration.name && self.closure.ptr_eq(&other.closure)
	}
}

impl FunctionValue {
	pub fn new(declaration: Rc<Function>, closure: Environment) -> Self { Self { declaration, closure } }

	pub fn name(&self) -> &str { &self.declaration.name }

	pub fn arity(&self) -> usize { self.declaration.parameters.len() }

	/// Run the body in a fresh scope under the closure. The value of an
	/// explicit `return` wins, otherwise the value of the last statement.
	pub fn call(
		&self,
		interpreter: &mut Interpreter,
		arguments: Vec<Value>,
		span: &Span,
	) -> Result<Option<Value>, Diagnostic> {
		let (expected, got) = (self.arity(), arguments.len());
		if got != expected {
			let type_name = "FUNCTION";
			let error = if got > expected {
				RuntimeErrorType::TooManyArguments { type_name, expected, got }
			} else {
				RuntimeErrorType::TooFewArguments { type_name, expected, got }
			};
			return Err(error.at(span, interpreter.environment()));
		}

		tracing::trace!(name = self.name(), arguments = got, "call");
		let declaration = &self.declaration;
		let scope = self.closure.child(Some(self.name()), declaration.span.line(), declaration.span.file_name());
		for (parameter, argument) in declaration.parameters.iter().zip(arguments) {
			scope.declare(false, parameter, argument, &declaration.span)?;
		}

		Ok(match interpreter.execute_body(&declaration.body, scope)? {
			ControlSignal::Normal(value) | ControlSignal::Return(value) => value,
			// Loops can not reach across a function body.
			ControlSignal::Break | ControlSignal::Continue => None,
		})
	}
}
