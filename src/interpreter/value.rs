use std::{cmp::Ordering, fmt::Display, rc::Rc};

use ValueKind::*;

use crate::{
	environment::Environment,
	error::{
		Diagnostic,
		interpreter::{Operation, RuntimeErrorType},
	},
	interpreter::{Interpreter, callable::FunctionValue},
	scanner::TokenType,
	source::Span,
};

/// Value represents a runtime value in snow.
///
/// Values are immutable, every operation builds a new one. A value remembers
/// the scope it was created in.
#[derive(Debug, Clone)]
pub struct Value {
	kind:        ValueKind,
	environment: Environment,
}

/// The payload of a [`Value`].
#[derive(Debug, Clone)]
pub enum ValueKind {
	Int(i64),
	Float(f64),
	Bool(bool),
	Function(Rc<FunctionValue>),
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.kind {
			Int(n) => write!(f, "{n}"),
			Float(n) => write!(f, "{n:?}"),
			Bool(b) => write!(f, "{b}"),
			Function(function) => write!(f, "function {}", function.name()),
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (&self.kind, &other.kind) {
			(Int(l), Int(r)) => l == r,
			(Float(l), Float(r)) => l == r,
			(Bool(l), Bool(r)) => l == r,
			(Function(l), Function(r)) => l == r,
			_ => false,
		}
	}
}

type ValueResult = Result<Value, RuntimeErrorType>;

impl Value {
	pub fn new(kind: ValueKind, environment: &Environment) -> Self { Self { kind, environment: environment.clone() } }

	pub fn int(value: i64, environment: &Environment) -> Self { Self::new(Int(value), environment) }

	pub fn float(value: f64, environment: &Environment) -> Self { Self::new(Float(value), environment) }

	pub fn bool(value: bool, environment: &Environment) -> Self { Self::new(Bool(value), environment) }

	pub fn kind(&self) -> &ValueKind { &self.kind }

	pub fn environment(&self) -> &Environment { &self.environment }

	pub fn type_name(&self) -> &'static str {
		match self.kind {
			Int(_) => "INT",
			Float(_) => "FLOAT",
			Bool(_) => "BOOL",
			Function(_) => "FUNCTION",
		}
	}

	/// `(INT: 7)`, `(FUNCTION: add)`.
	pub fn debug_form(&self) -> String {
		match &self.kind {
			Function(function) => format!("({}: {})", self.type_name(), function.name()),
			_ => format!("({}: {self})", self.type_name()),
		}
	}

	/// Results are created in the scope of the left operand.
	fn derive(&self, kind: ValueKind) -> Value { Value::new(kind, &self.environment) }

	/// Performs a binary operation between two values.
	pub fn binary_op(&self, op: TokenType, right: &Self) -> ValueResult {
		use TokenType::*;

		match op {
			Plus => self.add(right),
			Dash => self.subtract(right),
			Star => self.multiply(right),
			Slash => self.divide(right),
			Greater => self.greater(right),
			GreaterEqual => self.greater_equal(right),
			Less => self.less(right),
			LessEqual => self.less_equal(right),
			EqualEqual => Ok(self.equals(right)),
			BangEqual => Ok(self.not_equals(right)),
			other => Err(RuntimeErrorType::InvalidOperator(other)),
		}
	}

	/// Determines if the value is considered "true" in a boolean context.
	pub fn to_bool(&self) -> bool {
		match self.kind {
			Int(n) => n != 0,
			Float(n) => n != 0.0,
			Bool(b) => b,
			Function(_) => true,
		}
	}

	fn incompatible(&self, operation: Operation, other: &Self) -> RuntimeErrorType {
		RuntimeErrorType::IncompatibleOperands { operation, left: self.into(), right: other.into() }
	}

	/// Int with Int stays Int, any Float operand makes the result a Float.
	fn arithmetic(
		&self,
		other: &Self,
		operation: Operation,
		int: fn(i64, i64) -> i64,
		float: fn(f64, f64) -> f64,
	) -> ValueResult {
		let kind = match (&self.kind, &other.kind) {
			(Int(l), Int(r)) => Int(int(*l, *r)),
			(Int(l), Float(r)) => Float(float(*l as f64, *r)),
			(Float(l), Int(r)) => Float(float(*l, *r as f64)),
			(Float(l), Float(r)) => Float(float(*l, *r)),
			_ => return Err(self.incompatible(operation, other)),
		};
		Ok(self.derive(kind))
	}

	pub fn add(&self, other: &Self) -> ValueResult {
		self.arithmetic(other, Operation::Add, i64::wrapping_add, |l, r| l + r)
	}

	pub fn subtract(&self, other: &Self) -> ValueResult {
		self.arithmetic(other, Operation::Subtract, i64::wrapping_sub, |l, r| l - r)
	}

	pub fn multiply(&self, other: &Self) -> ValueResult {
		self.arithmetic(other, Operation::Multiply, i64::wrapping_mul, |l, r| l * r)
	}

	/// Division always gives a Float.
	pub fn divide(&self, other: &Self) -> ValueResult {
		let (l, r) = match (&self.kind, &other.kind) {
			(Int(l), Int(r)) => (*l as f64, *r as f64),
			(Int(l), Float(r)) => (*l as f64, *r),
			(Float(l), Int(r)) => (*l, *r as f64),
			(Float(l), Float(r)) => (*l, *r),
			_ => return Err(self.incompatible(Operation::Divide, other)),
		};
		if r == 0.0 {
			return Err(RuntimeErrorType::DivisionByZero { left: self.into(), right: other.into() });
		}
		Ok(self.derive(Float(l / r)))
	}

	fn ordering(&self, other: &Self) -> Result<Option<Ordering>, RuntimeErrorType> {
		Ok(match (&self.kind, &other.kind) {
			(Int(l), Int(r)) => Some(l.cmp(r)),
			(Int(l), Float(r)) => (*l as f64).partial_cmp(r),
			(Float(l), Int(r)) => l.partial_cmp(&(*r as f64)),
			(Float(l), Float(r)) => l.partial_cmp(r),
			_ => return Err(self.incompatible(Operation::Compare, other)),
		})
	}

	pub fn greater(&self, other: &Self) -> ValueResult {
		let ordering = self.ordering(other)?;
		Ok(self.derive(Bool(ordering == Some(Ordering::Greater))))
	}

	pub fn greater_equal(&self, other: &Self) -> ValueResult {
		let ordering = self.ordering(other)?;
		Ok(self.derive(Bool(matches!(ordering, Some(Ordering::Greater | Ordering::Equal)))))
	}

	pub fn less(&self, other: &Self) -> ValueResult {
		let ordering = self.ordering(other)?;
		Ok(self.derive(Bool(ordering == Some(Ordering::Less))))
	}

	pub fn less_equal(&self, other: &Self) -> ValueResult {
		let ordering = self.ordering(other)?;
		Ok(self.derive(Bool(matches!(ordering, Some(Ordering::Less | Ordering::Equal)))))
	}

	/// Values of different kinds are never equal, Int and Float compare by
	/// number.
	pub fn equals(&self, other: &Self) -> Value {
		let equal = match (&self.kind, &other.kind) {
			(Int(l), Float(r)) => *l as f64 == *r,
			(Float(l), Int(r)) => *l == *r as f64,
			_ => self == other,
		};
		self.derive(Bool(equal))
	}

	pub fn not_equals(&self, other: &Self) -> Value {
		let equal = self.equals(other).to_bool();
		self.derive(Bool(!equal))
	}

	pub fn not(&self) -> Value { self.derive(Bool(!self.to_bool())) }

	/// Values have no attributes yet.
	pub fn attribute(&self, name: &str) -> ValueResult {
		Err(RuntimeErrorType::InvalidAttribute { type_name: self.type_name(), name: name.to_string() })
	}

	pub fn set_attribute(&self, name: &str, value: &Value) -> ValueResult {
		Err(RuntimeErrorType::UnableToAssignAttribute {
			type_name: self.type_name(),
			name:      name.to_string(),
			value:     value.into(),
		})
	}

	/// Call the value with already evaluated arguments. `None` when the call
	/// produced no value.
	pub fn call(
		&self,
		interpreter: &mut Interpreter,
		arguments: Vec<Value>,
		span: &Span,
	) -> Result<Option<Value>, Diagnostic> {
		match &self.kind {
			Function(function) => function.call(interpreter, arguments, span),
			_ => Err(RuntimeErrorType::InvalidCall(self.type_name()).at(span, interpreter.environment())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;

	fn env() -> Environment { Environment::root("test") }

	fn int(n: i64) -> Value { Value::int(n, &env()) }

	fn float(n: f64) -> Value { Value::float(n, &env()) }

	fn bool(b: bool) -> Value { Value::bool(b, &env()) }

	#[test]
	fn display_forms() {
		assert_eq!(int(7).to_string(), "7");
		assert_eq!(float(2.5).to_string(), "2.5");
		assert_eq!(float(3.0).to_string(), "3.0");
		assert_eq!(bool(true).to_string(), "true");
		assert_eq!(int(7).debug_form(), "(INT: 7)");
		assert_eq!(float(2.5).debug_form(), "(FLOAT: 2.5)");
		assert_eq!(bool(false).debug_form(), "(BOOL: false)");
		assert_eq!(bool(false).type_name(), "BOOL");
	}

	#[test]
	fn arithmetic() {
		assert_eq!(int(1).add(&int(2)).unwrap(), int(3));
		assert_eq!(int(1).subtract(&int(2)).unwrap(), int(-1));
		assert_eq!(int(4).multiply(&int(2)).unwrap(), int(8));
		assert_eq!(int(1).add(&float(0.5)).unwrap(), float(1.5));
		assert_eq!(float(0.5).add(&int(1)).unwrap(), float(1.5));
		assert_eq!(float(0.5).multiply(&float(4.0)).unwrap(), float(2.0));
		assert_eq!(int(i64::MAX).add(&int(1)).unwrap(), int(i64::MIN));
	}

	#[test]
	fn mixed_addition_commutes() {
		for (a, b) in [(3, 0.25), (-7, 1.5), (0, -2.0)] {
			let left = int(a).add(&float(b)).unwrap();
			let right = float(b).add(&int(a)).unwrap();
			assert_eq!(left, right);
			assert_eq!(left, float(a as f64).add(&float(b)).unwrap());
		}
	}

	#[test]
	fn division() {
		let quotient = int(6).divide(&int(3)).unwrap();
		assert_eq!(quotient.type_name(), "FLOAT");
		assert_eq!(quotient.to_string(), "2.0");
		assert_eq!(int(1).divide(&int(4)).unwrap(), float(0.25));

		for divisor in [int(0), float(0.0), float(-0.0)] {
			let err = int(10).divide(&divisor).unwrap_err();
			assert!(matches!(err, RuntimeErrorType::DivisionByZero { .. }), "{err:?}");
		}
		let err = float(1.5).divide(&int(0)).unwrap_err();
		assert_eq!(err.to_string(), "unable to divide 'FLOAT' with value of '1.5' by 'INT' with value of '0'");
	}

	#[test]
	fn incompatible_operands() {
		let err = int(1).add(&bool(true)).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Value);
		assert_eq!(err.to_string(), "unable to add 'INT' with value of '1' to 'BOOL' with value of 'true'");
		let err = bool(true).subtract(&bool(false)).unwrap_err();
		assert_eq!(err.to_string(), "unable to subtract 'BOOL' with value of 'true' by 'BOOL' with value of 'false'");
		let err = bool(true).less(&int(1)).unwrap_err();
		assert_eq!(err.to_string(), "unable to compare sizes between 'BOOL' with value of 'true' and 'INT' with value of '1'");
		assert!(bool(true).divide(&int(1)).is_err());
		assert!(int(1).binary_op(TokenType::Comma, &int(2)).is_err());
	}

	#[test]
	fn comparisons() {
		assert_eq!(int(2).greater(&int(1)).unwrap(), bool(true));
		assert_eq!(int(2).greater_equal(&float(2.0)).unwrap(), bool(true));
		assert_eq!(float(1.5).less(&int(2)).unwrap(), bool(true));
		assert_eq!(int(3).less_equal(&int(2)).unwrap(), bool(false));
		assert_eq!(int(2).binary_op(TokenType::Less, &int(3)).unwrap(), bool(true));
	}

	#[test]
	fn equality() {
		assert_eq!(int(1).equals(&float(1.0)), bool(true));
		assert_eq!(int(1).equals(&bool(true)), bool(false));
		assert_eq!(bool(true).equals(&bool(true)), bool(true));
		assert_eq!(int(1).not_equals(&int(2)), bool(true));
		assert_eq!(bool(false).not_equals(&int(0)), bool(true));
	}

	#[test]
	fn truthiness() {
		assert!(int(5).to_bool());
		assert!(!int(0).to_bool());
		assert!(!float(0.0).to_bool());
		assert!(float(0.1).to_bool());
		assert!(!bool(false).to_bool());
		assert_eq!(bool(true).not(), bool(false));
		assert_eq!(int(0).not(), bool(true));
	}

	#[test]
	fn attributes() {
		let err = int(1).attribute("size").unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidAttribute);
		assert_eq!(err.to_string(), "object of type 'INT' has no attribute called 'size'");
		let err = bool(true).set_attribute("size", &int(2)).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::UnableToAssignAttribute);
	}
}
