use std::{collections::HashMap, fmt::Display};

use crate::{
	error::{Diagnostic, interpreter::RuntimeErrorType},
	interpreter::value::Value,
	source::Span,
	utils::RcCell,
};

/// A lexical scope. Clone is a shallow copy of the handle, every clone sees
/// the same variables.
///
/// Scopes form a chain through their parent: lookups walk it from the
/// innermost scope outwards and the first binding found wins.
#[derive(Clone)]
pub struct Environment {
	scope: RcCell<Scope>,
}

struct Scope {
	variables: HashMap<String, Variable>,
	parent:    Option<Environment>,
	frame:     Frame,
}

/// A binding owned by exactly one scope.
#[derive(Debug, Clone)]
pub struct Variable {
	pub value:       Value,
	pub constant:    bool,
	pub declared_at: Span,
}

/// What a scope was created for, used to print call stacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	pub name:       Option<String>,
	pub start_line: usize,
	pub file_name:  String,
	pub is_file:    bool,
}

impl Display for Frame {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.name {
			_ if self.is_file => write!(f, "In file '{}'", self.file_name),
			Some(name) => write!(f, "In '{name}' starting at line {} in file '{}'", self.start_line, self.file_name),
			None => write!(f, "In anonymous block starting at line {} in file '{}'", self.start_line, self.file_name),
		}
	}
}

impl Environment {
	/// The outermost scope of a source unit.
	pub fn root(file_name: impl Into<String>) -> Self {
		let frame = Frame { name: None, start_line: 1, file_name: file_name.into(), is_file: true };
		Self::with_frame(frame, None)
	}

	/// A nested scope for a block, a loop body or a function call.
	pub fn child(&self, name: Option<&str>, start_line: usize, file_name: impl Into<String>) -> Self {
		let frame =
			Frame { name: name.map(str::to_string), start_line, file_name: file_name.into(), is_file: false };
		Self::with_frame(frame, Some(self.clone()))
	}

	fn with_frame(frame: Frame, parent: Option<Environment>) -> Self {
		Self { scope: RcCell::new(Scope { variables: HashMap::new(), parent, frame }) }
	}

	pub fn parent(&self) -> Option<Environment> { self.scope.borrow().parent.clone() }

	pub fn frame(&self) -> Frame { self.scope.borrow().frame.clone() }

	/// Frames from the outermost scope down to this one.
	pub fn frames(&self) -> Vec<Frame> {
		let mut frames = vec![self.frame()];
		let mut current = self.parent();
		while let Some(environment) = current {
			frames.push(environment.frame());
			current = environment.parent();
		}
		frames.reverse();
		frames
	}

	/// Whether both handles refer to the same scope.
	pub fn ptr_eq(&self, other: &Environment) -> bool { self.scope.ptr_eq(&other.scope) }

	/// Bind a new name in this scope. A name can only be declared once per
	/// scope, shadowing an outer binding is fine.
	pub fn declare(&self, constant: bool, name: &str, value: Value, span: &Span) -> Result<(), Diagnostic> {
		if let Some(existing) = self.scope.borrow().variables.get(name) {
			let line = existing.declared_at.line();
			return Err(RuntimeErrorType::VariableAlreadyDeclared { name: name.to_string(), line }.at(span, self));
		}
		tracing::trace!(name, constant, "declare");
		let variable = Variable { value, constant, declared_at: span.clone() };
		self.scope.borrow_mut().variables.insert(name.to_string(), variable);
		Ok(())
	}

	pub fn get(&self, name: &str, span: &Span) -> Result<Value, Diagnostic> {
		let owner = self.resolve(name).ok_or_else(|| self.undefined(name, span))?;
		let scope = owner.scope.borrow();
		scope.variables.get(name).map(|variable| variable.value.clone()).ok_or_else(|| self.undefined(name, span))
	}

	/// Assign to an existing binding in the scope that owns it, returns the
	/// assigned value.
	pub fn set(&self, name: &str, value: Value, span: &Span) -> Result<Value, Diagnostic> {
		let owner = self.resolve(name).ok_or_else(|| self.undefined(name, span))?;
		let mut scope = owner.scope.borrow_mut();
		let variable = scope.variables.get_mut(name).ok_or_else(|| self.undefined(name, span))?;
		if variable.constant {
			return Err(RuntimeErrorType::ConstantAssignment(name.to_string()).at(span, self));
		}
		variable.value = value.clone();
		Ok(value)
	}

	/// The scope owning `name`, if any.
	fn resolve(&self, name: &str) -> Option<Environment> {
		let mut current = Some(self.clone());
		while let Some(environment) = current {
			if environment.scope.borrow().variables.contains_key(name) {
				return Some(environment);
			}
			current = environment.parent();
		}
		None
	}

	fn undefined(&self, name: &str, span: &Span) -> Diagnostic {
		RuntimeErrorType::UndefinedVariable(name.to_string()).at(span, self)
	}
}

// Values may hold the scope they live in, so only names are printed.
impl std::fmt::Debug for Environment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let scope = self.scope.borrow();
		let mut names: Vec<&String> = scope.variables.keys().collect();
		names.sort();
		f.debug_struct("Environment").field("frame", &scope.frame).field("variables", &names).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{error::ErrorKind, source::SourceUnit};

	fn span() -> Span {
		let source = SourceUnit::new("test", "x");
		Span::new(Default::default(), Default::default(), source)
	}

	fn int(value: i64, environment: &Environment) -> Value { Value::int(value, environment) }

	#[test]
	fn declare_and_get() {
		let root = Environment::root("test");
		root.declare(false, "x", int(1, &root), &span()).unwrap();
		assert_eq!(root.get("x", &span()).unwrap().to_string(), "1");

		let err = root.get("y", &span()).unwrap_err();
		assert_eq!(err.kind, ErrorKind::UndefinedVariable);
		assert_eq!(err.message, "a variable with the name of 'y' could not be found");
	}

	#[test]
	fn declare_twice() {
		let root = Environment::root("test");
		root.declare(false, "x", int(1, &root), &span()).unwrap();
		let err = root.declare(true, "x", int(2, &root), &span()).unwrap_err();
		assert_eq!(err.kind, ErrorKind::VariableAlreadyDeclared);
		assert_eq!(root.get("x", &span()).unwrap().to_string(), "1");

		// Shadowing in a child scope is fine.
		let child = root.child(None, 2, "test");
		child.declare(false, "x", int(2, &child), &span()).unwrap();
		assert_eq!(child.get("x", &span()).unwrap().to_string(), "2");
		assert_eq!(root.get("x", &span()).unwrap().to_string(), "1");
	}

	#[test]
	fn set_mutates_owner() {
		let root = Environment::root("test");
		root.declare(false, "x", int(1, &root), &span()).unwrap();
		let child = root.child(None, 2, "test").child(None, 3, "test");
		assert_eq!(child.set("x", int(5, &child), &span()).unwrap().to_string(), "5");
		assert_eq!(root.get("x", &span()).unwrap().to_string(), "5");

		let err = child.set("y", int(5, &child), &span()).unwrap_err();
		assert_eq!(err.kind, ErrorKind::UndefinedVariable);
	}

	#[test]
	fn constants_stay() {
		let root = Environment::root("test");
		root.declare(true, "x", int(1, &root), &span()).unwrap();
		let err = root.set("x", int(2, &root), &span()).unwrap_err();
		assert_eq!(err.kind, ErrorKind::ConstantVariableAssignment);
		assert_eq!(root.get("x", &span()).unwrap().to_string(), "1");
	}

	#[test]
	fn frames_outermost_first() {
		let root = Environment::root("main.snow");
		let call = root.child(Some("f"), 4, "main.snow");
		let block = call.child(None, 5, "main.snow");
		let frames: Vec<String> = block.frames().iter().map(ToString::to_string).collect();
		assert_eq!(frames, vec![
			"In file 'main.snow'",
			"In 'f' starting at line 4 in file 'main.snow'",
			"In anonymous block starting at line 5 in file 'main.snow'"
		]);
		assert!(block.parent().is_some_and(|parent| parent.ptr_eq(&call)));
		assert!(!block.ptr_eq(&call));
		assert!(root.parent().is_none());
	}
}
