//! Source units and the positions that point into them.
//!
//! Every token and every syntax tree node carries a [`Span`], and every span
//! keeps a handle on the [`SourceUnit`] it came from, so a diagnostic can
//! always print the offending line no matter how far it travelled.

use std::{fmt::Display, rc::Rc};

#[derive(Debug)]
struct Source {
	name: String,
	code: String,
}

/// A named, immutable unit of program text.
///
/// Clone is shallow, every clone shares the same text.
#[derive(Debug, Clone)]
pub struct SourceUnit {
	inner: Rc<Source>,
}

impl SourceUnit {
	pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
		Self { inner: Rc::new(Source { name: name.into(), code: code.into() }) }
	}

	pub fn name(&self) -> &str { &self.inner.name }

	pub fn code(&self) -> &str { &self.inner.code }

	/// The text of a 1-based line, without its line break.
	pub fn line(&self, line: usize) -> Option<&str> {
		self.code().split('\n').nth(line.checked_sub(1)?).map(|l| l.strip_suffix('\r').unwrap_or(l))
	}
}

/// A point in a [`SourceUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
	/// 1-based line number.
	pub line:   usize,
	/// 0-based column, counted in characters.
	pub column: usize,
	/// Byte offset into the source code.
	pub index:  usize,
}

impl Position {
	pub fn new(line: usize, column: usize, index: usize) -> Self { Self { line, column, index } }
}

impl Display for Position {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line, self.column + 1)
	}
}

/// A half-open range `[start, end)` inside a source unit.
#[derive(Debug, Clone)]
pub struct Span {
	pub start:  Position,
	pub end:    Position,
	pub source: SourceUnit,
}

impl Span {
	pub fn new(start: Position, end: Position, source: SourceUnit) -> Self {
		debug_assert!(end >= start, "span ends before it starts");
		Self { start, end, source }
	}

	/// A span from the start of `self` to the end of `other`.
	pub fn to(&self, other: &Span) -> Span { Span::new(self.start, other.end.max(self.start), self.source.clone()) }

	pub fn line(&self) -> usize { self.start.line }

	pub fn file_name(&self) -> &str { self.source.name() }

	/// The raw text covered by the span.
	pub fn text(&self) -> &str { self.source.code().get(self.start.index..self.end.index).unwrap_or_default() }
}

impl Display for Span {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.source.name(), self.start)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lines_are_one_based() {
		let source = SourceUnit::new("test", "var a = 1\r\nvar b = 2\n");
		assert_eq!(source.line(1), Some("var a = 1"));
		assert_eq!(source.line(2), Some("var b = 2"));
		assert_eq!(source.line(3), Some(""));
		assert_eq!(source.line(0), None);
		assert_eq!(source.line(4), None);
	}

	#[test]
	fn span_covers_text() {
		let source = SourceUnit::new("test", "1 + 23");
		let left = Span::new(Position::new(1, 0, 0), Position::new(1, 1, 1), source.clone());
		let right = Span::new(Position::new(1, 4, 4), Position::new(1, 6, 6), source);
		assert_eq!(left.text(), "1");
		assert_eq!(right.text(), "23");
		assert_eq!(left.to(&right).text(), "1 + 23");
		assert_eq!(left.to(&right).to_string(), "test:1:1");
	}
}
