//! # How snow source text turns into values
//!
//! User's source code: `var average = (min + max) / 2`

//! ## Scanning
//!
//! Also known as `lexing` or `lexical analysis`, takes in the characters and
//! converts them into tokens. Single characters `(`, `,`, `.`, numbers `123`,
//! string literals `"hi!"`, identifiers `min` are all tokens.
//!
//! Spaces and comments are ignored, newlines are kept because they end
//! statements. So the tokens are
//! `["var", "average", "=", "(", "min", "+", "max", ")", "/", "2", EOF]`.
//!
//! The scanner keeps going after an error, so every lexical error of a unit
//! is reported at once.

//! ## Parsing
//!
//! A `parser` builds a tree structure of tokens -- `abstract syntax tree` or
//! `AST`. The `parser` also reports `syntax errors`, stopping at the first one.
//!
//! ``` markdown
//! average (Statement::VarDeclaration)
//! └── / (Expression::Binary)
//!     ├── (group) (Expression::Grouping)
//!     │   └── + (Expression::Binary)
//!     │       ├── min (Expression::Variable)
//!     │       └── max (Expression::Variable)
//!     └── 2 (Expression::Literal)
//! ```

//! ## Tree-walk interpreter
//!
//! Execute code right after parsing it to AST. Every top level statement that
//! has a value contributes it to the result, declarations live in a chain of
//! [`Environment`] scopes and functions capture the scope they are declared
//! in.

//! ## Diagnostics
//!
//! Every error is a [`Diagnostic`] pointing at a span of its source unit.
//! Runtime errors also remember the scope they happened in and render the
//! chain of scopes as a call stack:
//!
//! ``` text
//! Stack with most recent last:
//! In file 'main.snow'
//! In 'half' starting at line 1 in file 'main.snow'
//! Division by zero error: unable to divide 'INT' with value of '1' by 'INT' with value of '0'
//! 2 | 	n / 0
//!     	^^^^^
//! ```

pub mod cli;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
mod snower;
pub mod source;
pub mod statement;
mod utils;

pub use environment::Environment;
pub use error::{Diagnostic, ErrorFamily, ErrorKind, SnowError};
pub use interpreter::value::{Value, ValueKind};
pub use snower::{Execution, Options, Snower, execute};
pub use source::{Position, SourceUnit, Span};
