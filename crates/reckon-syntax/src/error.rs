//! Error handling types and utilities for the Reckon expression toolchain.
//!
//! This module provides the unified error type used by every Reckon component,
//! from the lexer through evaluation, reduction and formatting. Each error has
//! a typed [`ErrorKind`] so hosts can react to specific failures (an undefined
//! variable, an arity mismatch) and an optional source location for errors that
//! can be pinned to the input text.
//!
//! # Error Philosophy
//!
//! - **Typed kinds**: callers match on [`ErrorKind`] instead of parsing messages
//! - **Precise location information**: line and column for lexer/parser errors
//! - **No local recovery**: errors propagate with `?` up to the top-level call
//!
//! # Examples
//!
//! ```rust
//! use reckon_syntax::error::{Error, ErrorKind, Result, error};
//!
//! fn lookup(name: &str) -> Result<i32> {
//!     error(ErrorKind::UndefinedVariable(name.to_string()))
//! }
//!
//! let err = lookup("x").unwrap_err();
//! assert_eq!(err.kind, ErrorKind::UndefinedVariable("x".into()));
//! assert_eq!(err.to_string(), "Undefined variable: x");
//!
//! let located = Error::with_span(ErrorKind::Syntax("Unexpected ')'".into()), 1, 4);
//! assert_eq!(located.to_string(), "Unexpected ')' at 1:4");
//! ```

use std::fmt;

use thiserror::Error as ThisError;

/// Inclusive argument-count range accepted by a function.
///
/// `max` of `None` means the function takes any number of arguments at or
/// above `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    pub const fn new(min: usize, max: Option<usize>) -> Self {
        Self { min, max }
    }

    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    /// Whether `count` arguments fall inside the range.
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, "[{}, \u{221e})", self.min),
        }
    }
}

/// The kinds of failure the Reckon toolchain can report.
///
/// The first six variants are raised by the evaluation core; the remaining
/// ones come from the lexer/parser and from function implementations.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ErrorKind {
    /// A variable reference names something absent from the variable store.
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// An operator or function name has no registered function.
    #[error("Undefined function: {0}")]
    UndefinedFunction(String),

    /// Argument count outside the function's accepted range.
    #[error("Function '{name}' expected {expected} arguments, got {got}")]
    Arity {
        name: String,
        got: usize,
        expected: Arity,
    },

    /// A function's own parameter check rejected an argument.
    #[error("Illegal argument type for '{name}' at position {index}: expected {expected}, got {actual}")]
    ParameterType {
        name: String,
        index: usize,
        expected: String,
        actual: String,
    },

    /// A node kind the consumer does not know how to handle.
    #[error("Unknown node type: {0}")]
    UnknownNodeKind(String),

    /// The formatter found an operator symbol without a precedence rank.
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Lexical or grammatical error in the source text.
    #[error("{0}")]
    Syntax(String),

    /// A numeric literal that cannot be read as a decimal.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Division by zero")]
    DivisionByZero,

    /// Function-specific failure (negative square root, bad scale, ...).
    #[error("{0}")]
    Evaluation(String),
}

/// An error that occurred during Reckon expression processing.
///
/// Errors raised while scanning or parsing carry the 1-based line and column
/// of the offending input; errors raised by evaluation, reduction or
/// formatting have no location because the AST does not keep spans.
///
/// # Examples
///
/// ```rust
/// use reckon_syntax::{Error, ErrorKind};
///
/// let runtime = Error::new(ErrorKind::DivisionByZero);
/// assert_eq!(runtime.to_string(), "Division by zero");
///
/// let syntax = Error::with_span(ErrorKind::Syntax("Expected ')'".into()), 2, 7);
/// assert_eq!(syntax.to_string(), "Expected ')' at 2:7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// What went wrong
    pub kind: ErrorKind,

    /// Optional line number in the source text (1-based)
    pub line: Option<usize>,

    /// Optional column number in the source text (1-based)
    pub col: Option<usize>,
}

impl Error {
    /// Creates a new error of the given kind without location information.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            line: None,
            col: None,
        }
    }

    /// Creates a new error of the given kind located at `line:col`.
    ///
    /// ```rust
    /// use reckon_syntax::{Error, ErrorKind};
    ///
    /// let error = Error::with_span(ErrorKind::Syntax("Unexpected token '('".into()), 5, 12);
    /// assert_eq!(error.line, Some(5));
    /// ```
    pub fn with_span(kind: ErrorKind, line: usize, col: usize) -> Self {
        Self {
            kind,
            line: Some(line),
            col: Some(col),
        }
    }

    /// Shorthand for a function-specific [`ErrorKind::Evaluation`] failure.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Evaluation(msg.into()))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(l), Some(c)) = (self.line, self.col) {
            write!(f, "{} at {}:{}", self.kind, l, c)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

/// A specialized `Result` type for Reckon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to create an error result.
///
/// Shorthand for `Err(Error::new(kind))`.
///
/// ```rust
/// use reckon_syntax::error::{ErrorKind, Result, error};
///
/// fn divide(a: i32, b: i32) -> Result<i32> {
///     if b == 0 { error(ErrorKind::DivisionByZero) } else { Ok(a / b) }
/// }
/// assert!(divide(1, 0).is_err());
/// ```
pub fn error<T>(kind: ErrorKind) -> Result<T> {
    Err(Error::new(kind))
}

/// Convenience function to create an error result with source location.
///
/// Shorthand for `Err(Error::with_span(kind, line, col))`.
pub fn error_at<T>(line: usize, col: usize, kind: ErrorKind) -> Result<T> {
    Err(Error::with_span(kind, line, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_range_rendering() {
        assert_eq!(Arity::exactly(2).to_string(), "[2, 2]");
        assert_eq!(Arity::at_least(1).to_string(), "[1, \u{221e})");
    }

    #[test]
    fn arity_accepts_bounds() {
        let two = Arity::exactly(2);
        assert!(!two.accepts(1));
        assert!(two.accepts(2));
        assert!(!two.accepts(3));
        assert!(Arity::at_least(0).accepts(100));
    }

    #[test]
    fn arity_error_names_function_and_range() {
        let err = Error::new(ErrorKind::Arity {
            name: "set".into(),
            got: 3,
            expected: Arity::exactly(2),
        });
        assert_eq!(err.to_string(), "Function 'set' expected [2, 2] arguments, got 3");
    }

    #[test]
    fn located_errors_show_position() {
        let err = Error::with_span(ErrorKind::Syntax("Unterminated string".into()), 1, 3);
        assert_eq!(err.to_string(), "Unterminated string at 1:3");
    }
}
