//! Error types for Gravl parsing and the serde bridge.
//!
//! Parsing reports a single [`ParserError`]: the first [`Fault`] found plus the
//! line and column the cursor stood at. Parsing is fail-fast, so there is never
//! a partial tree alongside an error.
//!
//! ## Fault Categories
//!
//! - **Syntax faults**: [`Fault::UnexpectedChar`] and [`Fault::UnexpectedEof`]
//! - **Semantic faults**: [`Fault::IllegalAttribute`] (a name position held a
//!   node with no plain values) and [`Fault::IllegalValue`] (`=` followed by no
//!   value)
//! - **Resource faults**: [`Fault::NestingTooDeep`]
//!
//! Lines are 1-based and columns are 0-based.
//!
//! ## Examples
//!
//! ```rust
//! use gravl::{parse, Fault};
//!
//! let err = parse("[a = ]").unwrap_err();
//! assert_eq!((err.line, err.col), (1, 4));
//! assert_eq!(err.fault, Fault::IllegalValue);
//! assert!(err.to_string().ends_with("(Line: 1, Col: 4)"));
//! ```
//!
//! The crate-level [`Error`] wraps parse errors together with the failures of
//! the I/O helpers and the typed serde bridge.

use crate::node::Position;
use std::fmt;
use thiserror::Error;

/// Reason attached to a backslash followed by a character outside the escape table.
pub(crate) const INVALID_ESCAPE: &str =
    "A backslash must be followed by a reserved character, \"n\", \"t\" or a space.";

/// Reason attached to characters left over after the document body.
pub(crate) const EXTRANEOUS: &str =
    "Extraneous character found in document. Ensure all brackets and quotes are balanced.";

/// Reason attached to a node body that does not end in `]`.
pub(crate) const UNCLOSED_NODE: &str = "Expected \"]\" to close the node.";

/// The kind of problem a parse ran into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// A character that cannot appear at this point of the grammar.
    #[error("Unexpected character: \"{ch}\". {reason}")]
    UnexpectedChar { ch: char, reason: String },

    /// The input ended in the middle of a construct.
    #[error("Unexpected end of file. Ensure all brackets and quotes are balanced.")]
    UnexpectedEof,

    /// A node on the left of `=` reduced to no plain value.
    #[error("Illegal attribute. Attribute names must reduce to one or more plain values.")]
    IllegalAttribute,

    /// An `=` was not followed by any value.
    #[error("Illegal value. Every \"=\" must be followed by at least one value.")]
    IllegalValue,

    /// Brackets nested deeper than the configured limit.
    #[error("Nesting too deep. Nodes may be nested at most {limit} levels.")]
    NestingTooDeep { limit: usize },
}

impl Fault {
    /// Creates an [`Fault::UnexpectedChar`] with the given reason.
    pub fn unexpected_char(ch: char, reason: &str) -> Self {
        Fault::UnexpectedChar {
            ch,
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for malformed-token faults (as opposed to semantic or
    /// resource faults).
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Fault::UnexpectedChar { .. } | Fault::UnexpectedEof)
    }
}

/// A fault together with the position the parser detected it at.
///
/// # Examples
///
/// ```rust
/// use gravl::{parse, Fault};
///
/// let err = parse("\"abc").unwrap_err();
/// assert_eq!(err.fault, Fault::UnexpectedEof);
/// assert_eq!((err.line, err.col), (1, 4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{fault} (Line: {line}, Col: {col})")]
pub struct ParserError {
    /// 1-based line.
    pub line: usize,
    /// 0-based column.
    pub col: usize,
    pub fault: Fault,
}

impl ParserError {
    /// Creates an error at the given position.
    pub fn new(position: Position, fault: Fault) -> Self {
        ParserError {
            line: position.line,
            col: position.col,
            fault,
        }
    }

    /// The position as a [`Position`].
    #[must_use]
    pub const fn position(&self) -> Position {
        Position {
            line: self.line,
            col: self.col,
        }
    }
}

/// Errors raised outside the grammar: I/O helpers and the typed serde bridge.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The input text is not valid Gravl.
    #[error(transparent)]
    Parse(#[from] ParserError),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A node had the wrong shape for the requested Rust type.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A leaf literal could not be read as the requested scalar.
    #[error("Invalid {expected} literal: \"{literal}\"")]
    InvalidLiteral { expected: String, literal: String },

    /// A Rust value with no Gravl representation.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gravl::Error;
    ///
    /// let err = Error::type_mismatch("sequence", "leaf");
    /// assert!(err.to_string().contains("expected sequence"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an invalid literal error.
    pub fn invalid_literal(expected: &str, literal: &str) -> Self {
        Error::InvalidLiteral {
            expected: expected.to_string(),
            literal: literal.to_string(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format() {
        let err = ParserError::new(
            Position { line: 3, col: 7 },
            Fault::unexpected_char('=', UNCLOSED_NODE),
        );
        assert_eq!(
            err.to_string(),
            "Unexpected character: \"=\". Expected \"]\" to close the node. (Line: 3, Col: 7)"
        );
    }

    #[test]
    fn test_eof_message() {
        let err = ParserError::new(Position { line: 1, col: 4 }, Fault::UnexpectedEof);
        assert_eq!(
            err.to_string(),
            "Unexpected end of file. Ensure all brackets and quotes are balanced. (Line: 1, Col: 4)"
        );
    }

    #[test]
    fn test_fault_categories() {
        assert!(Fault::UnexpectedEof.is_syntax());
        assert!(Fault::unexpected_char('x', "").is_syntax());
        assert!(!Fault::IllegalAttribute.is_syntax());
        assert!(!Fault::IllegalValue.is_syntax());
        assert!(!Fault::NestingTooDeep { limit: 4 }.is_syntax());
    }

    #[test]
    fn test_parse_error_converts() {
        let err: Error = ParserError::new(Position::start(), Fault::IllegalValue).into();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("(Line: 1, Col: 0)"));
    }
}
