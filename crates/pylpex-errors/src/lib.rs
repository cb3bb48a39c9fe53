//! Error taxonomy for the pylpex interpreter.
//!
//! There are exactly two kinds of failure: a [`ParseError`] raised while
//! turning source text into an AST, and a [`RuntimeError`] raised while
//! evaluating one. Both carry an optional source [`Position`] and are
//! annotated once, at the point they are raised — outer frames propagate
//! them with `?` rather than wrapping them again.

use pylpex_span::Position;
use std::fmt;
use thiserror::Error;

/// A failure while lexing or parsing source text.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub position: Option<Position>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self { message: message.into(), position: Some(position) }
    }

    pub fn without_position(message: impl Into<String>) -> Self {
        Self { message: message.into(), position: None }
    }
}

/// A failure while evaluating an already-parsed program.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub message: String,
    pub position: Option<Position>,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self { message: message.into(), position: Some(position) }
    }

    pub fn without_position(message: impl Into<String>) -> Self {
        Self { message: message.into(), position: None }
    }
}

/// The top-level error produced by running the interpreter end to end.
#[derive(Debug, Clone, Error)]
pub enum PylpexError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl PylpexError {
    pub fn position(&self) -> Option<Position> {
        match self {
            PylpexError::Parse(e) => e.position,
            PylpexError::Runtime(e) => e.position,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PylpexError::Parse(e) => &e.message,
            PylpexError::Runtime(e) => &e.message,
        }
    }
}

/// Renders a diagnostic in the interpreter's single stable user-facing shape:
/// `Error at line L, column C: <message>`.
impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.position() {
            Some(pos) => write!(f, "Error at {pos}: {}", self.0.message()),
            None => write!(f, "Error: {}", self.0.message()),
        }
    }
}

/// Wraps a [`PylpexError`] for display purposes.
pub struct Diagnostic<'a>(pub &'a PylpexError);

pub type ParseResult<T> = Result<T, ParseError>;
pub type RuntimeResult<T> = Result<T, RuntimeError>;
pub type PylpexResult<T> = Result<T, PylpexError>;
