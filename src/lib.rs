//! Library entry point wiring the lexer, parser, and evaluator together.

use pylpex_errors::{PylpexError, PylpexResult};
use pylpex_eval::{Evaluator, Value};

/// Parses and evaluates `source`, returning its final value or the first
/// diagnosed error.
pub fn run(source: &str) -> PylpexResult<Value> {
    let program = pylpex_parser::parse_source(source).map_err(PylpexError::from)?;
    let evaluator = Evaluator::new();
    let value = evaluator.evaluate_program(&program).map_err(PylpexError::from)?;
    Ok(value)
}

/// Renders a [`PylpexError`] in the interpreter's stable diagnostic shape.
pub fn format_error(error: &PylpexError) -> String {
    pylpex_errors::Diagnostic(error).to_string()
}
