//! Lexer and parser for the pylpex scripting language.

pub mod parser;
pub mod tokenizer;

use pylpex_ast::statements::Program;
use pylpex_errors::ParseError;

/// Lexes then parses `source` into a [`Program`], the single public
/// entry point most callers need.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenizer::Lexer::new(source).tokenize()?;
    tracing::debug!(token_count = tokens.len(), "lexed source");
    let program = parser::parse(tokens)?;
    tracing::debug!(statement_count = program.statements.len(), "parsed program");
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_program() {
        let program = parse_source("x = 1 + 2 * 3;").unwrap();
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn rejects_break_outside_loop() {
        assert!(parse_source("break;").is_err());
    }

    #[test]
    fn accepts_ternary() {
        let program = parse_source(r#"y = "ok" if true else "no";"#).unwrap();
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn accepts_type_hints_as_pass_through() {
        let program = parse_source("function add(a: int, b: int = 0) -> int { return a + b }").unwrap();
        assert_eq!(program.statements.len(), 1);
    }
}
