mod context;
mod expression;
mod statement;

pub use context::ParserContext;
pub use expression::ExpressionParser;
pub use statement::StatementParser;

use pylpex_ast::statements::Program;
use pylpex_ast::token::Token;
use pylpex_errors::ParseError;

/// Parses a full token stream (including trivia) into a [`Program`].
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    let mut ctx = ParserContext::new(tokens);
    let mut parser = StatementParser::new(&mut ctx);
    parser.parse_program()
}
