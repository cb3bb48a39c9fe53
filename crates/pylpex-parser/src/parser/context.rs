//! Token-management primitives: a cursor over a pre-lexed token vector with
//! `bump`/`check`/`eat`/`expect` helpers, rather than re-lexing on demand.

use pylpex_ast::token::{Token, TokenKind};
use pylpex_errors::ParseError;
use pylpex_span::Position;

pub struct ParserContext {
    tokens: Vec<Token>,
    cursor: usize,
    pub loop_depth: usize,
}

impl ParserContext {
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens: Vec<Token> = tokens.into_iter().filter(|t| !t.is_trivia()).collect();
        Self { tokens, cursor: 0, loop_depth: 0 }
    }

    pub fn current(&self) -> &Token {
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    pub fn position(&self) -> Position {
        self.current().position
    }

    pub fn look_ahead(&self, offset: usize) -> &Token {
        let idx = (self.cursor + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub fn bump(&mut self) -> Token {
        let token = self.current().clone();
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
        token
    }

    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(&kind) {
            Ok(self.bump())
        } else {
            Err(ParseError::new(
                format!("expected {kind}, found {}", self.current_kind()),
                self.position(),
            ))
        }
    }

    pub fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.current_kind().clone() {
            TokenKind::Identifier(name) => {
                self.bump();
                Ok(name)
            }
            other => Err(ParseError::new(format!("expected identifier, found {other}"), self.position())),
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }
}
