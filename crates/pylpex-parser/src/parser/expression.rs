//! Expression parsing via precedence climbing: a single
//! `parse_binding_power`/`min_prec` loop rather than one function per
//! precedence level.

use super::context::ParserContext;
use pylpex_ast::expressions::{Argument, BinaryOp, DictEntry, Expression, ExpressionKind, UnaryOp};
use pylpex_ast::token::TokenKind;
use pylpex_errors::ParseError;

pub struct ExpressionParser<'p> {
    pub ctx: &'p mut ParserContext,
}

impl<'p> ExpressionParser<'p> {
    pub fn new(ctx: &'p mut ParserContext) -> Self {
        Self { ctx }
    }

    pub fn parse(&mut self) -> Result<Expression, ParseError> {
        self.parse_binding_power(0)
    }

    fn parse_binding_power(&mut self, min_prec: u8) -> Result<Expression, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            if min_prec == 0 && self.ctx.check(&TokenKind::If) {
                let position = left.position;
                self.ctx.bump();
                let condition = self.parse_binding_power(0)?;
                self.ctx.expect(TokenKind::Else)?;
                let if_false = self.parse_binding_power(0)?;
                left = Expression::new(
                    ExpressionKind::Ternary {
                        condition: Box::new(condition),
                        if_true: Box::new(left),
                        if_false: Box::new(if_false),
                    },
                    position,
                );
                continue;
            }

            let Some((prec, op, right_assoc)) = self.peek_binary_op() else { break };
            if prec < min_prec {
                break;
            }

            let position = left.position;
            self.consume_binary_op();
            let next_min = if right_assoc { prec } else { prec + 1 };
            let right = self.parse_binding_power(next_min)?;
            left = Expression::new(
                ExpressionKind::Binary { op, left: Box::new(left), right: Box::new(right) },
                position,
            );
        }

        Ok(left)
    }

    fn peek_binary_op(&self) -> Option<(u8, BinaryOp, bool)> {
        use TokenKind::*;
        Some(match self.ctx.current_kind() {
            Or => (1, BinaryOp::Or, false),
            And => (2, BinaryOp::And, false),
            EqEq => (3, BinaryOp::Eq, false),
            NotEq => (3, BinaryOp::NotEq, false),
            Lt => (4, BinaryOp::Lt, false),
            Gt => (4, BinaryOp::Gt, false),
            LtEq => (4, BinaryOp::LtEq, false),
            GtEq => (4, BinaryOp::GtEq, false),
            In => (4, BinaryOp::In, false),
            Not if matches!(self.ctx.look_ahead(1).kind, In) => (4, BinaryOp::NotIn, false),
            Plus => (5, BinaryOp::Add, false),
            Minus => (5, BinaryOp::Sub, false),
            Star => (6, BinaryOp::Mul, false),
            Slash => (6, BinaryOp::Div, false),
            Percent => (6, BinaryOp::Mod, false),
            StarStar => (8, BinaryOp::Pow, true),
            _ => return None,
        })
    }

    fn consume_binary_op(&mut self) {
        if matches!(self.ctx.current_kind(), TokenKind::Not) {
            self.ctx.bump();
            self.ctx.bump();
        } else {
            self.ctx.bump();
        }
    }

    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let position = self.ctx.position();
        match self.ctx.current_kind() {
            TokenKind::Plus => {
                self.ctx.bump();
                let operand = self.parse_unary()?;
                Ok(Expression::new(ExpressionKind::Unary { op: UnaryOp::Pos, operand: Box::new(operand) }, position))
            }
            TokenKind::Minus => {
                self.ctx.bump();
                let operand = self.parse_unary()?;
                Ok(Expression::new(ExpressionKind::Unary { op: UnaryOp::Neg, operand: Box::new(operand) }, position))
            }
            TokenKind::Not => {
                self.ctx.bump();
                let operand = self.parse_unary()?;
                Ok(Expression::new(ExpressionKind::Unary { op: UnaryOp::Not, operand: Box::new(operand) }, position))
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<Expression, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.ctx.current_kind() {
                TokenKind::LParen => {
                    let position = expr.position;
                    let arguments = self.parse_call_arguments()?;
                    expr = Expression::new(
                        ExpressionKind::Call { callee: Box::new(expr), arguments },
                        position,
                    );
                }
                TokenKind::Dot => {
                    let position = expr.position;
                    self.ctx.bump();
                    let attribute = self.ctx.expect_identifier()?;
                    expr = Expression::new(
                        ExpressionKind::Attribute { object: Box::new(expr), attribute },
                        position,
                    );
                }
                TokenKind::LBracket => {
                    let position = expr.position;
                    self.ctx.bump();
                    let index = self.parse()?;
                    self.ctx.expect(TokenKind::RBracket)?;
                    expr = Expression::new(
                        ExpressionKind::Index { collection: Box::new(expr), index: Box::new(index) },
                        position,
                    );
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<Argument>, ParseError> {
        self.ctx.expect(TokenKind::LParen)?;
        let mut arguments = Vec::new();
        while !self.ctx.check(&TokenKind::RParen) {
            let is_named = matches!(self.ctx.current_kind(), TokenKind::Identifier(_))
                && matches!(self.ctx.look_ahead(1).kind, TokenKind::Assign);
            let name = if is_named {
                let name = self.ctx.expect_identifier()?;
                self.ctx.bump(); // '='
                Some(name)
            } else {
                None
            };
            let value = self.parse()?;
            arguments.push(Argument { name, value });

            if !self.ctx.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.ctx.expect(TokenKind::RParen)?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let position = self.ctx.position();
        match self.ctx.current_kind().clone() {
            TokenKind::None => {
                self.ctx.bump();
                Ok(Expression::new(ExpressionKind::None, position))
            }
            TokenKind::Integer(v) => {
                self.ctx.bump();
                Ok(Expression::new(ExpressionKind::Integer(v), position))
            }
            TokenKind::Float(v) => {
                self.ctx.bump();
                Ok(Expression::new(ExpressionKind::Float(v), position))
            }
            TokenKind::String(v) => {
                self.ctx.bump();
                Ok(Expression::new(ExpressionKind::String(v), position))
            }
            TokenKind::Boolean(v) => {
                self.ctx.bump();
                Ok(Expression::new(ExpressionKind::Boolean(v), position))
            }
            TokenKind::Identifier(name) => {
                self.ctx.bump();
                Ok(Expression::new(ExpressionKind::Identifier(name), position))
            }
            TokenKind::LParen => {
                self.ctx.bump();
                let inner = self.parse()?;
                self.ctx.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_list(position),
            TokenKind::LBrace => self.parse_dict(position),
            other => Err(ParseError::new(format!("unexpected token {other}"), position)),
        }
    }

    fn parse_list(&mut self, position: pylpex_span::Position) -> Result<Expression, ParseError> {
        self.ctx.expect(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        while !self.ctx.check(&TokenKind::RBracket) {
            elements.push(self.parse()?);
            if !self.ctx.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.ctx.expect(TokenKind::RBracket)?;
        Ok(Expression::new(ExpressionKind::List(elements), position))
    }

    fn parse_dict(&mut self, position: pylpex_span::Position) -> Result<Expression, ParseError> {
        self.ctx.expect(TokenKind::LBrace)?;
        let mut entries = Vec::new();
        while !self.ctx.check(&TokenKind::RBrace) {
            let key_position = self.ctx.position();
            let key = match self.ctx.current_kind().clone() {
                TokenKind::String(s) => {
                    self.ctx.bump();
                    s
                }
                other => {
                    return Err(ParseError::new(
                        format!("dictionary keys must be string literals, found {other}"),
                        key_position,
                    ))
                }
            };
            self.ctx.expect(TokenKind::Colon)?;
            let value = self.parse()?;
            entries.push(DictEntry { key, value });
            if !self.ctx.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.ctx.expect(TokenKind::RBrace)?;
        Ok(Expression::new(ExpressionKind::Dictionary(entries), position))
    }
}
