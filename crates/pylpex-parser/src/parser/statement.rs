//! Statement parsing: keyword dispatch, block bodies, and assignment-target
//! validation.

use super::context::ParserContext;
use super::expression::ExpressionParser;
use pylpex_ast::expressions::{AssignOp, ExpressionKind, FunctionDef, Parameter};
use pylpex_ast::statements::{Program, Statement, StatementKind};
use pylpex_ast::token::TokenKind;
use pylpex_errors::ParseError;

pub struct StatementParser<'p> {
    pub ctx: &'p mut ParserContext,
}

impl<'p> StatementParser<'p> {
    pub fn new(ctx: &'p mut ParserContext) -> Self {
        Self { ctx }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.ctx.is_eof() {
            statements.push(self.parse_statement()?);
        }
        Ok(Program { statements })
    }

    fn expr(&mut self) -> Result<pylpex_ast::expressions::Expression, ParseError> {
        ExpressionParser::new(self.ctx).parse()
    }

    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.ctx.current_kind() {
            TokenKind::Function => self.parse_function_def(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => self.parse_break(),
            TokenKind::Continue => self.parse_continue(),
            _ => self.parse_expression_or_assignment(),
        }
    }

    fn parse_expression_or_assignment(&mut self) -> Result<Statement, ParseError> {
        let position = self.ctx.position();
        let expr = self.expr()?;

        let assign_op = assignment_op(self.ctx.current_kind());
        if let Some(op) = assign_op {
            if !expr.is_assignable() {
                return Err(ParseError::new(
                    "left-hand side of an assignment must be a variable, attribute, or index",
                    position,
                ));
            }
            self.ctx.bump();
            let value = self.expr()?;
            self.ctx.eat(&TokenKind::Semicolon);
            return Ok(Statement::new(
                StatementKind::Expression(pylpex_ast::expressions::Expression::new(
                    ExpressionKind::Assignment { target: Box::new(expr), op, value: Box::new(value) },
                    position,
                )),
                position,
            ));
        }

        self.ctx.eat(&TokenKind::Semicolon);
        Ok(Statement::new(StatementKind::Expression(expr), position))
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.ctx.expect(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.ctx.check(&TokenKind::RBrace) {
            statements.push(self.parse_statement()?);
        }
        self.ctx.expect(TokenKind::RBrace)?;
        Ok(statements)
    }

    fn parse_block_or_single(&mut self) -> Result<Vec<Statement>, ParseError> {
        if self.ctx.check(&TokenKind::LBrace) {
            self.parse_block()
        } else {
            Ok(vec![self.parse_statement()?])
        }
    }

    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        let position = self.ctx.expect(TokenKind::If)?.position;
        let condition = self.expr()?;
        let then_block = self.parse_block_or_single()?;
        let else_block = if self.ctx.eat(&TokenKind::Else) {
            if self.ctx.check(&TokenKind::If) {
                Some(vec![self.parse_if()?])
            } else {
                Some(self.parse_block_or_single()?)
            }
        } else {
            None
        };
        Ok(Statement::new(StatementKind::If { condition, then_block, else_block }, position))
    }

    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        let position = self.ctx.expect(TokenKind::While)?.position;
        let condition = self.expr()?;
        self.ctx.loop_depth += 1;
        let body = self.parse_block_or_single();
        self.ctx.loop_depth -= 1;
        Ok(Statement::new(StatementKind::While { condition, body: body? }, position))
    }

    fn parse_for(&mut self) -> Result<Statement, ParseError> {
        let position = self.ctx.expect(TokenKind::For)?.position;
        let variable = self.ctx.expect_identifier()?;
        self.ctx.expect(TokenKind::In)?;
        let iterable = self.expr()?;
        self.ctx.loop_depth += 1;
        let body = self.parse_block_or_single();
        self.ctx.loop_depth -= 1;
        Ok(Statement::new(StatementKind::For { variable, iterable, body: body? }, position))
    }

    fn parse_break(&mut self) -> Result<Statement, ParseError> {
        let position = self.ctx.expect(TokenKind::Break)?.position;
        if self.ctx.loop_depth == 0 {
            return Err(ParseError::new("'break' can only be used inside a loop", position));
        }
        self.ctx.eat(&TokenKind::Semicolon);
        Ok(Statement::new(StatementKind::Break, position))
    }

    fn parse_continue(&mut self) -> Result<Statement, ParseError> {
        let position = self.ctx.expect(TokenKind::Continue)?.position;
        if self.ctx.loop_depth == 0 {
            return Err(ParseError::new("'continue' can only be used inside a loop", position));
        }
        self.ctx.eat(&TokenKind::Semicolon);
        Ok(Statement::new(StatementKind::Continue, position))
    }

    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        let position = self.ctx.expect(TokenKind::Return)?.position;
        let has_value = !matches!(
            self.ctx.current_kind(),
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        );
        let value = if has_value { Some(self.expr()?) } else { None };
        self.ctx.eat(&TokenKind::Semicolon);
        Ok(Statement::new(StatementKind::Return(value), position))
    }

    fn parse_type_hint(&mut self) -> Result<Option<String>, ParseError> {
        if self.ctx.eat(&TokenKind::Colon) {
            Ok(Some(self.ctx.expect_identifier()?))
        } else {
            Ok(None)
        }
    }

    fn parse_function_def(&mut self) -> Result<Statement, ParseError> {
        let position = self.ctx.expect(TokenKind::Function)?.position;
        let name = self.ctx.expect_identifier()?;
        self.ctx.expect(TokenKind::LParen)?;

        let mut parameters = Vec::new();
        while !self.ctx.check(&TokenKind::RParen) {
            let pname = self.ctx.expect_identifier()?;
            let type_hint = self.parse_type_hint()?;
            let default = if self.ctx.eat(&TokenKind::Assign) { Some(self.expr()?) } else { None };
            parameters.push(Parameter { name: pname, default, type_hint });
            if !self.ctx.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.ctx.expect(TokenKind::RParen)?;

        let return_hint = if self.ctx.eat(&TokenKind::Arrow) { Some(self.ctx.expect_identifier()?) } else { None };

        let body = self.parse_block()?;
        Ok(Statement::new(
            StatementKind::FunctionDef(FunctionDef { name, parameters, body, return_hint, position }),
            position,
        ))
    }
}

fn assignment_op(kind: &TokenKind) -> Option<AssignOp> {
    Some(match kind {
        TokenKind::Assign => AssignOp::Assign,
        TokenKind::PlusEq => AssignOp::AddAssign,
        TokenKind::MinusEq => AssignOp::SubAssign,
        TokenKind::StarEq => AssignOp::MulAssign,
        TokenKind::SlashEq => AssignOp::DivAssign,
        TokenKind::PercentEq => AssignOp::ModAssign,
        TokenKind::StarStarEq => AssignOp::PowAssign,
        _ => return None,
    })
}
