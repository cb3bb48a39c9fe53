//! Hand-rolled character scanner: a single cursor over the remaining
//! input, advanced one maximal-munch token at a time, rather than a
//! generated lexer, so that per-character line/column bookkeeping and
//! escape handling stay simple.

use pylpex_ast::token::{lookup_keyword, Token, TokenKind};
use pylpex_errors::ParseError;
use pylpex_span::Position;
use std::iter::Peekable;
use std::str::Chars;

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    position: Position,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { chars: source.chars().peekable(), position: Position::start() }
    }

    /// Lexes the entire input into a token stream terminated by `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let at_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if at_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position.advance(ch);
        Some(ch)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_second(&self) -> Option<char> {
        let mut clone = self.chars.clone();
        clone.next();
        clone.next()
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_inline_whitespace();

        let start = self.position;
        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", start));
        };

        if ch == '\n' {
            self.bump();
            return Ok(Token::new(TokenKind::Newline, "\n", start));
        }

        if ch == '/' && self.peek_second() == Some('/') {
            return Ok(self.eat_line_comment(start));
        }
        if ch == '/' && self.peek_second() == Some('*') {
            return self.eat_block_comment(start);
        }

        if ch.is_ascii_digit() {
            return Ok(self.eat_number(start));
        }
        if ch == '"' || ch == '\'' {
            return self.eat_string(start, ch);
        }
        if ch == '_' || ch.is_alphabetic() {
            return Ok(self.eat_identifier(start));
        }

        self.eat_operator(start)
    }

    fn skip_inline_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' || !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn eat_line_comment(&mut self, start: Position) -> Token {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            lexeme.push(c);
            self.bump();
        }
        Token::new(TokenKind::Comment, lexeme, start)
    }

    fn eat_block_comment(&mut self, start: Position) -> Result<Token, ParseError> {
        let mut lexeme = String::new();
        self.bump(); // '/'
        self.bump(); // '*'
        lexeme.push('/');
        lexeme.push('*');
        loop {
            match self.bump() {
                None => return Err(ParseError::new("unterminated block comment", start)),
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    lexeme.push_str("*/");
                    break;
                }
                Some(c) => lexeme.push(c),
            }
        }
        Ok(Token::new(TokenKind::Comment, lexeme, start))
    }

    fn eat_number(&mut self, start: Position) -> Token {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            lexeme.push(c);
            self.bump();
        }

        let mut is_float = false;
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            lexeme.push('.');
            self.bump();
            while let Some(c) = self.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                lexeme.push(c);
                self.bump();
            }
        }

        if is_float {
            let value: f64 = lexeme.parse().unwrap_or(0.0);
            Token::new(TokenKind::Float(value), lexeme, start)
        } else {
            let value: i64 = lexeme.parse().unwrap_or(0);
            Token::new(TokenKind::Integer(value), lexeme, start)
        }
    }

    fn eat_string(&mut self, start: Position, quote: char) -> Result<Token, ParseError> {
        self.bump(); // opening quote
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::new("unterminated string literal", start)),
                Some(c) if c == quote => break,
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('\'') => value.push('\''),
                    Some('"') => value.push('"'),
                    Some(other) => value.push(other),
                    None => return Err(ParseError::new("unterminated string literal", start)),
                },
                Some(c) => value.push(c),
            }
        }
        Ok(Token::new(TokenKind::String(value.clone()), value, start))
    }

    fn eat_identifier(&mut self, start: Position) -> Token {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if c != '_' && !c.is_alphanumeric() {
                break;
            }
            lexeme.push(c);
            self.bump();
        }
        match lookup_keyword(&lexeme) {
            Some(kind) => Token::new(kind, lexeme, start),
            None => Token::new(TokenKind::Identifier(lexeme.clone()), lexeme, start),
        }
    }

    fn eat_operator(&mut self, start: Position) -> Result<Token, ParseError> {
        let three = |this: &mut Self, a: char, b: char, c: char, long: TokenKind, lex: &str| -> Option<Token> {
            if this.peek() == Some(a) && this.peek_second() == Some(b) {
                let mut clone = this.chars.clone();
                clone.next();
                clone.next();
                if clone.peek() == Some(&c) {
                    this.bump();
                    this.bump();
                    this.bump();
                    return Some(Token::new(long, lex, start));
                }
            }
            None
        };

        if let Some(tok) = three(self, '*', '*', '=', TokenKind::StarStarEq, "**=") {
            return Ok(tok);
        }

        let ch = self.bump().expect("checked by caller");
        let second = self.peek();

        macro_rules! two {
            ($expected:literal, $kind:expr, $lex:literal) => {
                if second == Some($expected) {
                    self.bump();
                    return Ok(Token::new($kind, $lex, start));
                }
            };
        }

        match ch {
            '+' => {
                two!('=', TokenKind::PlusEq, "+=");
                Ok(Token::new(TokenKind::Plus, "+", start))
            }
            '-' => {
                two!('=', TokenKind::MinusEq, "-=");
                if second == Some('>') {
                    self.bump();
                    return Ok(Token::new(TokenKind::Arrow, "->", start));
                }
                Ok(Token::new(TokenKind::Minus, "-", start))
            }
            '*' => {
                if second == Some('*') {
                    self.bump();
                    if self.peek() == Some('=') {
                        self.bump();
                        return Ok(Token::new(TokenKind::StarStarEq, "**=", start));
                    }
                    return Ok(Token::new(TokenKind::StarStar, "**", start));
                }
                two!('=', TokenKind::StarEq, "*=");
                Ok(Token::new(TokenKind::Star, "*", start))
            }
            '/' => {
                two!('=', TokenKind::SlashEq, "/=");
                Ok(Token::new(TokenKind::Slash, "/", start))
            }
            '%' => {
                two!('=', TokenKind::PercentEq, "%=");
                Ok(Token::new(TokenKind::Percent, "%", start))
            }
            '=' => {
                two!('=', TokenKind::EqEq, "==");
                Ok(Token::new(TokenKind::Assign, "=", start))
            }
            '!' => {
                two!('=', TokenKind::NotEq, "!=");
                Err(ParseError::new("unexpected character '!'", start))
            }
            '<' => {
                two!('=', TokenKind::LtEq, "<=");
                Ok(Token::new(TokenKind::Lt, "<", start))
            }
            '>' => {
                two!('=', TokenKind::GtEq, ">=");
                Ok(Token::new(TokenKind::Gt, ">", start))
            }
            '(' => Ok(Token::new(TokenKind::LParen, "(", start)),
            ')' => Ok(Token::new(TokenKind::RParen, ")", start)),
            '{' => Ok(Token::new(TokenKind::LBrace, "{", start)),
            '}' => Ok(Token::new(TokenKind::RBrace, "}", start)),
            '[' => Ok(Token::new(TokenKind::LBracket, "[", start)),
            ']' => Ok(Token::new(TokenKind::RBracket, "]", start)),
            ',' => Ok(Token::new(TokenKind::Comma, ",", start)),
            ';' => Ok(Token::new(TokenKind::Semicolon, ";", start)),
            ':' => Ok(Token::new(TokenKind::Colon, ":", start)),
            '.' => Ok(Token::new(TokenKind::Dot, ".", start)),
            other => Err(ParseError::new(format!("unexpected character '{other}'"), start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !matches!(k, TokenKind::Comment | TokenKind::Newline))
            .collect()
    }

    #[test]
    fn lexes_arithmetic() {
        assert_eq!(
            kinds("1 + 2 * 3"),
            vec![
                TokenKind::Integer(1),
                TokenKind::Plus,
                TokenKind::Integer(2),
                TokenKind::Star,
                TokenKind::Integer(3),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_power_and_compound_assign() {
        assert_eq!(
            kinds("x **= 2"),
            vec![TokenKind::Identifier("x".into()), TokenKind::StarStarEq, TokenKind::Integer(2), TokenKind::Eof]
        );
    }

    #[test]
    fn lexes_string_with_escapes() {
        assert_eq!(kinds(r#""a\nb""#), vec![TokenKind::String("a\nb".into()), TokenKind::Eof]);
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(Lexer::new("\"abc").tokenize().is_err());
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("not in"),
            vec![TokenKind::Not, TokenKind::In, TokenKind::Eof]
        );
    }
}
