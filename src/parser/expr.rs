//! Prefix and infix parse rules.

use super::{prec, ParseResult, Parser};
use crate::ast::uid::Uid;
use crate::ast::{Expr, Ident, Operator};
use crate::error::{ParseError, ParseErrorKind};
use crate::token::{Token, TokenType};

impl<'a, 'i> Parser<'a, 'i> {
    pub(super) fn parse_prefix(&mut self) -> ParseResult<&'a Expr<'a>> {
        let token = self.current();
        match token.kind {
            TokenType::Ident => Ok(self.arena.alloc(Expr::Var(self.parse_ident()))),
            TokenType::Int => self.parse_int(token),
            TokenType::Float => self.parse_float(token),
            TokenType::Imag => self.parse_imag(token),
            TokenType::Str => self.parse_string(token),
            TokenType::Rune => self.parse_rune(token),
            TokenType::True | TokenType::False => Ok(self.arena.alloc(Expr::Bool {
                token,
                value: token.kind == TokenType::True,
            })),
            TokenType::Minus | TokenType::FMinus | TokenType::CMinus | TokenType::Bang => {
                self.advance();
                let right = self.parse_expression(prec::PREFIX)?;
                Ok(self.arena.alloc(Expr::Prefix {
                    token,
                    op: Operator::new(token.kind),
                    right,
                }))
            }
            TokenType::LParen => {
                // `()` is the unit literal; anything else inside parens is
                // grouping.
                if self.peek_is(TokenType::RParen) {
                    self.advance();
                    Ok(self.arena.alloc(Expr::Unit(token)))
                } else {
                    self.parse_grouped(TokenType::RParen)
                }
            }
            TokenType::LBrace => self.parse_grouped(TokenType::RBrace),
            TokenType::Dollar => {
                // `$ e` parses the rest of the statement as one expression.
                self.advance();
                self.parse_expression(prec::LOWEST)
            }
            TokenType::If => self.parse_if(token),
            TokenType::Lambda => self.parse_lambda(token),
            TokenType::Let => self.parse_let(token),
            TokenType::Illegal => {
                Err(ParseError::new(ParseErrorKind::IllegalToken, token.span))
            }
            found => Err(ParseError::new(
                ParseErrorKind::NoPrefixRule { found },
                token.span,
            )),
        }
    }

    pub(super) fn parse_infix(&mut self, left: &'a Expr<'a>) -> ParseResult<&'a Expr<'a>> {
        let token = self.current();
        self.debug("infix", token);
        match token.kind {
            TokenType::LParen => self.parse_apply_spine(token, left),
            TokenType::Colon => self.parse_annotation(token, left),
            _ => {
                let op = Operator::new(token.kind);
                let precedence = self.current_precedence();
                self.advance();
                let right = self.parse_expression(precedence)?;

                if let Some(folded) = self.fold_complex_literal(token, left, right) {
                    return Ok(folded);
                }

                Ok(self.arena.alloc(Expr::Infix { token, op, left, right }))
            }
        }
    }

    /// An identifier occurrence. Binders stay unresolved (`id == 0`) until
    /// α-conversion runs.
    pub(super) fn parse_ident(&self) -> Ident {
        let token = self.current();
        Ident {
            token,
            uid: Uid::canonical(token.lexeme),
        }
    }

    fn parse_int(&mut self, token: Token) -> ParseResult<&'a Expr<'a>> {
        let text = self.interner.resolve(token.lexeme);
        let value = text
            .parse::<i64>()
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidIntLiteral, token.span))?;
        Ok(self.arena.alloc(Expr::Int { token, value }))
    }

    fn parse_float(&mut self, token: Token) -> ParseResult<&'a Expr<'a>> {
        let text = self.interner.resolve(token.lexeme);
        let value = text
            .parse::<f64>()
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidFloatLiteral, token.span))?;
        Ok(self.arena.alloc(Expr::Float { token, value }))
    }

    /// A bare imaginary literal is a complex number with zero real part.
    fn parse_imag(&mut self, token: Token) -> ParseResult<&'a Expr<'a>> {
        let text = self.interner.resolve(token.lexeme);
        let digits = &text[..text.len() - 1]; // trailing `i`
        let im = digits
            .parse::<f64>()
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidFloatLiteral, token.span))?;
        Ok(self.arena.alloc(Expr::Complex { token, re: 0.0, im }))
    }

    fn parse_string(&mut self, token: Token) -> ParseResult<&'a Expr<'a>> {
        let text = self.interner.resolve(token.lexeme).to_string();
        let inner = &text[1..text.len() - 1]; // surrounding quotes
        let value = self.interner.intern(inner);
        Ok(self.arena.alloc(Expr::Str { token, value }))
    }

    fn parse_rune(&mut self, token: Token) -> ParseResult<&'a Expr<'a>> {
        let text = self.interner.resolve(token.lexeme);
        let value = text[1..text.len() - 1].chars().next().unwrap_or('\0');
        Ok(self.arena.alloc(Expr::Rune { token, value }))
    }

    /// `( e )` and `{ e }` both group.
    fn parse_grouped(&mut self, close: TokenType) -> ParseResult<&'a Expr<'a>> {
        self.advance();
        let inner = self.parse_expression(prec::LOWEST)?;
        self.expect_peek(close)?;
        Ok(inner)
    }

    fn parse_if(&mut self, token: Token) -> ParseResult<&'a Expr<'a>> {
        self.advance();
        let cond = self.parse_expression(prec::LOWEST)?;
        self.expect_peek(TokenType::Then)?;
        self.advance();
        let then = self.parse_expression(prec::LOWEST)?;
        self.expect_peek(TokenType::Else)?;
        self.advance();
        let alt = self.parse_expression(prec::LOWEST)?;
        Ok(self.arena.alloc(Expr::If { token, cond, then, alt }))
    }

    fn parse_annotation(&mut self, token: Token, body: &'a Expr<'a>) -> ParseResult<&'a Expr<'a>> {
        self.advance();
        let ty = self.parse_type()?;
        Ok(self.arena.alloc(Expr::Annot { token, body, ty }))
    }

    /// `4.5 + 3i` is one complex literal, not an addition: when the right
    /// operand of `+`/`-` is an imaginary literal and the left is a numeric
    /// literal, fold them.
    fn fold_complex_literal(
        &mut self,
        op_token: Token,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    ) -> Option<&'a Expr<'a>> {
        if !matches!(op_token.kind, TokenType::Plus | TokenType::Minus) {
            return None;
        }
        let im = match right {
            Expr::Complex { token, re, im } if token.kind == TokenType::Imag && *re == 0.0 => *im,
            _ => return None,
        };
        let re = match left {
            Expr::Int { value, .. } => *value as f64,
            Expr::Float { value, .. } => *value,
            _ => return None,
        };
        let im = if op_token.kind == TokenType::Minus { -im } else { im };
        Some(self.arena.alloc(Expr::Complex {
            token: left.token(),
            re,
            im,
        }))
    }
}
