//! Type annotation syntax: `ident`, `()`, parentheses, and
//! right-associative arrows.

use super::{ParseResult, Parser};
use crate::ast::types::Type;
use crate::ast::uid::Uid;
use crate::error::{ParseError, ParseErrorKind};
use crate::token::TokenType;

impl<'a, 'i> Parser<'a, 'i> {
    /// Parse a type with the current token as its first token. Named types
    /// become canonical universal variables; the primitives among them are
    /// recognized by the typechecker through their pre-interned names.
    pub(super) fn parse_type(&mut self) -> ParseResult<Type> {
        let left = match self.current().kind {
            TokenType::Ident => Type::Var(Uid::canonical(self.current().lexeme)),
            TokenType::LParen => {
                if self.peek_is(TokenType::RParen) {
                    self.advance();
                    Type::Unit
                } else {
                    self.advance();
                    let inner = self.parse_type()?;
                    self.expect_peek(TokenType::RParen)?;
                    inner
                }
            }
            found => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedType { found },
                    self.current().span,
                ))
            }
        };

        if self.peek_is(TokenType::Arrow) {
            self.advance();
            self.advance();
            let right = self.parse_type()?;
            Ok(Type::arrow(left, right))
        } else {
            Ok(left)
        }
    }
}
