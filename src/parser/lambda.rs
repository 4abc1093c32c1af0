//! Function literals, application spines, and `let` desugaring.
//!
//! The surface forms all reduce to the core calculus before inference
//! sees them:
//!
//! ```text
//! fun(x, y) { e }            λx. λy. e
//! fun(x: T) { e }            λx. ((λx. e)(x : T))
//! fun(x) T { e }             λx. (e : T)
//! let x = e; body            (λx. body)(e)
//! let x = e and y = f; body  (λx. λy. body)(e, f)
//! let f = …f…; body          (λf. body)(rec f. …f…)
//! ```
//!
//! The annotated-parameter wrapper keeps the annotation an ordinary
//! application argument, so it flows through application synthesis and an
//! omitted return type never constrains the body.

use super::{prec, ParseResult, Parser};
use crate::ast::types::Type;
use crate::ast::{Expr, Ident};
use crate::error::{ParseError, ParseErrorKind};
use crate::intern::Symbol;
use crate::token::{Token, TokenType};

impl<'a, 'i> Parser<'a, 'i> {
    /// `fun (params) [type] { body }` with `lambda` as a synonym of `fun`.
    pub(super) fn parse_lambda(&mut self, token: Token) -> ParseResult<&'a Expr<'a>> {
        self.debug("lambda", token);
        let params = self.parse_params()?;

        let return_type = if self.peek_is(TokenType::LBrace) {
            None
        } else {
            self.advance();
            Some(self.parse_type()?)
        };

        self.expect_peek(TokenType::LBrace)?;
        self.advance();
        let mut body = self.parse_expression(prec::LOWEST)?;
        self.expect_peek(TokenType::RBrace)?;

        if let Some(ty) = return_type {
            body = self.arena.alloc(Expr::Annot { token, body, ty });
        }

        if params.is_empty() {
            // A nullary function still binds one (ignored) parameter.
            let param = Ident {
                token,
                uid: crate::ast::uid::Uid::canonical(Symbol::UNDERSCORE),
            };
            return Ok(self.arena.alloc(Expr::Lambda { token, param, body }));
        }

        // Unroll right to left into nested single-parameter lambdas.
        let mut current = body;
        for (param, annot) in params.into_iter().rev() {
            current = match annot {
                None => self.arena.alloc(Expr::Lambda {
                    token: param.token,
                    param,
                    body: current,
                }),
                Some(ty) => self.wrap_annotated_param(param, ty, current),
            };
        }
        Ok(current)
    }

    /// Parameter list after `fun`; `fun ()` has none.
    fn parse_params(&mut self) -> ParseResult<Vec<(Ident, Option<Type>)>> {
        self.expect_peek(TokenType::LParen)?;
        if self.peek_is(TokenType::RParen) {
            self.advance();
            return Ok(Vec::new());
        }

        let mut params = Vec::new();
        loop {
            self.advance();
            if !self.current_is(TokenType::Ident) {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedIdentifier { found: self.current().kind },
                    self.current().span,
                ));
            }
            let ident = self.parse_ident();
            let annot = if self.peek_is(TokenType::Colon) {
                self.advance();
                self.advance();
                Some(self.parse_type()?)
            } else {
                None
            };
            params.push((ident, annot));

            if self.peek_is(TokenType::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_peek(TokenType::RParen)?;
        Ok(params)
    }

    /// `λx. ((λx. body)(x : T))`: the annotation rides as an argument.
    fn wrap_annotated_param(
        &mut self,
        param: Ident,
        ty: Type,
        body: &'a Expr<'a>,
    ) -> &'a Expr<'a> {
        let inner = self.arena.alloc(Expr::Lambda {
            token: param.token,
            param,
            body,
        });
        let var = self.arena.alloc(Expr::Var(param));
        let annot = self.arena.alloc(Expr::Annot {
            token: param.token,
            body: var,
            ty,
        });
        let spine = self.arena.alloc_spine(&[annot]);
        let apply = self.arena.alloc(Expr::Apply {
            token: param.token,
            func: inner,
            spine,
        });
        self.arena.alloc(Expr::Lambda {
            token: param.token,
            param,
            body: apply,
        })
    }

    /// `f(a, b, c)`, with the current token at the opening paren; `f()` applies
    /// unit. The spine stays flat for spine-style application synthesis.
    pub(super) fn parse_apply_spine(
        &mut self,
        token: Token,
        func: &'a Expr<'a>,
    ) -> ParseResult<&'a Expr<'a>> {
        let mut args: Vec<&'a Expr<'a>> = Vec::new();

        if self.peek_is(TokenType::RParen) {
            self.advance();
            args.push(self.arena.alloc(Expr::Unit(token)));
        } else {
            self.advance();
            args.push(self.parse_expression(prec::LOWEST)?);
            while self.peek_is(TokenType::Comma) {
                self.advance();
                self.advance();
                args.push(self.parse_expression(prec::LOWEST)?);
            }
            self.expect_peek(TokenType::RParen)?;
        }

        let spine = self.arena.alloc_spine(&args);
        Ok(self.arena.alloc(Expr::Apply { token, func, spine }))
    }

    /// `let x = e (and y = f)* ; body`, desugared to an application of a
    /// lambda chain. A binding whose value mentions its own name becomes a
    /// fixpoint. A `let` with nothing after the `;` gets a unit body.
    pub(super) fn parse_let(&mut self, token: Token) -> ParseResult<&'a Expr<'a>> {
        self.debug("let", token);
        let mut names: Vec<Ident> = Vec::new();
        let mut values: Vec<&'a Expr<'a>> = Vec::new();

        loop {
            self.expect_peek(TokenType::Ident)?;
            let name = self.parse_ident();
            self.expect_peek(TokenType::Equals)?;
            self.advance();
            let mut value = self.parse_expression(prec::LOWEST)?;

            if value.mentions(name.uid.name) {
                value = self.arena.alloc(Expr::Fix {
                    token: name.token,
                    name,
                    body: value,
                });
            }

            names.push(name);
            values.push(value);

            if self.peek_is(TokenType::And) {
                self.advance();
            } else {
                break;
            }
        }

        let body = if self.peek_is(TokenType::Semi) {
            self.advance();
            if self.peek_is(TokenType::Eof) {
                self.arena.alloc(Expr::Unit(token))
            } else {
                self.advance();
                self.parse_expression(prec::LOWEST)?
            }
        } else if self.peek_is(TokenType::Eof) {
            self.arena.alloc(Expr::Unit(token))
        } else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: TokenType::Semi,
                    found: self.peek().kind,
                },
                self.peek().span,
            ));
        };

        let mut func = body;
        for name in names.into_iter().rev() {
            func = self.arena.alloc(Expr::Lambda {
                token: name.token,
                param: name,
                body: func,
            });
        }
        let spine = self.arena.alloc_spine(&values);
        Ok(self.arena.alloc(Expr::Apply { token, func, spine }))
    }
}
