//! The checking judgment `Γ ⊢ e ⇐ A ⊣ Δ`.
//!
//! ```text
//!   A = P (canonical)        Γ, x:A₁ ⊢ e₀ ⇐ A₂ ⊣ Δ, x:A₁, Θ
//! ─────────────── (lit/I)  ──────────────────────────────────── (→I)
//!   Γ ⊢ lit ⇐ A ⊣ Γ          Γ ⊢ λx. e₀ ⇐ A₁ → A₂ ⊣ Δ
//!
//!   Γ, α ⊢ e ⇐ A₀ ⊣ Δ, α, Θ        Γ ⊢ e ⇒ A′ ⊣ Θ    Θ ⊢ [Θ]A′ <: [Θ]A ⊣ Δ
//! ───────────────────────── (∀I)  ─────────────────────────────────────────── (Sub)
//!   Γ ⊢ e ⇐ ∀α. A₀ ⊣ Δ             Γ ⊢ e ⇐ A ⊣ Δ
//! ```
//!
//! The specific rules win over `Sub`; a literal checked against a
//! non-matching type still falls through to `Sub`, which is where numeric
//! widening gets its chance.

use crate::ast::types::Type;
use crate::ast::Expr;
use crate::infer::context::{Context, Entry};
use crate::infer::error::{InferResult, TypeError, TypeErrorKind};
use crate::intern::Symbol;

impl Context {
    pub fn check(&self, expr: &Expr, ty: &Type) -> InferResult<Context> {
        if !self.is_well_formed(ty) {
            return Err(TypeError::at(
                TypeErrorKind::Malformed(ty.clone()),
                expr.span(),
            ));
        }

        match (expr, ty) {
            (Expr::Unit(_), Type::Unit) => {
                self.trace_rule("1I");
                Ok(self.clone())
            }
            (Expr::Int { .. }, _) if ty.primitive_name() == Some(Symbol::INT) => {
                self.trace_rule("intI");
                Ok(self.clone())
            }
            (Expr::Float { .. }, _) if ty.primitive_name() == Some(Symbol::FLOAT) => {
                self.trace_rule("floatI");
                Ok(self.clone())
            }
            (Expr::Complex { .. }, _) if ty.primitive_name() == Some(Symbol::COMPLEX) => {
                self.trace_rule("complexI");
                Ok(self.clone())
            }
            (Expr::Bool { .. }, _) if ty.primitive_name() == Some(Symbol::BOOL) => {
                self.trace_rule("boolI");
                Ok(self.clone())
            }
            (Expr::Str { .. }, _) if ty.primitive_name() == Some(Symbol::STRING) => {
                self.trace_rule("stringI");
                Ok(self.clone())
            }
            (Expr::Rune { .. }, _) if ty.primitive_name() == Some(Symbol::RUNE) => {
                self.trace_rule("runeI");
                Ok(self.clone())
            }
            (Expr::Lambda { param, body, .. }, Type::Arrow(domain, codomain)) => {
                self.trace_rule("->I");
                let binding = Entry::binding(param.uid, (**domain).clone());
                let extended = self.pushed(binding.clone());
                let delta = extended.check(body, codomain)?;
                Ok(delta.drop_from(&binding))
            }
            (_, Type::Forall(uid, body)) => {
                self.trace_rule("∀I");
                let universal = Entry::Universal(*uid);
                let extended = self.pushed(universal.clone());
                let delta = extended.check(expr, body)?;
                Ok(delta.drop_from(&universal))
            }
            _ => {
                self.trace_rule("Sub");
                let (synthesized, theta) = self.synth(expr)?;
                theta
                    .subtype(&theta.apply(&synthesized), &theta.apply(ty))
                    .map_err(|err| err.located(expr.span()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::uid::Uid;
    use crate::ast::{ExprArena, Ident};
    use crate::intern::Interner;
    use crate::token::{Span, Token, TokenType};

    fn int_lit(arena: &ExprArena, value: i64) -> &Expr<'_> {
        arena.alloc(Expr::Int {
            token: Token::new(TokenType::Int, Symbol::EMPTY, Span::default()),
            value,
        })
    }

    #[test]
    fn literal_checks_against_canonical_type() {
        let arena = ExprArena::new();
        let ctx = Context::new();
        let delta = ctx.check(int_lit(&arena, 3), &Type::int()).unwrap();
        assert_eq!(delta, ctx);
    }

    #[test]
    fn literal_widens_through_sub() {
        let arena = ExprArena::new();
        let ctx = Context::new();
        // 3 ⇐ float succeeds via Sub + numeric widening.
        assert!(ctx.check(int_lit(&arena, 3), &Type::float()).is_ok());
        // The reverse narrowing does not exist.
        let float_lit = arena.alloc(Expr::Float {
            token: Token::new(TokenType::Float, Symbol::EMPTY, Span::default()),
            value: 3.5,
        });
        assert!(ctx.check(float_lit, &Type::int()).is_err());
    }

    #[test]
    fn lambda_checks_against_arrow() {
        let mut interner = Interner::new();
        let arena = ExprArena::new();
        let x = interner.intern("x");
        let param = Ident {
            token: Token::new(TokenType::Ident, x, Span::default()),
            uid: Uid::fresh(x),
        };
        let body = arena.alloc(Expr::Var(param));
        let lambda = arena.alloc(Expr::Lambda { token: param.token, param, body });

        let ctx = Context::new();
        let delta = ctx.check(lambda, &Type::arrow(Type::int(), Type::int())).unwrap();
        // The binding introduced for the parameter is gone again.
        assert_eq!(delta, ctx);
    }

    #[test]
    fn lambda_body_mismatch_fails() {
        let mut interner = Interner::new();
        let arena = ExprArena::new();
        let x = interner.intern("x");
        let param = Ident {
            token: Token::new(TokenType::Ident, x, Span::default()),
            uid: Uid::fresh(x),
        };
        let body = arena.alloc(Expr::Var(param));
        let lambda = arena.alloc(Expr::Lambda { token: param.token, param, body });

        let ctx = Context::new();
        // λx. x cannot check against int -> bool.
        assert!(ctx.check(lambda, &Type::arrow(Type::int(), Type::bool())).is_err());
    }

    #[test]
    fn forall_introduction_scopes_the_variable() {
        let mut interner = Interner::new();
        let arena = ExprArena::new();
        let x = interner.intern("x");
        let param = Ident {
            token: Token::new(TokenType::Ident, x, Span::default()),
            uid: Uid::fresh(x),
        };
        let body = arena.alloc(Expr::Var(param));
        let lambda = arena.alloc(Expr::Lambda { token: param.token, param, body });

        let a = Uid::fresh(Symbol::EMPTY);
        let poly = Type::Forall(a, Box::new(Type::arrow(Type::Var(a), Type::Var(a))));
        let ctx = Context::new();
        let delta = ctx.check(lambda, &poly).unwrap();
        assert_eq!(delta, ctx);
    }

    #[test]
    fn ill_formed_expected_type_is_reported() {
        let arena = ExprArena::new();
        let ctx = Context::new();
        let stranger = Uid::fresh(Symbol::EMPTY);
        let err = ctx
            .check(int_lit(&arena, 1), &Type::Var(stranger))
            .unwrap_err();
        assert!(matches!(err.kind, TypeErrorKind::Malformed(_)));
    }

    #[test]
    fn unit_checks_against_unit() {
        let arena = ExprArena::new();
        let unit = arena.alloc(Expr::Unit(Token::new(
            TokenType::LParen,
            Symbol::EMPTY,
            Span::default(),
        )));
        let ctx = Context::new();
        assert!(ctx.check(unit, &Type::Unit).is_ok());
        assert!(ctx.check(unit, &Type::int()).is_err());
    }
}
