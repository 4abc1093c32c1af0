//! The skein expression tree.
//!
//! Expressions are allocated in a bump arena and linked by shared
//! references; passes that rewrite the tree (α-conversion) allocate their
//! output into the same arena. Every node keeps the token it was parsed
//! from so diagnostics can point back into the source.

pub mod operators;
pub mod types;
pub mod uid;

use bumpalo::Bump;

use crate::intern::Symbol;
use crate::token::{Span, Token, TokenType};
use types::Type;
use uid::Uid;

/// A named occurrence: a binder or a variable reference.
///
/// The parser emits idents with `id == 0`; α-conversion replaces every one
/// with a resolved `Uid`.
#[derive(Debug, Clone, Copy)]
pub struct Ident {
    pub token: Token,
    pub uid: Uid,
}

/// An operator occurrence. `is_pattern` marks operators that may also
/// appear inside match patterns (`::` today); the inference core ignores
/// it.
#[derive(Debug, Clone, Copy)]
pub struct Operator {
    pub kind: TokenType,
    pub is_pattern: bool,
}

impl Operator {
    pub fn new(kind: TokenType) -> Self {
        Operator {
            kind,
            is_pattern: kind == TokenType::Cons,
        }
    }
}

#[derive(Debug)]
pub enum Expr<'a> {
    Unit(Token),
    Int { token: Token, value: i64 },
    Float { token: Token, value: f64 },
    Complex { token: Token, re: f64, im: f64 },
    Bool { token: Token, value: bool },
    Str { token: Token, value: Symbol },
    Rune { token: Token, value: char },
    /// `[]`-style stub; no inference rule accepts it.
    EmptyVector(Token),
    Var(Ident),
    Lambda {
        token: Token,
        param: Ident,
        body: &'a Expr<'a>,
    },
    /// `rec f. e`; the fixpoint binder is in scope within its own body.
    Fix {
        token: Token,
        name: Ident,
        body: &'a Expr<'a>,
    },
    /// Application with a flat, non-empty argument spine.
    Apply {
        token: Token,
        func: &'a Expr<'a>,
        spine: &'a [&'a Expr<'a>],
    },
    Prefix {
        token: Token,
        op: Operator,
        right: &'a Expr<'a>,
    },
    Infix {
        token: Token,
        op: Operator,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    If {
        token: Token,
        cond: &'a Expr<'a>,
        then: &'a Expr<'a>,
        alt: &'a Expr<'a>,
    },
    Annot {
        token: Token,
        body: &'a Expr<'a>,
        ty: Type,
    },
    Pair {
        token: Token,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Inject {
        token: Token,
        is_right: bool,
        value: &'a Expr<'a>,
    },
}

impl<'a> Expr<'a> {
    pub fn token(&self) -> Token {
        match self {
            Expr::Unit(token) | Expr::EmptyVector(token) => *token,
            Expr::Int { token, .. }
            | Expr::Float { token, .. }
            | Expr::Complex { token, .. }
            | Expr::Bool { token, .. }
            | Expr::Str { token, .. }
            | Expr::Rune { token, .. }
            | Expr::Lambda { token, .. }
            | Expr::Fix { token, .. }
            | Expr::Apply { token, .. }
            | Expr::Prefix { token, .. }
            | Expr::Infix { token, .. }
            | Expr::If { token, .. }
            | Expr::Annot { token, .. }
            | Expr::Pair { token, .. }
            | Expr::Inject { token, .. } => *token,
            Expr::Var(ident) => ident.token,
        }
    }

    pub fn span(&self) -> Span {
        self.token().span
    }

    /// Whether any identifier named `name` occurs anywhere in the tree.
    ///
    /// Purely syntactic (shadowing is ignored); the parser uses it to spot
    /// self-referential let bindings before binders are resolved.
    pub fn mentions(&self, name: Symbol) -> bool {
        match self {
            Expr::Var(ident) => ident.uid.name == name,
            Expr::Unit(_)
            | Expr::Int { .. }
            | Expr::Float { .. }
            | Expr::Complex { .. }
            | Expr::Bool { .. }
            | Expr::Str { .. }
            | Expr::Rune { .. }
            | Expr::EmptyVector(_) => false,
            Expr::Lambda { body, .. } | Expr::Fix { body, .. } => body.mentions(name),
            Expr::Apply { func, spine, .. } => {
                func.mentions(name) || spine.iter().any(|arg| arg.mentions(name))
            }
            Expr::Prefix { right, .. } => right.mentions(name),
            Expr::Infix { left, right, .. } | Expr::Pair { left, right, .. } => {
                left.mentions(name) || right.mentions(name)
            }
            Expr::If { cond, then, alt, .. } => {
                cond.mentions(name) || then.mentions(name) || alt.mentions(name)
            }
            Expr::Annot { body, .. } | Expr::Inject { value: body, .. } => body.mentions(name),
        }
    }
}

/// Bump arena for expression nodes and argument spines.
#[derive(Default)]
pub struct ExprArena {
    bump: Bump,
}

impl ExprArena {
    pub fn new() -> Self {
        ExprArena { bump: Bump::new() }
    }

    pub fn alloc<'a>(&'a self, expr: Expr<'a>) -> &'a Expr<'a> {
        self.bump.alloc(expr)
    }

    pub fn alloc_spine<'a>(&'a self, spine: &[&'a Expr<'a>]) -> &'a [&'a Expr<'a>] {
        self.bump.alloc_slice_copy(spine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::Interner;
    use crate::token::TokenType;

    fn ident(interner: &mut Interner, name: &str) -> Ident {
        let sym = interner.intern(name);
        Ident {
            token: Token::new(TokenType::Ident, sym, Span::default()),
            uid: Uid::canonical(sym),
        }
    }

    #[test]
    fn mentions_finds_spine_occurrences() {
        let mut interner = Interner::new();
        let arena = ExprArena::new();
        let f = arena.alloc(Expr::Var(ident(&mut interner, "f")));
        let x = arena.alloc(Expr::Var(ident(&mut interner, "x")));
        let app = Expr::Apply {
            token: f.token(),
            func: f,
            spine: arena.alloc_spine(&[x]),
        };
        assert!(app.mentions(interner.intern("x")));
        assert!(app.mentions(interner.intern("f")));
        assert!(!app.mentions(interner.intern("y")));
    }

    #[test]
    fn mentions_descends_into_lambda_bodies() {
        let mut interner = Interner::new();
        let arena = ExprArena::new();
        let body = arena.alloc(Expr::Var(ident(&mut interner, "fib")));
        let lam = Expr::Lambda {
            token: body.token(),
            param: ident(&mut interner, "n"),
            body,
        };
        assert!(lam.mentions(interner.intern("fib")));
    }

    #[test]
    fn cons_operator_is_pattern_eligible() {
        assert!(Operator::new(TokenType::Cons).is_pattern);
        assert!(!Operator::new(TokenType::Plus).is_pattern);
    }
}
