//! α-conversion.
//!
//! Rewrites a parsed tree so that every binder carries a globally unique
//! identifier and every variable occurrence points at the identifier of
//! its innermost binder. Runs after parsing and before inference; an
//! expression that survives this pass is closed.
//!
//! The rewrite allocates into the same arena as the parser; untouched
//! leaves are shared rather than copied.

use std::fmt;

use crate::ast::uid::Uid;
use crate::ast::{Expr, ExprArena, Ident};
use crate::error::snippet;
use crate::intern::{Interner, Symbol};
use crate::style::Style;
use crate::suggest::find_similar;
use crate::token::Span;

#[derive(Debug, Clone)]
pub struct AlphaError {
    /// Source spelling of the unbound name.
    pub name: String,
    pub span: Span,
    /// Closest name in scope at the error site, when one is close.
    pub suggestion: Option<String>,
}

impl AlphaError {
    pub fn display_with_source(&self, source: &str) -> String {
        let mut out = format!(
            "{}: {}\n\n{}",
            Style::bold_red("error"),
            self,
            snippet(source, self.span)
        );
        if let Some(suggestion) = &self.suggestion {
            out.push_str(&format!(
                "\n     {} {}: did you mean `{}`?",
                Style::blue("|"),
                Style::cyan("help"),
                Style::green(suggestion)
            ));
        }
        out
    }
}

impl fmt::Display for AlphaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unbound identifier `{}` at line {} column {}",
            self.name, self.span.line, self.span.column
        )
    }
}

impl std::error::Error for AlphaError {}

/// Convert a parsed expression. The returned tree has a fresh `Uid` on
/// every binder and resolved `Uid`s on every occurrence.
pub fn convert<'a>(
    expr: &'a Expr<'a>,
    arena: &'a ExprArena,
    interner: &Interner,
) -> Result<&'a Expr<'a>, AlphaError> {
    let mut scopes: Vec<(Symbol, Uid)> = Vec::new();
    walk(expr, arena, interner, &mut scopes)
}

fn resolve(scopes: &[(Symbol, Uid)], name: Symbol) -> Option<Uid> {
    scopes
        .iter()
        .rev()
        .find(|(bound, _)| *bound == name)
        .map(|(_, uid)| *uid)
}

fn walk<'a>(
    expr: &'a Expr<'a>,
    arena: &'a ExprArena,
    interner: &Interner,
    scopes: &mut Vec<(Symbol, Uid)>,
) -> Result<&'a Expr<'a>, AlphaError> {
    match expr {
        Expr::Unit(_)
        | Expr::Int { .. }
        | Expr::Float { .. }
        | Expr::Complex { .. }
        | Expr::Bool { .. }
        | Expr::Str { .. }
        | Expr::Rune { .. }
        | Expr::EmptyVector(_) => Ok(expr),

        Expr::Var(ident) => match resolve(scopes, ident.uid.name) {
            Some(uid) => Ok(arena.alloc(Expr::Var(Ident { token: ident.token, uid }))),
            None => {
                let word = interner.resolve(ident.uid.name);
                let suggestion =
                    find_similar(word, scopes.iter().map(|(s, _)| interner.resolve(*s)), 2)
                        .map(str::to_string);
                Err(AlphaError {
                    name: word.to_string(),
                    span: ident.token.span,
                    suggestion,
                })
            }
        },

        Expr::Lambda { token, param, body } => {
            let fresh = Uid::fresh(param.uid.name);
            scopes.push((param.uid.name, fresh));
            let body = walk(body, arena, interner, scopes);
            scopes.pop();
            Ok(arena.alloc(Expr::Lambda {
                token: *token,
                param: Ident { token: param.token, uid: fresh },
                body: body?,
            }))
        }

        Expr::Fix { token, name, body } => {
            // The fixpoint binder is in scope within its own body.
            let fresh = Uid::fresh(name.uid.name);
            scopes.push((name.uid.name, fresh));
            let body = walk(body, arena, interner, scopes);
            scopes.pop();
            Ok(arena.alloc(Expr::Fix {
                token: *token,
                name: Ident { token: name.token, uid: fresh },
                body: body?,
            }))
        }

        Expr::Apply { token, func, spine } => {
            let func = walk(func, arena, interner, scopes)?;
            let mut args = Vec::with_capacity(spine.len());
            for arg in spine.iter() {
                args.push(walk(arg, arena, interner, scopes)?);
            }
            Ok(arena.alloc(Expr::Apply {
                token: *token,
                func,
                spine: arena.alloc_spine(&args),
            }))
        }

        Expr::Prefix { token, op, right } => {
            let right = walk(right, arena, interner, scopes)?;
            Ok(arena.alloc(Expr::Prefix { token: *token, op: *op, right }))
        }

        Expr::Infix { token, op, left, right } => {
            let left = walk(left, arena, interner, scopes)?;
            let right = walk(right, arena, interner, scopes)?;
            Ok(arena.alloc(Expr::Infix { token: *token, op: *op, left, right }))
        }

        Expr::If { token, cond, then, alt } => {
            let cond = walk(cond, arena, interner, scopes)?;
            let then = walk(then, arena, interner, scopes)?;
            let alt = walk(alt, arena, interner, scopes)?;
            Ok(arena.alloc(Expr::If { token: *token, cond, then, alt }))
        }

        Expr::Annot { token, body, ty } => {
            let body = walk(body, arena, interner, scopes)?;
            Ok(arena.alloc(Expr::Annot { token: *token, body, ty: ty.clone() }))
        }

        Expr::Pair { token, left, right } => {
            let left = walk(left, arena, interner, scopes)?;
            let right = walk(right, arena, interner, scopes)?;
            Ok(arena.alloc(Expr::Pair { token: *token, left, right }))
        }

        Expr::Inject { token, is_right, value } => {
            let value = walk(value, arena, interner, scopes)?;
            Ok(arena.alloc(Expr::Inject { token: *token, is_right: *is_right, value }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn converted<'a>(
        source: &str,
        arena: &'a ExprArena,
        interner: &mut Interner,
    ) -> Result<&'a Expr<'a>, AlphaError> {
        let tokens = Lexer::new(source, interner).tokenize();
        let mut parser = Parser::new(tokens, arena, interner);
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "parse errors: {:?}", parser.errors());
        convert(program[0], arena, interner)
    }

    #[test]
    fn binder_and_occurrence_share_a_uid() {
        let arena = ExprArena::new();
        let mut interner = Interner::new();
        match converted("fun(x){x}", &arena, &mut interner).unwrap() {
            Expr::Lambda { param, body, .. } => match body {
                Expr::Var(ident) => {
                    assert_eq!(ident.uid, param.uid);
                    assert_ne!(ident.uid.id, 0);
                }
                other => panic!("expected var body, got {:?}", other),
            },
            other => panic!("expected lambda, got {:?}", other),
        }
    }

    #[test]
    fn shadowing_resolves_to_innermost_binder() {
        let arena = ExprArena::new();
        let mut interner = Interner::new();
        match converted("fun(x){fun(x){x}}", &arena, &mut interner).unwrap() {
            Expr::Lambda { param: outer, body, .. } => match body {
                Expr::Lambda { param: inner, body, .. } => {
                    assert_ne!(outer.uid, inner.uid);
                    match body {
                        Expr::Var(ident) => assert_eq!(ident.uid, inner.uid),
                        other => panic!("expected var, got {:?}", other),
                    }
                }
                other => panic!("expected inner lambda, got {:?}", other),
            },
            other => panic!("expected lambda, got {:?}", other),
        }
    }

    #[test]
    fn distinct_binders_get_distinct_uids() {
        let arena = ExprArena::new();
        let mut interner = Interner::new();
        match converted("fun(x, y){x}", &arena, &mut interner).unwrap() {
            Expr::Lambda { param: x, body, .. } => match body {
                Expr::Lambda { param: y, .. } => assert_ne!(x.uid, y.uid),
                other => panic!("expected lambda, got {:?}", other),
            },
            other => panic!("expected lambda, got {:?}", other),
        }
    }

    #[test]
    fn unbound_identifier_is_rejected() {
        let arena = ExprArena::new();
        let mut interner = Interner::new();
        let err = converted("fun(x){y}", &arena, &mut interner).unwrap_err();
        assert_eq!(err.name, "y");
    }

    #[test]
    fn alpha_error_is_a_std_error() {
        let arena = ExprArena::new();
        let mut interner = Interner::new();
        let err = converted("ghost", &arena, &mut interner).unwrap_err();
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.to_string().contains("unbound identifier `ghost`"));
    }

    #[test]
    fn unbound_identifier_suggests_similar_name() {
        let arena = ExprArena::new();
        let mut interner = Interner::new();
        let err = converted("fun(count){conut}", &arena, &mut interner).unwrap_err();
        assert_eq!(err.suggestion.as_deref(), Some("count"));
    }

    #[test]
    fn fixpoint_binder_is_visible_in_its_body() {
        let arena = ExprArena::new();
        let mut interner = Interner::new();
        // Desugars to a fixpoint since `f` mentions itself.
        let expr = converted("let f = fun(n){f(n)}; f", &arena, &mut interner).unwrap();
        match expr {
            Expr::Apply { spine, .. } => match spine[0] {
                Expr::Fix { name, body, .. } => match body {
                    Expr::Lambda { body, .. } => match body {
                        Expr::Apply { func, .. } => match func {
                            Expr::Var(ident) => assert_eq!(ident.uid, name.uid),
                            other => panic!("expected var, got {:?}", other),
                        },
                        other => panic!("expected application, got {:?}", other),
                    },
                    other => panic!("expected lambda, got {:?}", other),
                },
                other => panic!("expected fixpoint, got {:?}", other),
            },
            other => panic!("expected application, got {:?}", other),
        }
    }

    #[test]
    fn let_bound_name_is_visible_in_body() {
        let arena = ExprArena::new();
        let mut interner = Interner::new();
        assert!(converted("let id = fun(a){a}; id", &arena, &mut interner).is_ok());
    }
}
