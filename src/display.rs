//! Interner-aware display.
//!
//! Symbols are indices, so anything containing one needs the interner in
//! hand to print. `DisplayWith` threads it through without forcing every
//! type to hold a reference.

use std::fmt;

use crate::ast::types::Type;
use crate::ast::uid::Uid;
use crate::ast::Expr;
use crate::intern::{Interner, Symbol};
use crate::token::TokenType;

pub trait DisplayWith {
    fn fmt_with(&self, interner: &Interner, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn with<'a>(&'a self, interner: &'a Interner) -> WithInterner<'a, Self> {
        WithInterner { target: self, interner }
    }
}

pub struct WithInterner<'a, T: ?Sized> {
    pub target: &'a T,
    pub interner: &'a Interner,
}

impl<'a, T: DisplayWith> fmt::Display for WithInterner<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.target.fmt_with(self.interner, f)
    }
}

impl DisplayWith for Symbol {
    fn fmt_with(&self, interner: &Interner, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", interner.resolve(*self))
    }
}

impl DisplayWith for Uid {
    fn fmt_with(&self, interner: &Interner, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_canonical() {
            write!(f, "{}", interner.resolve(self.name))
        } else {
            write!(f, "{}#{}", interner.resolve(self.name), self.id)
        }
    }
}

/// Debug rendering with raw uids, used by `--vtype` traces.
impl DisplayWith for Type {
    fn fmt_with(&self, interner: &Interner, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Unit => write!(f, "unit"),
            Type::Var(uid) if uid.is_canonical() => {
                write!(f, "{}", interner.resolve(uid.name))
            }
            Type::Var(uid) => write!(f, "'{}", uid.with(interner)),
            Type::Exists(uid) => write!(f, "∃'{}", uid.with(interner)),
            Type::Forall(uid, body) => {
                write!(f, "∀{}. {}", uid.with(interner), body.with(interner))
            }
            Type::Arrow(domain, codomain) => {
                if matches!(**domain, Type::Arrow(_, _) | Type::Forall(_, _)) {
                    write!(f, "({}) -> {}", domain.with(interner), codomain.with(interner))
                } else {
                    write!(f, "{} -> {}", domain.with(interner), codomain.with(interner))
                }
            }
            Type::Sum(left, right) => {
                write!(f, "{} + {}", left.with(interner), right.with(interner))
            }
            Type::Product(left, right) => {
                write!(f, "{} * {}", left.with(interner), right.with(interner))
            }
        }
    }
}

pub fn operator_symbol(kind: TokenType) -> &'static str {
    use TokenType::*;
    match kind {
        Plus => "+",
        Minus => "-",
        Star => "*",
        Slash => "/",
        Percent => "%",
        Caret => "^",
        FPlus => "+.",
        FMinus => "-.",
        FStar => "*.",
        FSlash => "/.",
        FCaret => "^.",
        CPlus => "+:",
        CMinus => "-:",
        CStar => "*:",
        CSlash => "/:",
        CCaret => "^:",
        Bang => "!",
        AndAnd => "&&",
        OrOr => "||",
        Equals => "=",
        NotEquals => "!=",
        Less => "<",
        LessEq => "<=",
        Greater => ">",
        GreaterEq => ">=",
        Sequence => ">>",
        PipeInto => "|>",
        ComposeLeft => "<=<",
        ComposeRight => ">=>",
        At => "@",
        Dollar => "$",
        Dot => ".",
        Concat => "++",
        Cons => "::",
        _ => "?",
    }
}

/// Source-like rendering of the tree, used by `--vast` and the REPL echo.
impl<'a> DisplayWith for Expr<'a> {
    fn fmt_with(&self, interner: &Interner, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Unit(_) => write!(f, "()"),
            Expr::Int { value, .. } => write!(f, "{}", value),
            Expr::Float { value, .. } => write!(f, "{}", value),
            Expr::Complex { re, im, .. } => write!(f, "{}+{}i", re, im),
            Expr::Bool { value, .. } => write!(f, "{}", value),
            Expr::Str { value, .. } => write!(f, "\"{}\"", interner.resolve(*value)),
            Expr::Rune { value, .. } => write!(f, "'{}'", value),
            Expr::EmptyVector(_) => write!(f, "[]"),
            Expr::Var(ident) => write!(f, "{}", ident.uid.with(interner)),
            Expr::Lambda { param, body, .. } => {
                write!(f, "(λ{}. {})", param.uid.with(interner), body.with(interner))
            }
            Expr::Fix { name, body, .. } => {
                write!(f, "(rec {}. {})", name.uid.with(interner), body.with(interner))
            }
            Expr::Apply { func, spine, .. } => {
                write!(f, "{}(", func.with(interner))?;
                for (i, arg) in spine.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_with(interner, f)?;
                }
                write!(f, ")")
            }
            Expr::Prefix { op, right, .. } => {
                write!(f, "({}{})", operator_symbol(op.kind), right.with(interner))
            }
            Expr::Infix { op, left, right, .. } => {
                write!(
                    f,
                    "({} {} {})",
                    left.with(interner),
                    operator_symbol(op.kind),
                    right.with(interner)
                )
            }
            Expr::If { cond, then, alt, .. } => {
                write!(
                    f,
                    "(if {} then {} else {})",
                    cond.with(interner),
                    then.with(interner),
                    alt.with(interner)
                )
            }
            Expr::Annot { body, ty, .. } => {
                write!(f, "({} : {})", body.with(interner), ty.with(interner))
            }
            Expr::Pair { left, right, .. } => {
                write!(f, "({}, {})", left.with(interner), right.with(interner))
            }
            Expr::Inject { is_right, value, .. } => {
                let tag = if *is_right { "inj_r" } else { "inj_l" };
                write!(f, "{}({})", tag, value.with(interner))
            }
        }
    }
}
