//! Typing errors.
//!
//! The first error aborts the whole top-level inference; nothing is
//! retried. Inner judgments construct errors without a position and the
//! checking/synthesis layer anchors them to the expression it was working
//! on.

use std::fmt;

use crate::ast::types::Type;
use crate::ast::uid::Uid;
use crate::display::DisplayWith;
use crate::error::snippet;
use crate::intern::Interner;
use crate::style::Style;
use crate::token::Span;

#[derive(Debug, Clone)]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum TypeErrorKind {
    /// Synthesis met an identifier with no binding in Γ.
    NotInContext(Uid),
    /// A rule received a type that is ill-formed in Γ.
    Malformed(Type),
    /// No subtyping rule relates the two types.
    Subtype(Type, Type),
    /// No synthesis rule applies (unknown operator, stub expression, …).
    Synth,
    /// Neither if-branch is a subtype of the other.
    BranchMismatch(Type, Type),
    /// A rule expected a specific shape.
    UnexpectedType { expected: Type, found: Type },
}

pub type InferResult<T> = Result<T, TypeError>;

impl TypeError {
    pub fn new(kind: TypeErrorKind) -> Self {
        TypeError { kind, span: Span::default() }
    }

    pub fn at(kind: TypeErrorKind, span: Span) -> Self {
        TypeError { kind, span }
    }

    /// Anchor an unpositioned error to `span`; an already-anchored error
    /// keeps its more precise position.
    pub fn located(mut self, span: Span) -> Self {
        if self.span == Span::default() {
            self.span = span;
        }
        self
    }

    pub fn display_with_source(&self, source: &str, interner: &Interner) -> String {
        format!(
            "{}: type error at line {} column {}: {}\n\n{}",
            Style::bold_red("error"),
            self.span.line,
            self.span.column,
            self.with(interner),
            snippet(source, self.span)
        )
    }

    /// Every kind renders from fancy type notation alone; only the
    /// identifier in `NotInContext` needs the interner, so the plain
    /// `Display` path falls back to its uid number.
    fn fmt_kind(&self, interner: Option<&Interner>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeErrorKind::NotInContext(uid) => match interner {
                Some(interner) => {
                    write!(f, "identifier {} not in context", uid.with(interner))
                }
                None => write!(f, "identifier #{} not in context", uid.id),
            },
            TypeErrorKind::Malformed(ty) => {
                write!(f, "type {} is not well formed", ty.fancy())
            }
            TypeErrorKind::Subtype(a, b) => {
                let mut names = crate::ast::types::FancyNames::default();
                let a = a.fancy_with(&mut names);
                let b = b.fancy_with(&mut names);
                write!(f, "expected {} to be a subtype of {}", a, b)
            }
            TypeErrorKind::Synth => {
                write!(f, "failed to infer a type for this expression")
            }
            TypeErrorKind::BranchMismatch(then_ty, else_ty) => {
                let mut names = crate::ast::types::FancyNames::default();
                let then_ty = then_ty.fancy_with(&mut names);
                let else_ty = else_ty.fancy_with(&mut names);
                write!(
                    f,
                    "type mismatch in if expression: then branch has type {} while else branch has type {}",
                    then_ty, else_ty
                )
            }
            TypeErrorKind::UnexpectedType { expected, found } => {
                let mut names = crate::ast::types::FancyNames::default();
                let found = found.fancy_with(&mut names);
                let expected = expected.fancy_with(&mut names);
                write!(
                    f,
                    "unexpected value of type {}, expected a value of type {}",
                    found, expected
                )
            }
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type error at line {} column {}: ",
            self.span.line, self.span.column
        )?;
        self.fmt_kind(None, f)
    }
}

impl std::error::Error for TypeError {}

impl DisplayWith for TypeError {
    fn fmt_with(&self, interner: &Interner, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_kind(Some(interner), f)
    }
}
