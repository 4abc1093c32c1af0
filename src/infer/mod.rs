//! Bidirectional type inference.
//!
//! The algorithmic core of skein: four mutually recursive judgments
//! (subtyping, instantiation, checking, and synthesis) threading an
//! ordered context of universal variables, existential variables (solved
//! and unsolved), scope markers, and program-variable bindings. The
//! calculus is the DK ("Complete and Easy Bidirectional Typechecking for
//! Higher-Rank Polymorphism") system extended with primitive numeric
//! subtyping (`int <: float <: complex`).
//!
//! A type query is sequential and bounded: contexts are values, rules
//! receive one and return the extension that records their solutions, and
//! the final context is applied to the synthesized type once at the end.

mod check;
mod context;
mod error;
mod instantiate;
mod subst;
mod subtype;
mod synth;
mod trace;

pub use context::{Context, Entry};
pub use error::{InferResult, TypeError, TypeErrorKind};
pub use subst::{occurs_in, substitute};
