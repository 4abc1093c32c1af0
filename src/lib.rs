//! skein: the frontend of a small functional language with higher-rank
//! parametric polymorphism, numeric subtyping, and a fixpoint operator.
//!
//! The pipeline is linear: the [`lexer`] turns source text into tokens,
//! the [`parser`] builds an arena-allocated expression tree (desugaring
//! `let`, multi-parameter functions, and self-reference on the way), the
//! [`alpha`] pass gives every binder a globally unique identifier, and
//! [`infer`] runs bidirectional DK-style type inference over an ordered
//! algorithmic context, producing a principal type per top-level
//! expression.

pub mod alpha;
pub mod ast;
pub mod cli;
pub mod display;
pub mod error;
pub mod infer;
pub mod intern;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod repl;
pub mod style;
pub mod suggest;
pub mod token;

pub use alpha::AlphaError;
pub use ast::operators::{infix_signature, is_comparison, prefix_signature};
pub use ast::types::{FancyNames, Type};
pub use ast::uid::{reset_uid_counter, Uid};
pub use ast::{Expr, ExprArena, Ident, Operator};
pub use display::{DisplayWith, WithInterner};
pub use error::{ParseError, ParseErrorKind};
pub use infer::{occurs_in, substitute, Context, Entry, InferResult, TypeError, TypeErrorKind};
pub use intern::{Interner, Symbol};
pub use lexer::Lexer;
pub use parser::Parser;
pub use pipeline::{infer_source, Options};
pub use repl::Repl;
pub use style::Style;
pub use token::{Span, Token, TokenType};
