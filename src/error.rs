//! Parse errors and source-snippet rendering.
//!
//! Every diagnostic in the crate points at a `Span` and renders the same
//! way: a colored `error:` line, the offending source line, and a caret
//! underline. The snippet helper here is shared with the α-conversion and
//! type errors.

use std::fmt;

use crate::style::Style;
use crate::token::{Span, TokenType};

#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ParseErrorKind {
    UnexpectedToken { expected: TokenType, found: TokenType },
    /// No way to start an expression with this token.
    NoPrefixRule { found: TokenType },
    ExpectedIdentifier { found: TokenType },
    ExpectedType { found: TokenType },
    InvalidIntLiteral,
    InvalidFloatLiteral,
    IllegalToken,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                format!("expected {:?}, found {:?}", expected, found)
            }
            ParseErrorKind::NoPrefixRule { found } => {
                format!("{:?} cannot start an expression", found)
            }
            ParseErrorKind::ExpectedIdentifier { found } => {
                format!("expected an identifier, found {:?}", found)
            }
            ParseErrorKind::ExpectedType { found } => {
                format!("expected a type, found {:?}", found)
            }
            ParseErrorKind::InvalidIntLiteral => "integer literal out of range".to_string(),
            ParseErrorKind::InvalidFloatLiteral => "malformed float literal".to_string(),
            ParseErrorKind::IllegalToken => "unrecognized character".to_string(),
        }
    }

    pub fn display_with_source(&self, source: &str) -> String {
        format!(
            "{}: {}\n\n{}",
            Style::bold_red("error"),
            self,
            snippet(source, self.span)
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "syntax error at line {} column {}: {}",
            self.span.line,
            self.span.column,
            self.message()
        )
    }
}

impl std::error::Error for ParseError {}

/// Render the source line containing `span` with a caret underline.
pub fn snippet(source: &str, span: Span) -> String {
    let start = span.start.min(source.len());
    let line_start = source[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = source[line_start..]
        .find('\n')
        .map(|off| line_start + off)
        .unwrap_or(source.len());
    let line_content = &source[line_start..line_end];

    let col = start.saturating_sub(line_start);
    let width = span.end.saturating_sub(span.start).max(1);
    let underline = format!("{}{}", " ".repeat(col), "^".repeat(width));

    let line_num = Style::blue(&format!("{:4}", span.line));
    let pipe = Style::blue("|");
    format!(
        "{} {} {}\n     {} {}",
        line_num,
        pipe,
        line_content,
        pipe,
        Style::red(&underline)
    )
}
