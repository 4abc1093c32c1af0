//! The end-to-end pipeline: lex → parse → α-convert → infer.
//!
//! Shared by the file driver and the REPL. Lex and parse errors are
//! accumulated and reported together; α-conversion and typing stop at the
//! first error of the expression being processed.

use crate::alpha;
use crate::ast::ExprArena;
use crate::display::DisplayWith;
use crate::infer::Context;
use crate::intern::Interner;
use crate::lexer::Lexer;
use crate::parser::Parser;

/// Debug dump switches, one per CLI flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// `--vtok`: print the token stream before parsing.
    pub show_tokens: bool,
    /// `--vast`: print each α-converted expression.
    pub show_ast: bool,
    /// `--vtype`: trace inference rule applications.
    pub trace_types: bool,
    /// `--dparser`: trace parser events.
    pub trace_parser: bool,
}

/// Run the whole pipeline over a source string and return the fancy
/// rendering of each top-level expression's principal type. The error
/// side carries fully rendered diagnostics, ready to print.
pub fn infer_source(
    source: &str,
    interner: &mut Interner,
    options: Options,
) -> Result<Vec<String>, String> {
    let tokens = Lexer::new(source, interner).tokenize();
    if options.show_tokens {
        for token in &tokens {
            eprintln!(
                "tok: {:?} {:?} (line {} col {})",
                token.kind,
                interner.resolve(token.lexeme),
                token.span.line,
                token.span.column
            );
        }
    }

    let arena = ExprArena::new();
    let mut parser = Parser::new(tokens, &arena, interner).with_trace(options.trace_parser);
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        let rendered: Vec<String> = parser
            .errors()
            .iter()
            .map(|err| err.display_with_source(source))
            .collect();
        return Err(rendered.join("\n\n"));
    }

    let mut types = Vec::new();
    for expr in program {
        let converted = alpha::convert(expr, &arena, interner)
            .map_err(|err| err.display_with_source(source))?;
        if options.show_ast {
            eprintln!("ast: {}", converted.with(interner));
        }

        let context = Context::with_trace(options.trace_types);
        let ty = context
            .synth_expr(converted)
            .map_err(|err| err.display_with_source(source, interner))?;
        types.push(ty.fancy());
    }
    Ok(types)
}
