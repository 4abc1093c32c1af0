//! Lexer for skein source text.
//!
//! A single-pass byte scanner. The source is ASCII; identifiers are
//! `[A-Za-z_][A-Za-z0-9_]*`, numbers may carry a fraction, an `e±n`
//! exponent, and a trailing `i` marking an imaginary literal. `//` starts a
//! line comment. Unknown characters become `Illegal` tokens which the
//! parser reports with their position; the lexer itself never fails.

use crate::intern::Interner;
use crate::token::{Span, Token, TokenType};

pub struct Lexer<'a, 'i> {
    source: &'a str,
    bytes: &'a [u8],
    position: usize,
    line: u32,
    column: u32,
    interner: &'i mut Interner,
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_ident_continue(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

impl<'a, 'i> Lexer<'a, 'i> {
    pub fn new(source: &'a str, interner: &'i mut Interner) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            position: 0,
            line: 1,
            column: 1,
            interner,
        }
    }

    /// Scan the whole input. The stream always ends with a single `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenType::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn peek(&self) -> u8 {
        *self.bytes.get(self.position).unwrap_or(&0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        *self.bytes.get(self.position + offset).unwrap_or(&0)
    }

    fn advance(&mut self) -> u8 {
        let ch = self.peek();
        if ch == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if ch != 0 {
            self.column += 1;
        }
        if self.position < self.bytes.len() {
            self.position += 1;
        }
        ch
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.advance();
                }
                b'/' if self.peek_at(1) == b'/' => {
                    while self.peek() != b'\n' && self.peek() != 0 {
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.position;
        let line = self.line;
        let column = self.column;
        let ch = self.peek();

        let kind = match ch {
            0 => {
                return self.make(TokenType::Eof, start, line, column);
            }
            b'(' => self.single(TokenType::LParen),
            b')' => self.single(TokenType::RParen),
            b'{' => self.single(TokenType::LBrace),
            b'}' => self.single(TokenType::RBrace),
            b';' => self.single(TokenType::Semi),
            b',' => self.single(TokenType::Comma),
            b'@' => self.single(TokenType::At),
            b'$' => self.single(TokenType::Dollar),
            b'.' => self.single(TokenType::Dot),
            b'%' => self.single(TokenType::Percent),
            b'=' => self.single(TokenType::Equals),
            b'+' => self.operator_family(TokenType::Plus, TokenType::FPlus, TokenType::CPlus, Some((b'+', TokenType::Concat))),
            b'-' => self.operator_family(TokenType::Minus, TokenType::FMinus, TokenType::CMinus, Some((b'>', TokenType::Arrow))),
            b'*' => self.operator_family(TokenType::Star, TokenType::FStar, TokenType::CStar, None),
            b'/' => self.operator_family(TokenType::Slash, TokenType::FSlash, TokenType::CSlash, None),
            b'^' => self.operator_family(TokenType::Caret, TokenType::FCaret, TokenType::CCaret, None),
            b'!' => {
                self.advance();
                if self.peek() == b'=' {
                    self.advance();
                    TokenType::NotEquals
                } else {
                    TokenType::Bang
                }
            }
            b'&' => {
                self.advance();
                if self.peek() == b'&' {
                    self.advance();
                    TokenType::AndAnd
                } else {
                    TokenType::Illegal
                }
            }
            b'|' => {
                self.advance();
                match self.peek() {
                    b'|' => {
                        self.advance();
                        TokenType::OrOr
                    }
                    b'>' => {
                        self.advance();
                        TokenType::PipeInto
                    }
                    _ => TokenType::Illegal,
                }
            }
            b':' => {
                self.advance();
                if self.peek() == b':' {
                    self.advance();
                    TokenType::Cons
                } else {
                    TokenType::Colon
                }
            }
            b'<' => {
                self.advance();
                if self.peek() == b'=' {
                    self.advance();
                    if self.peek() == b'<' {
                        self.advance();
                        TokenType::ComposeLeft
                    } else {
                        TokenType::LessEq
                    }
                } else {
                    TokenType::Less
                }
            }
            b'>' => {
                self.advance();
                match self.peek() {
                    b'=' => {
                        self.advance();
                        if self.peek() == b'>' {
                            self.advance();
                            TokenType::ComposeRight
                        } else {
                            TokenType::GreaterEq
                        }
                    }
                    b'>' => {
                        self.advance();
                        TokenType::Sequence
                    }
                    _ => TokenType::Greater,
                }
            }
            b'"' => self.scan_string(),
            b'\'' => self.scan_rune(),
            c if is_ident_start(c) => self.scan_identifier(),
            c if c.is_ascii_digit() => self.scan_number(),
            _ => self.single(TokenType::Illegal),
        };

        self.make(kind, start, line, column)
    }

    fn single(&mut self, kind: TokenType) -> TokenType {
        self.advance();
        kind
    }

    /// A base arithmetic operator and its `.`-suffixed float and
    /// `:`-suffixed complex variants, plus an optional extra two-char form
    /// (`++`, `->`).
    fn operator_family(
        &mut self,
        base: TokenType,
        float_kind: TokenType,
        complex_kind: TokenType,
        extra: Option<(u8, TokenType)>,
    ) -> TokenType {
        self.advance();
        if let Some((next, kind)) = extra {
            if self.peek() == next {
                self.advance();
                return kind;
            }
        }
        match self.peek() {
            b'.' => {
                self.advance();
                float_kind
            }
            b':' => {
                self.advance();
                complex_kind
            }
            _ => base,
        }
    }

    fn scan_identifier(&mut self) -> TokenType {
        let start = self.position;
        while is_ident_continue(self.peek()) {
            self.advance();
        }
        let text = &self.source[start..self.position];
        TokenType::lookup_keyword(text).unwrap_or(TokenType::Ident)
    }

    /// Integer, float (fraction and/or exponent), or imaginary (trailing
    /// `i`). A lone `.` after the digits is only a fraction when a digit
    /// follows, so `3.` stays `3` `.`.
    fn scan_number(&mut self) -> TokenType {
        let mut is_float = false;
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            is_float = true;
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        if self.peek() == b'e' || self.peek() == b'E' {
            let sign = matches!(self.peek_at(1), b'+' | b'-');
            let digit_at = if sign { 2 } else { 1 };
            if self.peek_at(digit_at).is_ascii_digit() {
                is_float = true;
                self.advance();
                if sign {
                    self.advance();
                }
                while self.peek().is_ascii_digit() {
                    self.advance();
                }
            }
        }
        if self.peek() == b'i' && !is_ident_continue(self.peek_at(1)) {
            self.advance();
            return TokenType::Imag;
        }
        if is_float {
            TokenType::Float
        } else {
            TokenType::Int
        }
    }

    fn scan_string(&mut self) -> TokenType {
        self.advance(); // opening quote
        while self.peek() != b'"' && self.peek() != 0 {
            self.advance();
        }
        if self.peek() == 0 {
            return TokenType::Illegal;
        }
        self.advance(); // closing quote
        TokenType::Str
    }

    fn scan_rune(&mut self) -> TokenType {
        self.advance(); // opening quote
        if self.peek() == 0 || self.peek() == b'\'' {
            return TokenType::Illegal;
        }
        self.advance();
        if self.peek() != b'\'' {
            return TokenType::Illegal;
        }
        self.advance();
        TokenType::Rune
    }

    fn make(&mut self, kind: TokenType, start: usize, line: u32, column: u32) -> Token {
        let lexeme = self.interner.intern(&self.source[start..self.position]);
        Token::new(kind, lexeme, Span::new(start, self.position, line, column))
    }
}
