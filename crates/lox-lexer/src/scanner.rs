//! Scanner for the Lox scripting language.

use crate::token::{Literal, Token, TokenKind, lookup_identifier};
use thiserror::Error;

/// Errors that can occur during scanning.
///
/// Scanning never aborts: each error is recorded and the scanner keeps
/// going, so a single pass reports every problem in the source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: usize },
}

/// Scanner tokenizes Lox source code in a single left-to-right pass.
pub struct Scanner {
    chars: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
}

impl Scanner {
    /// Create a new scanner for the given source text.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scan the entire source, returning the token sequence and any
    /// errors encountered along the way.
    ///
    /// The token sequence always ends with exactly one `Eof` token,
    /// regardless of errors.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<ScanError>) {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, String::new(), None, self.line));
        (self.tokens, self.errors)
    }

    /// Scan one token starting at `self.start`.
    ///
    /// Classification order matters: digits first, then identifier
    /// characters, then the punctuation table, so a digit is never
    /// misread as the start of an identifier.
    fn scan_token(&mut self) {
        let c = self.advance();

        if c.is_ascii_digit() {
            self.number();
            return;
        }
        if is_letter(c) {
            self.identifier();
            return;
        }

        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '!' => {
                let kind = if self.match_next('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_next('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_next('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_next('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add_token(kind);
            }
            '/' => {
                if self.match_next('/') {
                    // Line comment, runs to end of line.
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            '"' => self.string(),
            '\n' => self.line += 1,
            ' ' | '\r' | '\t' => {}
            // Any other character is skipped without a diagnostic.
            _ => {}
        }
    }

    /// Scan an identifier or keyword.
    fn identifier(&mut self) {
        while is_letter(self.peek()) || self.peek().is_ascii_digit() {
            self.advance();
        }
        let kind = lookup_identifier(&self.lexeme_text());
        self.add_token(kind);
    }

    /// Scan a number literal: a digit run, then a fractional part only
    /// if a digit follows the dot. A trailing `.` with nothing after it
    /// is left for the next token (e.g. a method-call dot).
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.lexeme_text();
        // Digit runs with at most one interior dot always parse.
        let value: f64 = text.parse().unwrap_or(f64::NAN);
        self.add_literal_token(TokenKind::Number, Some(Literal::Number(value)));
    }

    /// Scan a string literal. Strings may span lines; there is no
    /// escape-sequence processing. An unterminated string is reported
    /// and produces no token.
    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.errors
                .push(ScanError::UnterminatedString { line: self.line });
            return;
        }

        self.advance(); // closing quote

        let value: String = self.chars[self.start + 1..self.current - 1].iter().collect();
        self.add_literal_token(TokenKind::String, Some(Literal::String(value)));
    }

    fn lexeme_text(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal_token(kind, None);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let lexeme = self.lexeme_text();
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    /// Consume the next character if it matches `expected`.
    fn match_next(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.current + 1]
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

/// Check if a character can start or continue an identifier.
fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Scan an input string into a token sequence plus any scan errors.
pub fn scan(input: &str) -> (Vec<Token>, Vec<ScanError>) {
    Scanner::new(input).scan_tokens()
}
