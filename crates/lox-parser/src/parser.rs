//! Recursive-descent expression parser for Lox.

use crate::ast::Expr;
use lox_lexer::{Literal, Token, TokenKind};
use thiserror::Error;

/// Errors that can occur during parsing.
///
/// The two variants carry the same information but render the location
/// differently: `AtEnd` when the parse ran out of input, `AtToken` when
/// a concrete token was the problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("[line {line}] Error at end: {message}")]
    AtEnd { line: usize, message: String },

    #[error("[line {line}] Error at '{lexeme}': {message}")]
    AtToken {
        line: usize,
        lexeme: String,
        message: String,
    },
}

impl ParseError {
    /// Build the error for the offending token, choosing the location
    /// phrasing based on whether the token is `Eof`.
    fn at(token: &Token, message: impl Into<String>) -> Self {
        if token.kind == TokenKind::Eof {
            Self::AtEnd {
                line: token.line,
                message: message.into(),
            }
        } else {
            Self::AtToken {
                line: token.line,
                lexeme: token.lexeme.clone(),
                message: message.into(),
            }
        }
    }
}

/// Recursive-descent parser over a scanned token sequence.
///
/// The token sequence must end with an `Eof` token, as produced by the
/// scanner. One parser instance parses one top-level expression; on the
/// first syntax error the parse unwinds to the top and yields the error
/// with no partial tree. There is no statement-level synchronization
/// because no statement grammar exists yet.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Create a new parser for the given token sequence.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse a single expression.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        self.expression()
    }

    // Grammar, lowest to highest binding precedence. Each binary level
    // parses one higher-precedence operand and then folds operators at
    // its own level left-associatively.

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.comparison()?;

        while self.match_kinds(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.addition()?;

        while self.match_kinds(&[
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEqual,
            TokenKind::GreaterEqual,
        ]) {
            let operator = self.previous().clone();
            let right = self.addition()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn addition(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.multiplication()?;

        while self.match_kinds(&[TokenKind::Plus, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let right = self.multiplication()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn multiplication(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;

        while self.match_kinds(&[TokenKind::Star, TokenKind::Slash]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// At most one prefix operator, then a primary. The prefix does not
    /// recurse into itself, so stacked operators like `--1` or `!!x`
    /// are rejected.
    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_kinds(&[TokenKind::Minus, TokenKind::Bang]) {
            let operator = self.previous().clone();
            let right = self.primary()?;
            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        if self.match_kinds(&[TokenKind::Nil]) {
            return Ok(Expr::Literal {
                value: Literal::Nil,
            });
        }
        if self.match_kinds(&[TokenKind::True]) {
            return Ok(Expr::Literal {
                value: Literal::Bool(true),
            });
        }
        if self.match_kinds(&[TokenKind::False]) {
            return Ok(Expr::Literal {
                value: Literal::Bool(false),
            });
        }

        if self.match_kinds(&[TokenKind::Number, TokenKind::String]) {
            let value = self.previous().literal.clone().unwrap_or(Literal::Nil);
            return Ok(Expr::Literal { value });
        }

        if self.match_kinds(&[TokenKind::LeftParen]) {
            let expr = self.expression()?;
            self.consume(TokenKind::RightParen, "Expected ')' after expression.")?;
            return Ok(Expr::Grouping {
                expr: Box::new(expr),
            });
        }

        Err(ParseError::at(self.peek(), "Expect expression."))
    }

    // Cursor helpers. `advance` never moves past the trailing `Eof`;
    // `peek` and `previous` are non-mutating lookups.

    /// Consume the current token if it matches one of `kinds`.
    fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    /// Consume the current token if it has the expected kind, otherwise
    /// fail at the offending token.
    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<&Token, ParseError> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(ParseError::at(self.peek(), message))
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }
}

/// Parse a token sequence into a single expression.
pub fn parse(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lox_lexer::scan;

    fn parse_source(source: &str) -> Result<Expr, ParseError> {
        let (tokens, errors) = scan(source);
        assert!(errors.is_empty(), "scan errors: {:?}", errors);
        parse(tokens)
    }

    fn parse_ok(source: &str) -> Expr {
        parse_source(source).unwrap_or_else(|e| panic!("parse failed for {:?}: {}", source, e))
    }

    fn number(expr: &Expr) -> f64 {
        match expr {
            Expr::Literal {
                value: Literal::Number(n),
            } => *n,
            other => panic!("expected number literal, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_and_grouping() {
        // 1 + 2 * 3 + (1 / 2)
        //   => Binary(Binary(1, +, Binary(2, *, 3)), +, Grouping(Binary(1, /, 2)))
        let expr = parse_ok("1 + 2 * 3 + (1 / 2)");

        let Expr::Binary {
            left,
            operator,
            right,
        } = expr
        else {
            panic!("expected binary root");
        };
        assert_eq!(operator.kind, TokenKind::Plus);

        let Expr::Binary {
            left: ll,
            operator: lop,
            right: lr,
        } = *left
        else {
            panic!("expected binary left subtree");
        };
        assert_eq!(lop.kind, TokenKind::Plus);
        assert_eq!(number(&ll), 1.0);

        let Expr::Binary {
            left: mul_l,
            operator: mul_op,
            right: mul_r,
        } = *lr
        else {
            panic!("expected multiplication subtree");
        };
        assert_eq!(mul_op.kind, TokenKind::Star);
        assert_eq!(number(&mul_l), 2.0);
        assert_eq!(number(&mul_r), 3.0);

        let Expr::Grouping { expr: inner } = *right else {
            panic!("expected grouping on the right");
        };
        let Expr::Binary {
            left: div_l,
            operator: div_op,
            right: div_r,
        } = *inner
        else {
            panic!("expected division inside grouping");
        };
        assert_eq!(div_op.kind, TokenKind::Slash);
        assert_eq!(number(&div_l), 1.0);
        assert_eq!(number(&div_r), 2.0);
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(parse_ok("1 - 2 - 3").to_string(), "(- (- 1 2) 3)");
        assert_eq!(parse_ok("8 / 4 / 2").to_string(), "(/ (/ 8 4) 2)");
        assert_eq!(parse_ok("1 == 2 == 3").to_string(), "(== (== 1 2) 3)");
        assert_eq!(parse_ok("1 < 2 < 3").to_string(), "(< (< 1 2) 3)");
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse_ok("nil").to_string(), "nil");
        assert_eq!(parse_ok("true").to_string(), "true");
        assert_eq!(parse_ok("false").to_string(), "false");
        assert_eq!(parse_ok("1.5").to_string(), "1.5");
        assert_eq!(parse_ok("\"hi\"").to_string(), "hi");
    }

    #[test]
    fn test_unary() {
        assert_eq!(parse_ok("-1").to_string(), "(- 1)");
        assert_eq!(parse_ok("!true").to_string(), "(! true)");
        assert_eq!(parse_ok("-1 * 2").to_string(), "(* (- 1) 2)");
    }

    #[test]
    fn test_unary_does_not_nest() {
        // The prefix rule descends straight to primary, so a second
        // prefix operator has nothing to match.
        let err = parse_source("--1").unwrap_err();
        assert_eq!(
            err,
            ParseError::AtToken {
                line: 1,
                lexeme: "-".to_string(),
                message: "Expect expression.".to_string(),
            }
        );
        assert!(parse_source("!!true").is_err());
    }

    #[test]
    fn test_nested_grouping() {
        assert_eq!(
            parse_ok("((1 + 2))").to_string(),
            "(group (group (+ 1 2)))"
        );
    }

    #[test]
    fn test_missing_right_paren_at_end() {
        let err = parse_source("(1 + 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::AtEnd {
                line: 1,
                message: "Expected ')' after expression.".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "[line 1] Error at end: Expected ')' after expression."
        );
    }

    #[test]
    fn test_missing_right_paren_at_token() {
        let err = parse_source("(1 + 2 ;").unwrap_err();
        assert_eq!(
            err,
            ParseError::AtToken {
                line: 1,
                lexeme: ";".to_string(),
                message: "Expected ')' after expression.".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "[line 1] Error at ';': Expected ')' after expression."
        );
    }

    #[test]
    fn test_empty_input_expects_expression() {
        let err = parse_source("").unwrap_err();
        assert_eq!(
            err,
            ParseError::AtEnd {
                line: 1,
                message: "Expect expression.".to_string(),
            }
        );
    }

    #[test]
    fn test_error_line_number() {
        let err = parse_source("1 +\n(2").unwrap_err();
        assert_eq!(
            err,
            ParseError::AtEnd {
                line: 2,
                message: "Expected ')' after expression.".to_string(),
            }
        );
    }
}
