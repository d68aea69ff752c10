//! Lox - scanner and expression parser for the Lox scripting language.
//!
//! Source text goes through two strictly ordered stages: the scanner
//! turns characters into tokens, and the recursive-descent parser turns
//! tokens into an expression tree. Evaluation is out of scope; the
//! pipeline ends at a well-formed AST or a diagnosed failure.
//!
//! # Example
//!
//! ```
//! use lox::parse;
//!
//! let expr = parse("1 + 2 * 3").unwrap();
//! assert_eq!(expr.to_string(), "(+ 1 (* 2 3))");
//! ```

pub use lox_lexer as lexer;
pub use lox_parser as parser;

// Re-export commonly used types
pub use lox_lexer::{Literal, ScanError, Scanner, Token, TokenKind, scan};
pub use lox_parser::{Expr, ParseError, Parser};

/// Error type covering both pipeline stages.
///
/// Scan errors come in a batch because the scanner recovers and keeps
/// going; a parse aborts on its first error.
#[derive(Debug, Clone, PartialEq)]
pub enum LoxError {
    Scan(Vec<ScanError>),
    Parse(ParseError),
}

impl std::fmt::Display for LoxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoxError::Scan(errors) => {
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
            LoxError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LoxError {}

/// Scan and parse source text into a single expression.
///
/// This is a convenience function for callers that do not need the
/// intermediate token sequence. Any scan error fails the whole call;
/// use [`scan`] directly to keep the partial token output.
pub fn parse(source: &str) -> Result<Expr, LoxError> {
    let (tokens, errors) = lox_lexer::scan(source);
    if !errors.is_empty() {
        return Err(LoxError::Scan(errors));
    }
    lox_parser::parse(tokens).map_err(LoxError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pipeline() {
        let expr = parse("1 + 2 * 3 + (1 / 2)").unwrap();
        assert_eq!(expr.to_string(), "(+ (+ 1 (* 2 3)) (group (/ 1 2)))");
    }

    #[test]
    fn test_parse_comparison_chain() {
        let expr = parse("!true == 1 >= 2").unwrap();
        assert_eq!(expr.to_string(), "(== (! true) (>= 1 2))");
    }

    #[test]
    fn test_scan_error_propagates() {
        let err = parse("1 + \"oops").unwrap_err();
        assert_eq!(
            err,
            LoxError::Scan(vec![ScanError::UnterminatedString { line: 1 }])
        );
        assert_eq!(err.to_string(), "[line 1] Error: Unterminated string.");
    }

    #[test]
    fn test_parse_error_propagates() {
        let err = parse("(1 + 2").unwrap_err();
        assert!(matches!(err, LoxError::Parse(ParseError::AtEnd { .. })));
    }

    #[test]
    fn test_scan_passthrough() {
        let (tokens, errors) = scan("var answer = 42;");
        assert!(errors.is_empty());
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }
}
