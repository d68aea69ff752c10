//! Lox parser - expression AST construction for the Lox scripting language.
//!
//! This crate provides the recursive-descent parser for Lox, which
//! converts a scanned token sequence into an expression tree.
//!
//! # Example
//!
//! ```
//! use lox_lexer::scan;
//! use lox_parser::parse;
//!
//! let (tokens, _) = scan("1 + 2 * 3");
//! let expr = parse(tokens).unwrap();
//! assert_eq!(expr.to_string(), "(+ 1 (* 2 3))");
//! ```

pub mod ast;
pub mod parser;

pub use ast::Expr;
pub use parser::{ParseError, Parser, parse};
