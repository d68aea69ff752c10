//! Lox lexer - tokenization for the Lox scripting language.
//!
//! This crate provides the scanner for Lox, which converts source code
//! into a token sequence for parsing.
//!
//! # Example
//!
//! ```
//! use lox_lexer::{scan, TokenKind};
//!
//! let (tokens, errors) = scan("var x = 42;");
//! assert!(errors.is_empty());
//! assert_eq!(tokens[0].kind, TokenKind::Var);
//! ```

pub mod scanner;
pub mod token;

pub use scanner::{ScanError, Scanner, scan};
pub use token::{Literal, Token, TokenKind, lookup_identifier};
