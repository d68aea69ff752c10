//! AST node types for the Lox expression parser.

use lox_lexer::{Literal, Token};
use std::fmt;

/// Expression node enumeration.
///
/// The variant set is closed and fixed: downstream consumers (an
/// evaluator, a pretty-printer) branch exhaustively over it. The
/// expression grammar in this crate only produces `Literal`,
/// `Grouping`, `Unary`, and `Binary`; the remaining variants are part
/// of the node vocabulary so a later statement- and class-level grammar
/// can populate them without changing the type.
///
/// Nodes are immutable once built and own their children outright; the
/// `Token`s stored in nodes are value copies, not references into the
/// scanner.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal {
        value: Literal,
    },
    Grouping {
        expr: Box<Expr>,
    },
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    /// Structurally identical to `Binary`, kept distinct so an
    /// evaluator can short-circuit `and`/`or` instead of evaluating
    /// both operands eagerly.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Variable {
        name: Token,
    },
    Assign {
        name: Token,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        paren: Token,
        args: Vec<Expr>,
    },
    Get {
        object: Box<Expr>,
        name: Token,
    },
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },
    This {
        keyword: Token,
    },
    Super {
        keyword: Token,
        method: Token,
    },
}

impl fmt::Display for Expr {
    /// Render the expression in parenthesized prefix form, e.g.
    /// `1 + 2 * 3` prints as `(+ 1 (* 2 3))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value } => write!(f, "{}", value),
            Expr::Grouping { expr } => write!(f, "(group {})", expr),
            Expr::Unary { operator, right } => write!(f, "({} {})", operator.lexeme, right),
            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", operator.lexeme, left, right),
            Expr::Variable { name } => write!(f, "{}", name.lexeme),
            Expr::Assign { name, value } => write!(f, "(= {} {})", name.lexeme, value),
            Expr::Call { callee, args, .. } => {
                write!(f, "(call {}", callee)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Get { object, name } => write!(f, "(. {} {})", object, name.lexeme),
            Expr::Set {
                object,
                name,
                value,
            } => write!(f, "(= (. {} {}) {})", object, name.lexeme, value),
            Expr::This { .. } => write!(f, "this"),
            Expr::Super { method, .. } => write!(f, "(super {})", method.lexeme),
        }
    }
}
