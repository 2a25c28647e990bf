//! Restricted arithmetic syntax.
//!
//! Organization:
//! - `ast.rs`    : spanned expression tree (literals, unary, binary)
//! - `parser.rs` : preprocessing + pest grammar + Pratt precedence

pub mod ast;
pub mod parser;

pub use ast::{AstNode, BinaryOp, Expr, Span, UnaryOp, WithSpan};
pub use parser::{parse, preprocess};
