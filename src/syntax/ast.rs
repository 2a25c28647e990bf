//! AST for the restricted arithmetic grammar.
//!
//! The tree is deliberately tiny: integer literals, unary sign, and the
//! five binary operators. Nothing else can be represented, which is what
//! keeps the accepted language provably restricted — there is no node
//! kind for names, calls, or floats to sneak through.

use std::fmt;

use num_bigint::BigInt;

/// A byte range in the preprocessed expression text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Smallest span covering both operands of a binary node.
    pub fn join(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Wrapper carrying source span information with any value.
#[derive(Debug, Clone, PartialEq)]
pub struct WithSpan<T> {
    pub value: T,
    pub span: Span,
}

/// Canonical AST node type. The tree is owned exclusively by one parse
/// and discarded after evaluation, so plain `Box` ownership suffices.
pub type AstNode = WithSpan<Expr>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Unary `+`, the identity.
    Plus,
    /// Unary `-`, negation.
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// Floor division (round toward negative infinity).
    Div,
    /// Exponentiation, guarded by the digit budget at evaluation time.
    Pow,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

/// The expression tree. Immutable, acyclic, built by the parser only.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(BigInt),
    Unary {
        op: UnaryOp,
        operand: Box<AstNode>,
    },
    Binary {
        op: BinaryOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Integer(n) => write!(f, "{n}"),
            Expr::Unary { op, operand } => {
                let sign = match op {
                    UnaryOp::Plus => "+",
                    UnaryOp::Neg => "-",
                };
                write!(f, "{sign}({})", operand.value)
            }
            Expr::Binary { op, left, right } => {
                write!(f, "({}{}{})", left.value, op.symbol(), right.value)
            }
        }
    }
}
