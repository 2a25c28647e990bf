//! Expression parser.
//!
//! Converts a free-form numeric string into the restricted [`Expr`] tree.
//! Parsing is purely syntactic; all arithmetic checks (digit budget,
//! positivity, division by zero) belong to the evaluator.
//!
//! The accepted language is fixed by `grammar.pest` — this module never
//! delegates to a general-purpose expression engine, so nothing outside
//! the documented grammar can ever evaluate.

use num_bigint::BigInt;
use once_cell::sync::Lazy;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;

use crate::diagnostics::{ErrorContext, HailstoneError, SourceContext};
use crate::syntax::ast::{AstNode, BinaryOp, Expr, Span, UnaryOp, WithSpan};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct ExpressionParser;

// Precedence lowest → highest. `^` is right-associative (2^3^2 = 512),
// and unary sign binds tighter than `^`, so `-7^2` is `(-7)^2` and fails
// the evaluator's positive-base check rather than silently negating.
static PRATT: Lazy<PrattParser<Rule>> = Lazy::new(|| {
    PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
        .op(Op::infix(Rule::mul, Assoc::Left) | Op::infix(Rule::div, Assoc::Left))
        .op(Op::infix(Rule::pow, Assoc::Right))
        .op(Op::prefix(Rule::neg) | Op::prefix(Rule::pos))
});

// ============================================================================
// PUBLIC API
// ============================================================================

/// Strips thousands-separators and whitespace, and normalizes the
/// Python-style `**` power spelling to the grammar's `^` token, so
/// `"10 ** 25"`, `"10^25"` and `"1,0^2,5"` all parse identically.
pub fn preprocess(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    stripped.replace("**", "^")
}

/// Parses preprocessed expression text into a single AST node.
pub fn parse(source_text: &str, source: &SourceContext) -> Result<AstNode, HailstoneError> {
    if source_text.is_empty() {
        return Err(HailstoneError::syntax(
            "empty expression",
            ErrorContext::none(),
        )
        .with_help("enter a positive integer, e.g. 27 or 10^25"));
    }

    let mut pairs = ExpressionParser::parse(Rule::program, source_text)
        .map_err(|e| convert_parse_error(e, source))?;

    let program = pairs.next().unwrap(); // pest guarantees the program rule exists
    let expr = program
        .into_inner()
        .find(|p| p.as_rule() == Rule::expr)
        .unwrap(); // grammar guarantees exactly one expr under program

    build_expr(expr.into_inner(), source)
}

// ============================================================================
// AST BUILDERS
// ============================================================================

fn build_expr(pairs: Pairs<Rule>, source: &SourceContext) -> Result<AstNode, HailstoneError> {
    PRATT
        .map_primary(|primary| build_primary(primary, source))
        .map_prefix(|op, rhs| {
            let rhs = rhs?;
            let op_kind = match op.as_rule() {
                Rule::neg => UnaryOp::Neg,
                Rule::pos => UnaryOp::Plus,
                rule => return Err(unsupported_rule(rule, &op, source)),
            };
            let span = Span {
                start: op.as_span().start(),
                end: rhs.span.end,
            };
            Ok(WithSpan {
                value: Expr::Unary {
                    op: op_kind,
                    operand: Box::new(rhs),
                },
                span,
            })
        })
        .map_infix(|lhs, op, rhs| {
            let (lhs, rhs) = (lhs?, rhs?);
            let op_kind = match op.as_rule() {
                Rule::add => BinaryOp::Add,
                Rule::sub => BinaryOp::Sub,
                Rule::mul => BinaryOp::Mul,
                Rule::div => BinaryOp::Div,
                Rule::pow => BinaryOp::Pow,
                rule => return Err(unsupported_rule(rule, &op, source)),
            };
            let span = lhs.span.join(rhs.span);
            Ok(WithSpan {
                value: Expr::Binary {
                    op: op_kind,
                    left: Box::new(lhs),
                    right: Box::new(rhs),
                },
                span,
            })
        })
        .parse(pairs)
}

fn build_primary(pair: Pair<Rule>, source: &SourceContext) -> Result<AstNode, HailstoneError> {
    let span = get_span(&pair);
    match pair.as_rule() {
        Rule::integer => {
            let text = pair.as_str();
            let value: BigInt = text.parse().map_err(|_| {
                HailstoneError::syntax(
                    format!("invalid integer literal '{text}'"),
                    ErrorContext::spanned(source.to_named_source(), span),
                )
            })?;
            Ok(WithSpan {
                value: Expr::Integer(value),
                span,
            })
        }
        // Parenthesised subexpression.
        Rule::expr => build_expr(pair.into_inner(), source),
        rule => Err(unsupported_rule(rule, &pair, source)),
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Defensive arm: the grammar cannot currently produce any other rule
/// here, but the parser and evaluator are separable stages and new rules
/// must not evaluate silently.
fn unsupported_rule(
    rule: Rule,
    pair: &Pair<Rule>,
    source: &SourceContext,
) -> HailstoneError {
    HailstoneError::operator(
        format!("unsupported rule: {rule:?}"),
        ErrorContext::spanned(source.to_named_source(), get_span(pair)),
    )
}

fn convert_parse_error(
    error: pest::error::Error<Rule>,
    source: &SourceContext,
) -> HailstoneError {
    let span = match error.location {
        pest::error::InputLocation::Pos(pos) => Span {
            start: pos,
            end: pos,
        },
        pest::error::InputLocation::Span((start, end)) => Span { start, end },
    };

    HailstoneError::syntax(
        "expected an integer expression",
        ErrorContext::spanned(source.to_named_source(), span),
    )
    .with_help("accepted: digits, commas, whitespace, + - * / ^ and parentheses")
}

fn get_span(pair: &Pair<Rule>) -> Span {
    Span {
        start: pair.as_span().start(),
        end: pair.as_span().end(),
    }
}
