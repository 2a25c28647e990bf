//! Guarded evaluation of the restricted expression tree.
//!
//! All arithmetic is exact `BigInt` arithmetic. Two rules have teeth:
//!
//! - Division is floor division (round toward negative infinity), the
//!   `a // b` contract, including mixed-sign operands.
//! - Exponentiation is pre-screened: the decimal digit count of `b^e` is
//!   estimated as `e * log10(b)` and compared against the digit budget
//!   BEFORE the power is computed. The estimate costs nothing; the power
//!   itself can be arbitrarily expensive, so compute-then-check is not an
//!   option.
//!
//! The root result must be strictly positive and is returned as a
//! `BigUint`, which is the precondition every trajectory consumer relies
//! on.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};

use crate::diagnostics::{ErrorContext, HailstoneError, SourceContext};
use crate::syntax::{self, AstNode, BinaryOp, Expr, Span, UnaryOp};

/// Evaluates a free-form numeric string into a bounded positive integer.
///
/// Strips separators, parses under the restricted grammar, folds the
/// tree bottom-up, then enforces strict positivity. Pure function of its
/// inputs; callers may cache results keyed by the input string.
pub fn evaluate(text: &str, digit_budget: u32) -> Result<BigUint, HailstoneError> {
    let pre = syntax::preprocess(text);
    let source = SourceContext::new("expression", pre.clone());
    let root = syntax::parse(&pre, &source)?;
    let value = eval_node(&root, &source, digit_budget)?;

    // `to_biguint` is None for negatives; zero is filtered explicitly.
    value
        .to_biguint()
        .filter(|v| !v.is_zero())
        .ok_or_else(|| {
            HailstoneError::non_positive(ErrorContext::spanned(
                source.to_named_source(),
                root.span,
            ))
            .with_help("the expression must evaluate to an integer >= 1")
        })
}

fn eval_node(
    node: &AstNode,
    source: &SourceContext,
    digit_budget: u32,
) -> Result<BigInt, HailstoneError> {
    match &node.value {
        Expr::Integer(value) => Ok(value.clone()),

        Expr::Unary { op, operand } => {
            let value = eval_node(operand, source, digit_budget)?;
            Ok(match op {
                UnaryOp::Plus => value,
                UnaryOp::Neg => -value,
            })
        }

        Expr::Binary { op, left, right } => {
            let lhs = eval_node(left, source, digit_budget)?;
            let rhs = eval_node(right, source, digit_budget)?;
            match op {
                BinaryOp::Add => Ok(lhs + rhs),
                BinaryOp::Sub => Ok(lhs - rhs),
                BinaryOp::Mul => Ok(lhs * rhs),
                BinaryOp::Div => div_floor(&lhs, &rhs, source, node.span),
                BinaryOp::Pow => checked_pow(&lhs, &rhs, digit_budget, source, node.span),
            }
        }
    }
}

// ============================================================================
// ARITHMETIC HELPERS
// ============================================================================

/// Floor division on `BigInt`. The `/` operator truncates toward zero;
/// when the signs differ and the division is inexact the quotient must be
/// pulled one further down.
fn div_floor(
    a: &BigInt,
    b: &BigInt,
    source: &SourceContext,
    span: Span,
) -> Result<BigInt, HailstoneError> {
    if b.is_zero() {
        return Err(HailstoneError::domain(
            "division by zero",
            ErrorContext::spanned(source.to_named_source(), span),
        ));
    }

    let quotient = a / b;
    let remainder = a % b;
    if !remainder.is_zero() && (remainder.is_negative() != b.is_negative()) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Exponentiation with the mandatory size guard.
fn checked_pow(
    base: &BigInt,
    exponent: &BigInt,
    digit_budget: u32,
    source: &SourceContext,
    span: Span,
) -> Result<BigInt, HailstoneError> {
    if !base.is_positive() || exponent.is_negative() {
        return Err(HailstoneError::domain(
            "exponentiation requires a positive base and a non-negative exponent",
            ErrorContext::spanned(source.to_named_source(), span),
        ));
    }

    // Trivial powers sidestep both the estimate and the u64 conversion;
    // 1^e in particular is legal for any exponent magnitude.
    if base.is_one() || exponent.is_zero() {
        return Ok(BigInt::one());
    }

    // The guard: estimated decimal digits of base^exponent, checked
    // before any multiplication happens.
    let estimated_digits = exponent.to_f64().unwrap_or(f64::INFINITY) * log10_big(base);
    if estimated_digits > f64::from(digit_budget) {
        return Err(HailstoneError::size_limit(
            format!("estimated result exceeds {digit_budget} digits"),
            ErrorContext::spanned(source.to_named_source(), span),
        )
        .with_help("lower the exponent or raise the digit budget"));
    }

    // With base >= 2 and the estimate within budget, the exponent is far
    // below u64::MAX; a failed conversion means the guard math was wrong.
    let exp = exponent.to_u64().ok_or_else(|| {
        HailstoneError::size_limit(
            "exponent too large to evaluate",
            ErrorContext::spanned(source.to_named_source(), span),
        )
    })?;

    Ok(Pow::pow(base.clone(), exp))
}

/// log10 of a positive `BigInt`. Values beyond f64 range fall back to the
/// bit length, since log10(2^bits) bounds log10(b) from above within one
/// bit's worth of error — plenty for a digit estimate.
fn log10_big(value: &BigInt) -> f64 {
    match value.to_f64() {
        Some(f) if f.is_finite() && f > 0.0 => f.log10(),
        _ => value.bits() as f64 * std::f64::consts::LOG10_2,
    }
}
