//! Integration coverage for the evaluator's documented contract: every
//! accepted form, every rejection kind, and the guard ordering that makes
//! oversized powers cheap to refuse.

use num_bigint::BigUint;

use hailstone::{ErrorKind, Explorer, Limits};

// ---
// Test Setup
// ---

fn default_explorer() -> Explorer {
    Explorer::new(Limits::default())
}

fn eval(text: &str) -> Result<BigUint, hailstone::HailstoneError> {
    default_explorer().evaluate(text)
}

fn kind_of(text: &str) -> ErrorKind {
    eval(text).unwrap_err().kind()
}

// ---
// Accepted forms
// ---

#[test]
fn plain_decimals_with_separators_read_directly() {
    for (input, expected) in [
        ("27", "27"),
        ("1,000,000", "1000000"),
        (" 9 , 0 0 7 ", "9007"),
        ("123456789012345678901234567890", "123456789012345678901234567890"),
    ] {
        assert_eq!(eval(input).unwrap(), expected.parse::<BigUint>().unwrap());
    }
}

#[test]
fn ten_to_the_twenty_fifth_is_exact() {
    let expected: BigUint = "10000000000000000000000000".parse().unwrap();
    assert_eq!(eval("10^25").unwrap(), expected);
    assert_eq!(eval("10**25").unwrap(), expected);
    assert_eq!(eval("10 ^ 25").unwrap(), expected);
}

#[test]
fn compound_arithmetic_follows_precedence() {
    assert_eq!(eval("2+3*4").unwrap(), BigUint::from(14u32));
    assert_eq!(eval("(2+3)*4").unwrap(), BigUint::from(20u32));
    assert_eq!(eval("2^3^2").unwrap(), BigUint::from(512u32));
    assert_eq!(eval("100/7").unwrap(), BigUint::from(14u32));
}

// ---
// Rejection kinds
// ---

#[test]
fn oversized_power_is_refused_before_computation() {
    use std::time::Instant;
    let started = Instant::now();
    assert_eq!(kind_of("2^40000"), ErrorKind::SizeLimit);
    assert_eq!(kind_of("9999^9999"), ErrorKind::SizeLimit);
    // The guard must make these instantaneous; a second is generous.
    assert!(started.elapsed().as_secs() < 1);
}

#[test]
fn power_domain_violations_are_domain_errors() {
    assert_eq!(kind_of("7^-1"), ErrorKind::Domain);
    assert_eq!(kind_of("-7^2"), ErrorKind::Domain);
    assert_eq!(kind_of("0^5"), ErrorKind::Domain);
}

#[test]
fn division_by_zero_is_a_domain_error() {
    assert_eq!(kind_of("1/0"), ErrorKind::Domain);
}

#[test]
fn non_grammar_constructs_are_syntax_errors() {
    assert_eq!(kind_of("3.5"), ErrorKind::Syntax);
    assert_eq!(kind_of("abs(5)"), ErrorKind::Syntax);
    assert_eq!(kind_of("\"27\""), ErrorKind::Syntax);
    assert_eq!(kind_of("2==2"), ErrorKind::Syntax);
    assert_eq!(kind_of(""), ErrorKind::Syntax);
}

#[test]
fn zero_and_negative_results_are_rejected() {
    assert_eq!(kind_of("0"), ErrorKind::NonPositive);
    assert_eq!(kind_of("3-5"), ErrorKind::NonPositive);
    assert_eq!(kind_of("1-1"), ErrorKind::NonPositive);
}

#[test]
fn every_rejection_shares_one_user_message() {
    let first = eval("3.5").unwrap_err().user_message();
    for input in ["abs(5)", "7^-1", "2^40000", "0"] {
        assert_eq!(eval(input).unwrap_err().user_message(), first);
    }
}

// ---
// Budget configuration
// ---

#[test]
fn digit_budget_is_the_sharp_boundary() {
    let explorer = Explorer::new(Limits {
        digit_budget: 25,
        ..Limits::default()
    });
    // Estimate for 10^25 is exactly 25 digits: inside the budget.
    assert!(explorer.evaluate("10^25").is_ok());
    assert_eq!(
        explorer.evaluate("10^26").unwrap_err().kind(),
        ErrorKind::SizeLimit
    );
}

#[test]
fn evaluation_is_deterministic() {
    assert_eq!(eval("6*6+6").unwrap(), eval("6*6+6").unwrap());
    assert_eq!(kind_of("2^40000"), kind_of("2^40000"));
}
