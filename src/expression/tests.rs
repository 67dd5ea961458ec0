use crate::expression::ast::Expression;
use crate::expression::errors::{ErrorKind, ExpressionError};
use crate::expression::{MAX_NESTING_DEPTH, evaluate, evaluate_for_tier};
use crate::tier::{Operator, OperatorTier};

fn value_of(input: &str) -> f64 {
    let outcome = evaluate(input);
    assert!(outcome.succeeded(), "'{}' failed: {:?}", input, outcome.error());
    outcome.value().unwrap_or(f64::NAN)
}

fn kind_of(input: &str) -> Option<ErrorKind> {
    evaluate(input).error_kind()
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(value_of("(3 + 4) * 2"), 14.0);
    assert_eq!(value_of("3 + 4 * 2"), 11.0);
}

#[test]
fn test_power() {
    assert_eq!(value_of("2^3"), 8.0);
    assert_eq!(value_of("2**3"), 8.0);
    assert_eq!(value_of("2^3^2"), 512.0);
    assert_eq!(value_of("2 * 3^2"), 18.0);
}

#[test]
fn test_factorial() {
    assert_eq!(value_of("5!"), 120.0);
    assert_eq!(value_of("(1 + 2)!"), 6.0);
    assert_eq!(value_of("3!!"), 720.0);
    assert_eq!(value_of("0!"), 1.0);
}

#[test]
fn test_square_root() {
    assert_eq!(value_of("√(16)"), 4.0);
    assert_eq!(value_of("√16"), 4.0);
    assert_eq!(value_of("sqrt(9) + 1"), 4.0);
    assert_eq!(value_of("√4!"), round_five(24_f64.sqrt()));
    assert_eq!(value_of("√(9)^2"), 9.0);
}

fn round_five(value: f64) -> f64 {
    (value * 1e5).round() / 1e5
}

#[test]
fn test_summation() {
    assert_eq!(value_of("Σ(1,4)"), 10.0);
    assert_eq!(value_of("Σ ( 1 , 4 )"), 10.0);
    assert_eq!(value_of("Σ(i,1,4)"), 10.0);
    assert_eq!(value_of("Σ(n, 3, 3)"), 3.0);
    assert_eq!(value_of("2 * Σ(1, 2 + 2)"), 20.0);
}

#[test]
fn test_summation_invalid_range() {
    let outcome = evaluate("Σ(4,1)");
    assert!(!outcome.succeeded());
    assert_eq!(
        outcome.error(),
        Some(&ExpressionError::InvalidRange {
            lower: 4.0,
            upper: 1.0
        })
    );
    assert_eq!(outcome.error_kind(), Some(ErrorKind::Domain));
    assert_eq!(kind_of("Σ(1.5, 4)"), Some(ErrorKind::Domain));
    assert_eq!(kind_of("Σ(0 - 1, 4)"), Some(ErrorKind::Domain));
}

#[test]
fn test_summation_arity() {
    assert_eq!(
        evaluate("Σ(1, 2, 3)").error(),
        Some(&ExpressionError::SummationArity(3))
    );
    assert_eq!(
        evaluate("Σ(4)").error(),
        Some(&ExpressionError::SummationArity(1))
    );
}

#[test]
fn test_display_glyphs_normalized() {
    assert_eq!(value_of("6 × 7"), 42.0);
    assert_eq!(value_of("8 ÷ 2"), 4.0);
    assert_eq!(value_of("9 − 4"), 5.0);
}

#[test]
fn test_unary_minus() {
    assert_eq!(value_of("-3 + 5"), 2.0);
    assert_eq!(value_of("-2^2"), -4.0);
    assert_eq!(value_of("2^-1"), 0.5);
    assert_eq!(value_of("4 - -2"), 6.0);
}

#[test]
fn test_decimal_literals() {
    assert_eq!(value_of("1.5 * 4"), 6.0);
    assert_eq!(kind_of("1.2.3"), Some(ErrorKind::Parse));
}

#[test]
fn test_division_by_zero() {
    let outcome = evaluate("5/0");
    assert!(!outcome.succeeded());
    assert_eq!(outcome.value(), None);
    assert_eq!(outcome.error(), Some(&ExpressionError::DivisionByZero));
    assert_eq!(outcome.error_kind(), Some(ErrorKind::DivisionByZero));
}

#[test]
fn test_parse_errors() {
    assert_eq!(kind_of("(("), Some(ErrorKind::Parse));
    assert_eq!(
        evaluate("(3 + 4").error(),
        Some(&ExpressionError::UnbalancedParentheses)
    );
    assert_eq!(
        evaluate("3 + 4)").error(),
        Some(&ExpressionError::UnbalancedParentheses)
    );
    assert_eq!(evaluate("3 +").error(), Some(&ExpressionError::UnexpectedEnd));
    assert_eq!(evaluate("").error(), Some(&ExpressionError::EmptyExpression));
    assert_eq!(
        evaluate("3 $ 4").error(),
        Some(&ExpressionError::UnexpectedCharacter {
            ch: '$',
            position: 2
        })
    );
    assert_eq!(kind_of("2 3"), Some(ErrorKind::Parse));
    assert_eq!(kind_of("x + 1"), Some(ErrorKind::Parse));
}

#[test]
fn test_deep_nesting_is_a_parse_error() {
    let parens = format!("{}1{}", "(".repeat(5_000), ")".repeat(5_000));
    assert_eq!(kind_of(&parens), Some(ErrorKind::Parse));
    assert_eq!(kind_of(&format!("{}1", "-".repeat(5_000))), Some(ErrorKind::Parse));
    assert_eq!(kind_of(&format!("3{}", "!".repeat(5_000))), Some(ErrorKind::Parse));
    assert_eq!(kind_of(&"1 + ".repeat(5_000)), Some(ErrorKind::Parse));

    let minus = format!("{}1", "-".repeat(300));
    assert_eq!(
        evaluate(&minus).error(),
        Some(&ExpressionError::NestingTooDeep(MAX_NESTING_DEPTH))
    );
    let roots = format!("{}9", "√".repeat(300));
    assert_eq!(
        evaluate(&roots).error(),
        Some(&ExpressionError::NestingTooDeep(MAX_NESTING_DEPTH))
    );
    let long = format!("1{}", " + 1".repeat(300));
    assert_eq!(
        evaluate(&long).error(),
        Some(&ExpressionError::ExpressionTooLong(601))
    );
}

#[test]
fn test_moderate_nesting_still_evaluates() {
    let parens = format!("{}7{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(value_of(&parens), 7.0);
    assert_eq!(value_of(&format!("{}1", "-".repeat(100))), 1.0);
    assert_eq!(value_of(&format!("1{}", " + 1".repeat(200))), 201.0);
}

#[test]
fn test_domain_errors() {
    let outcome = evaluate("(-1)!");
    assert_eq!(outcome.error(), Some(&ExpressionError::FactorialDomain(-1.0)));
    assert_eq!(outcome.error_kind(), Some(ErrorKind::Domain));

    assert_eq!(
        evaluate("√(0 - 4)").error(),
        Some(&ExpressionError::NegativeSquareRoot(-4.0))
    );
    assert_eq!(
        evaluate("25!").error(),
        Some(&ExpressionError::FactorialTooLarge(25.0))
    );
    assert_eq!(kind_of("(5/2)!"), Some(ErrorKind::Domain));
    assert_eq!(kind_of("(0-8)^(1/3)"), Some(ErrorKind::Domain));
}

#[test]
fn test_non_finite_result() {
    assert_eq!(
        evaluate("9^9^9").error_kind(),
        Some(ErrorKind::NonFiniteResult)
    );
}

#[test]
fn test_result_rounded_to_five_places() {
    assert_eq!(value_of("1/3"), 0.33333);
    assert_eq!(value_of("0.1 + 0.2"), 0.3);
}

#[test]
fn test_evaluation_is_repeatable() {
    let first = evaluate("√(2) * 7 / 3");
    let second = evaluate("√(2) * 7 / 3");
    assert_eq!(first, second);
}

#[test]
fn test_tier_restricts_operators() {
    let outcome = evaluate_for_tier("√(16) + 1", OperatorTier::Easy);
    assert_eq!(
        outcome.error(),
        Some(&ExpressionError::OperatorNotAllowed {
            operator: Operator::SquareRoot,
            tier: OperatorTier::Easy
        })
    );
    assert_eq!(
        evaluate_for_tier("√(16) + 1", OperatorTier::Medium).value(),
        Some(5.0)
    );
    assert!(!evaluate_for_tier("3!", OperatorTier::Medium).succeeded());
    assert!(evaluate_for_tier("3! - Σ(1,2)", OperatorTier::Hard).succeeded());
    assert!(evaluate_for_tier("-3 + 2^2", OperatorTier::Easy).succeeded());
}

#[test]
fn test_literals_in_order() {
    let expr = Expression::parse("(2+3)*4+5");
    assert!(expr.is_ok());
    if let Ok(expr) = expr {
        assert_eq!(expr.literals(), vec![2.0, 3.0, 4.0, 5.0]);
    }
}

#[test]
fn test_display_round_trips_through_parser() {
    let inputs = [
        "(3 + 4) * 2",
        "2 - (3 - 4)",
        "8 / (4 / 2)",
        "(2 + 3)!",
        "√(2 + 7)",
        "(√9)!",
        "-(2^2)",
        "(-2)^2",
        "2^3^2",
        "(2^3)^2",
        "Σ(i, 1, 4) × 2",
    ];
    for input in inputs {
        let parsed = Expression::parse(input);
        assert!(parsed.is_ok(), "failed to parse {}", input);
        if let Ok(expr) = parsed {
            let rendered = expr.to_string();
            let reparsed = Expression::parse(&rendered);
            assert_eq!(reparsed.as_ref(), Ok(&expr), "{} rendered as {}", input, rendered);
        }
    }
}

#[test]
fn test_display_uses_keyboard_glyphs() {
    let expr = Expression::mul(
        Expression::sub(Expression::number(7), Expression::number(2)),
        Expression::sqrt(Expression::number(9)),
    );
    assert_eq!(expr.to_string(), "(7 − 2) × √9");
}
