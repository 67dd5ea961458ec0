use log::{debug, info};

use crate::digits::validate_usage;
use crate::expression::{ExpressionError, evaluate_for_tier};
use crate::puzzle::Puzzle;

/// Largest absolute difference from the target still graded correct (exclusive)
pub const ANSWER_TOLERANCE: f64 = 0.0001;

/// Grade of one submitted expression
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationVerdict {
    pub numbers_match: bool,
    pub is_correct: bool,
    /// Present whenever evaluation succeeded, right or wrong
    pub evaluated_result: Option<f64>,
    /// Why evaluation failed, when it was attempted and did
    pub failure: Option<ExpressionError>,
}

impl ValidationVerdict {
    fn rejected() -> Self {
        Self {
            numbers_match: false,
            is_correct: false,
            evaluated_result: None,
            failure: None,
        }
    }
}

pub fn is_within_tolerance(result: f64, target: f64) -> bool {
    (result - target).abs() < ANSWER_TOLERANCE
}

/// Grade `expr` against `puzzle`: digits first, then value under the puzzle's tier.
pub fn check(expr: &str, puzzle: &Puzzle) -> ValidationVerdict {
    if expr.trim().is_empty() {
        debug!("Puzzle #{}: empty submission", puzzle.id());
        return ValidationVerdict::rejected();
    }

    if !validate_usage(expr, puzzle.digits()) {
        info!(
            "Puzzle #{}: '{}' does not use digits [{}] exactly",
            puzzle.id(),
            expr,
            puzzle.digits()
        );
        return ValidationVerdict::rejected();
    }

    let outcome = evaluate_for_tier(expr, puzzle.tier());
    let verdict = match outcome.into_result() {
        Ok(value) => ValidationVerdict {
            numbers_match: true,
            is_correct: is_within_tolerance(value, f64::from(puzzle.target())),
            evaluated_result: Some(value),
            failure: None,
        },
        Err(e) => ValidationVerdict {
            numbers_match: true,
            is_correct: false,
            evaluated_result: None,
            failure: Some(e),
        },
    };

    info!(
        "Puzzle #{}: '{}' -> {:?} (target {}, correct: {})",
        puzzle.id(),
        expr,
        verdict.evaluated_result,
        puzzle.target(),
        verdict.is_correct
    );
    verdict
}
