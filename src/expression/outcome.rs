use log::debug;

use crate::expression::ast::Expression;
use crate::expression::errors::{ErrorKind, ExpressionError};
use crate::expression::eval::round_result;
use crate::tier::OperatorTier;

/// Result of evaluating raw expression text; failures are carried, never raised
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationOutcome {
    result: Result<f64, ExpressionError>,
}

impl EvaluationOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    /// Evaluated value rounded to five decimal places
    pub fn value(&self) -> Option<f64> {
        self.result.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&ExpressionError> {
        self.result.as_ref().err()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(ExpressionError::kind)
    }

    pub fn into_result(self) -> Result<f64, ExpressionError> {
        self.result
    }
}

impl From<Result<f64, ExpressionError>> for EvaluationOutcome {
    fn from(result: Result<f64, ExpressionError>) -> Self {
        Self { result }
    }
}

/// Parse and evaluate `input` with every operator available.
pub fn evaluate(input: &str) -> EvaluationOutcome {
    let result = Expression::parse(input)
        .and_then(|expr| expr.evaluate())
        .map(round_result);
    log_outcome(input, &result);
    result.into()
}

/// Parse and evaluate `input`, failing if it applies an operator outside `tier`.
pub fn evaluate_for_tier(input: &str, tier: OperatorTier) -> EvaluationOutcome {
    let result = Expression::parse(input)
        .and_then(|expr| {
            if let Some(operator) = expr.operators().into_iter().find(|op| !tier.allows(*op)) {
                return Err(ExpressionError::OperatorNotAllowed { operator, tier });
            }
            expr.evaluate()
        })
        .map(round_result);
    log_outcome(input, &result);
    result.into()
}

fn log_outcome(input: &str, result: &Result<f64, ExpressionError>) {
    match result {
        Ok(value) => debug!("'{}' evaluated to {}", input, value),
        Err(e) => debug!("'{}' failed to evaluate: {}", input, e),
    }
}
