use thiserror::Error;

use crate::tier::{Operator, OperatorTier};

/// Coarse classification of evaluation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Domain,
    DivisionByZero,
    NonFiniteResult,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Expression is empty")]
    EmptyExpression,
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },
    #[error("Malformed number '{0}'")]
    InvalidNumber(String),
    #[error("Unexpected token '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("Expression nests deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("Expression has {0} tokens, more than the supported maximum")]
    ExpressionTooLong(usize),
    #[error("Summation takes (lower, upper) or (placeholder, lower, upper), got {0} arguments")]
    SummationArity(usize),
    #[error("Operator '{operator}' is not available at tier {tier}")]
    OperatorNotAllowed {
        operator: Operator,
        tier: OperatorTier,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Factorial is only defined for non-negative integers, got {0}")]
    FactorialDomain(f64),
    #[error("Factorial argument {0} exceeds the supported maximum")]
    FactorialTooLarge(f64),
    #[error("Square root of negative number {0}")]
    NegativeSquareRoot(f64),
    #[error("Complex result from negative base with fractional exponent")]
    ComplexResult,
    #[error("Invalid summation range: {lower}..={upper}")]
    InvalidRange { lower: f64, upper: f64 },
    #[error("Result is not a finite number")]
    NonFiniteResult,
}

impl ExpressionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExpressionError::EmptyExpression
            | ExpressionError::UnexpectedCharacter { .. }
            | ExpressionError::InvalidNumber(_)
            | ExpressionError::UnexpectedToken { .. }
            | ExpressionError::UnexpectedEnd
            | ExpressionError::UnbalancedParentheses
            | ExpressionError::NestingTooDeep(_)
            | ExpressionError::ExpressionTooLong(_)
            | ExpressionError::SummationArity(_)
            | ExpressionError::OperatorNotAllowed { .. } => ErrorKind::Parse,
            ExpressionError::FactorialDomain(_)
            | ExpressionError::FactorialTooLarge(_)
            | ExpressionError::NegativeSquareRoot(_)
            | ExpressionError::ComplexResult
            | ExpressionError::InvalidRange { .. } => ErrorKind::Domain,
            ExpressionError::DivisionByZero => ErrorKind::DivisionByZero,
            ExpressionError::NonFiniteResult => ErrorKind::NonFiniteResult,
        }
    }
}
