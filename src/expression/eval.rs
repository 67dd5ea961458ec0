use log::debug;

use crate::expression::ast::Expression;
use crate::expression::errors::ExpressionError;

/// Largest factorial argument computed exactly
pub const MAX_FACTORIAL_ARGUMENT: u64 = 20;

/// Decimal places kept in a reported result
pub const RESULT_DECIMAL_PLACES: i32 = 5;

fn near_zero(value: f64) -> bool {
    value.abs() < f64::EPSILON
}

/// Finite and within `f64::EPSILON` of an integer
fn is_whole(value: f64) -> bool {
    value.is_finite() && (value - value.round()).abs() < f64::EPSILON
}

/// Round to `RESULT_DECIMAL_PLACES` to drop floating-point noise
pub fn round_result(value: f64) -> f64 {
    let scale = 10_f64.powi(RESULT_DECIMAL_PLACES);
    let scaled = value * scale;
    if !scaled.is_finite() || scaled.abs() > 2_f64.powi(52) {
        return value;
    }
    scaled.round() / scale
}

fn factorial(n: f64) -> Result<f64, ExpressionError> {
    if n < 0.0 || !is_whole(n) {
        debug!("Factorial outside domain: {}", n);
        return Err(ExpressionError::FactorialDomain(n));
    }
    if n > MAX_FACTORIAL_ARGUMENT as f64 {
        debug!("Factorial argument too large: {}", n);
        return Err(ExpressionError::FactorialTooLarge(n));
    }

    let product: u64 = (1..=n.round() as u64).product();
    Ok(product as f64)
}

fn natural_bound(value: f64) -> Option<u64> {
    if value >= 0.0 && is_whole(value) && value <= u32::MAX as f64 {
        Some(value.round() as u64)
    } else {
        None
    }
}

fn sum_range(lower: f64, upper: f64) -> Result<f64, ExpressionError> {
    let invalid = ExpressionError::InvalidRange { lower, upper };
    let (lo, hi) = match (natural_bound(lower), natural_bound(upper)) {
        (Some(lo), Some(hi)) if lo <= hi => (lo, hi),
        _ => {
            debug!("Invalid summation bounds: {}..={}", lower, upper);
            return Err(invalid);
        }
    };

    // Gauss closed form; (lo + hi) * count is always even.
    let count = hi - lo + 1;
    let total = (lo + hi)
        .checked_mul(count)
        .map(|doubled| doubled / 2)
        .ok_or(ExpressionError::NonFiniteResult)?;
    Ok(total as f64)
}

fn binary(
    left: &Expression,
    right: &Expression,
    apply: impl FnOnce(f64, f64) -> Result<f64, ExpressionError>,
) -> Result<f64, ExpressionError> {
    apply(left.evaluate()?, right.evaluate()?)
}

fn divide(dividend: f64, divisor: f64) -> Result<f64, ExpressionError> {
    if near_zero(divisor) {
        debug!("Division of {} by zero", dividend);
        return Err(ExpressionError::DivisionByZero);
    }
    Ok(dividend / divisor)
}

fn power(base: f64, exponent: f64) -> Result<f64, ExpressionError> {
    if base < 0.0 && !is_whole(exponent) {
        debug!("{}^{} has no real value", base, exponent);
        return Err(ExpressionError::ComplexResult);
    }
    if near_zero(base) && exponent < 0.0 {
        debug!("Zero raised to negative power {}", exponent);
        return Err(ExpressionError::DivisionByZero);
    }
    Ok(base.powf(exponent))
}

impl Expression {
    /// # Errors
    ///
    /// Returns an error when attempting:
    /// - Division by zero
    /// - Factorial of a negative, fractional or too-large argument
    /// - Square root of a negative number
    /// - Raising a negative base to a fractional exponent (complex result)
    /// - A summation whose bounds are not naturals with lower <= upper
    /// - Any step that overflows to infinity or NaN
    pub fn evaluate(&self) -> Result<f64, ExpressionError> {
        let result = match self {
            Expression::Number(n) => Ok(*n),
            Expression::Add(l, r) => binary(l, r, |a, b| Ok(a + b)),
            Expression::Sub(l, r) => binary(l, r, |a, b| Ok(a - b)),
            Expression::Mul(l, r) => binary(l, r, |a, b| Ok(a * b)),
            Expression::Div(l, r) => binary(l, r, divide),
            Expression::Pow(l, r) => binary(l, r, power),
            Expression::Neg(e) => e.evaluate().map(|v| -v),
            Expression::Factorial(e) => factorial(e.evaluate()?),
            Expression::Sqrt(e) => {
                let val = e.evaluate()?;
                if val < 0.0 {
                    debug!("Square root of negative number: {}", val);
                    Err(ExpressionError::NegativeSquareRoot(val))
                } else {
                    Ok(val.sqrt())
                }
            }
            Expression::SumRange(lower, upper) => sum_range(lower.evaluate()?, upper.evaluate()?),
        };

        match result {
            Ok(value) if !value.is_finite() => {
                debug!("Non-finite intermediate result in {}", self);
                Err(ExpressionError::NonFiniteResult)
            }
            other => other,
        }
    }
}
