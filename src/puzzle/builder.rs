use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::digits::DigitMultiset;
use crate::expression::Expression;
use crate::puzzle::constants::{
    MAX_FACTORIAL_OPERAND, MAX_OPERANDS, MAX_POWER_EXPONENT, MIN_OPERANDS, MIN_POWER_EXPONENT,
};
use crate::tier::{Operator, OperatorTier};

const PLAIN_BINARY: [Operator; 4] = [
    Operator::Add,
    Operator::Subtract,
    Operator::Multiply,
    Operator::Divide,
];

/// Builds random right-leaning candidate expressions from a digit multiset
pub struct CandidateBuilder {
    pool: Vec<Operator>,
}

impl CandidateBuilder {
    pub fn new(tier: OperatorTier) -> Self {
        // Summation never seeds a target; it has no digit-folding form.
        let pool = tier
            .operators()
            .iter()
            .copied()
            .filter(|op| *op != Operator::Summation)
            .collect();
        Self { pool }
    }

    /// Fold two or three randomly chosen digits with random operators.
    ///
    /// Returns `None` when the attempt is abandoned (a factorial operand outside 0-7).
    pub fn build<R: Rng + ?Sized>(&self, digits: &DigitMultiset, rng: &mut R) -> Option<Expression> {
        let mut chosen = digits.as_slice().to_vec();
        chosen.shuffle(rng);
        let take = rng.random_range(MIN_OPERANDS..=MAX_OPERANDS).min(chosen.len());
        chosen.truncate(take);

        let (&first, rest) = chosen.split_first()?;
        if rest.is_empty() {
            return None;
        }

        let mut acc = Expression::number(first);
        for (i, &digit) in rest.iter().enumerate() {
            let is_last = i + 1 == rest.len();
            let op = *self.pool.choose(rng)?;

            acc = match op {
                Operator::Factorial | Operator::SquareRoot => {
                    if is_last && rng.random_bool(0.5) {
                        let operand = Expression::number(digit);
                        if !unary_operand_ok(op, &operand) {
                            debug!("Abandoning candidate: {}{} out of range", digit, op);
                            return None;
                        }
                        let joiner = *PLAIN_BINARY.choose(rng)?;
                        fold(joiner, acc, apply_unary(op, operand))
                    } else {
                        if !unary_operand_ok(op, &acc) {
                            debug!("Abandoning candidate: ({}){} out of range", acc, op);
                            return None;
                        }
                        let joiner = *PLAIN_BINARY.choose(rng)?;
                        fold(joiner, apply_unary(op, acc), Expression::number(digit))
                    }
                }
                binary => fold(binary, acc, Expression::number(digit)),
            };
        }

        debug!("Built candidate {}", acc);
        Some(acc)
    }
}

fn unary_operand_ok(op: Operator, operand: &Expression) -> bool {
    let Ok(value) = operand.evaluate() else {
        return false;
    };
    match op {
        Operator::Factorial => {
            (0.0..=MAX_FACTORIAL_OPERAND).contains(&value) && value.fract() == 0.0
        }
        Operator::SquareRoot => value >= 0.0,
        _ => true,
    }
}

fn apply_unary(op: Operator, operand: Expression) -> Expression {
    match op {
        Operator::Factorial => Expression::factorial(operand),
        _ => Expression::sqrt(operand),
    }
}

fn fold(op: Operator, left: Expression, right: Expression) -> Expression {
    match op {
        Operator::Add => Expression::add(left, right),
        Operator::Subtract => Expression::sub(left, right),
        Operator::Multiply => Expression::mul(left, right),
        Operator::Divide => Expression::div(left, right),
        _ => Expression::pow(left, clamp_exponent(right)),
    }
}

// Exponents stay in {2, 3} so targets stay in a reachable range.
fn clamp_exponent(exponent: Expression) -> Expression {
    match exponent {
        Expression::Number(n) => Expression::Number(
            n.clamp(f64::from(MIN_POWER_EXPONENT), f64::from(MAX_POWER_EXPONENT)),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_easy_candidates_use_only_easy_operators() {
        let builder = CandidateBuilder::new(OperatorTier::Easy);
        let digits = DigitMultiset::new(vec![1, 2, 3, 4]).expect("valid digits");
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            if let Some(expr) = builder.build(&digits, &mut rng) {
                assert!(
                    expr.operators()
                        .iter()
                        .all(|op| OperatorTier::Easy.allows(*op))
                );
            }
        }
    }

    #[test]
    fn test_candidates_use_two_or_three_digits() {
        let builder = CandidateBuilder::new(OperatorTier::Hard);
        let digits = DigitMultiset::new(vec![5, 6, 7, 8, 9]).expect("valid digits");
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..100 {
            if let Some(expr) = builder.build(&digits, &mut rng) {
                let literals = expr.literals();
                assert!((2..=3).contains(&literals.len()), "{}", expr);
                assert!(expr.operators().iter().all(|op| *op != Operator::Summation));
            }
        }
    }

    #[test]
    fn test_power_exponent_is_clamped() {
        let expr = fold(Operator::Power, Expression::number(4), Expression::number(9));
        assert_eq!(expr.evaluate(), Ok(64.0));
        let expr = fold(Operator::Power, Expression::number(4), Expression::number(0));
        assert_eq!(expr.evaluate(), Ok(16.0));
    }

    #[test]
    fn test_factorial_operand_limits() {
        assert!(unary_operand_ok(Operator::Factorial, &Expression::number(7)));
        assert!(!unary_operand_ok(Operator::Factorial, &Expression::number(8)));
        assert!(!unary_operand_ok(
            Operator::Factorial,
            &Expression::sub(Expression::number(1), Expression::number(2))
        ));
        assert!(!unary_operand_ok(
            Operator::Factorial,
            &Expression::div(Expression::number(3), Expression::number(2))
        ));
    }
}
