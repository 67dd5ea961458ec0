//! IQ180 - A constrained-arithmetic digit puzzle engine
//!
//! This library generates puzzles (a handful of digits plus a target number that
//! some combination of them reaches) and grades player expressions that must use
//! exactly those digits under a tiered operator vocabulary.

pub mod checker;
pub mod digits;
pub mod expression;
pub mod puzzle;
pub mod session;
pub mod tier;

// Re-export the main public API
pub use checker::{ValidationVerdict, check};
pub use digits::{DigitCount, DigitMultiset, DigitsError, validate_usage};
pub use expression::{EvaluationOutcome, Expression, ExpressionError, evaluate};
pub use puzzle::{GameConfig, Puzzle, PuzzleError, PuzzleGenerator, TargetWidth};
pub use session::Session;
pub use tier::{Operator, OperatorTier};

/// Generate one puzzle from raw front-end settings
///
/// This is a convenience function that creates an entropy-seeded generator and
/// draws a single puzzle from it.
///
/// # Arguments
///
/// * `tier` - The operator vocabulary the puzzle is solved with
/// * `digit_count` - How many digits to hand out (4 or 5)
/// * `target_width` - Decimal width of the target (2 or 3)
///
/// # Errors
///
/// This function will return an error if:
/// * The digit count is not 4 or 5
/// * The target width is not 2 or 3
///
/// # Examples
///
/// ```
/// use iq180::{OperatorTier, generate_puzzle};
///
/// let puzzle = generate_puzzle(OperatorTier::Easy, 4, 2).expect("valid settings");
/// assert_eq!(puzzle.digits().len(), 4);
/// assert!((10..=99).contains(&puzzle.target()));
/// ```
pub fn generate_puzzle(
    tier: OperatorTier,
    digit_count: usize,
    target_width: usize,
) -> Result<Puzzle, PuzzleError> {
    let config = GameConfig::from_raw(tier, digit_count, target_width)?;
    let mut generator = PuzzleGenerator::new();
    Ok(generator.generate(&config))
}
