use std::ops::RangeInclusive;

use crate::digits::DigitCount;
use crate::puzzle::errors::PuzzleError;
use crate::tier::OperatorTier;

/// Number of decimal digits in a puzzle target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetWidth {
    Two,
    Three,
}

impl TargetWidth {
    /// Targets of this width; the lower bound excludes leading zeros
    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            TargetWidth::Two => 10..=99,
            TargetWidth::Three => 100..=999,
        }
    }

    pub fn value(self) -> usize {
        match self {
            TargetWidth::Two => 2,
            TargetWidth::Three => 3,
        }
    }
}

impl TryFrom<usize> for TargetWidth {
    type Error = PuzzleError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(TargetWidth::Two),
            3 => Ok(TargetWidth::Three),
            other => Err(PuzzleError::UnsupportedTargetWidth(other)),
        }
    }
}

/// Caller-selected settings for one round of puzzles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub tier: OperatorTier,
    pub digit_count: DigitCount,
    pub target_width: TargetWidth,
}

impl GameConfig {
    pub fn new(tier: OperatorTier, digit_count: DigitCount, target_width: TargetWidth) -> Self {
        Self {
            tier,
            digit_count,
            target_width,
        }
    }

    /// Build from raw numbers as they arrive from a front end.
    ///
    /// # Errors
    ///
    /// Returns an error if the digit count is not 4 or 5 or the width not 2 or 3.
    pub fn from_raw(
        tier: OperatorTier,
        digit_count: usize,
        target_width: usize,
    ) -> Result<Self, PuzzleError> {
        Ok(Self::new(
            tier,
            DigitCount::try_from(digit_count)?,
            TargetWidth::try_from(target_width)?,
        ))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(OperatorTier::Easy, DigitCount::Four, TargetWidth::Two)
    }
}
