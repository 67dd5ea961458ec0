//! Operator vocabularies unlocked at each difficulty tier

use std::fmt;
use std::str::FromStr;

use crate::puzzle::PuzzleError;

/// An operator a player may use in an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    SquareRoot,
    Factorial,
    Summation,
}

impl Operator {
    /// Glyph shown on the puzzle keyboard
    pub fn glyph(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::Power => "^",
            Operator::SquareRoot => "√",
            Operator::Factorial => "!",
            Operator::Summation => "Σ",
        }
    }

    /// ASCII spelling accepted by the lexer where one exists
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
            Operator::SquareRoot => "sqrt",
            Operator::Factorial => "!",
            Operator::Summation => "Σ",
        }
    }

    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Operator::Add
                | Operator::Subtract
                | Operator::Multiply
                | Operator::Divide
                | Operator::Power
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

const TIER_ONE: &[Operator] = &[
    Operator::Add,
    Operator::Subtract,
    Operator::Multiply,
    Operator::Divide,
    Operator::Power,
];

const TIER_TWO: &[Operator] = &[
    Operator::Add,
    Operator::Subtract,
    Operator::Multiply,
    Operator::Divide,
    Operator::Power,
    Operator::SquareRoot,
];

const TIER_THREE: &[Operator] = &[
    Operator::Add,
    Operator::Subtract,
    Operator::Multiply,
    Operator::Divide,
    Operator::Power,
    Operator::SquareRoot,
    Operator::Factorial,
    Operator::Summation,
];

/// Difficulty tier; each tier strictly extends the one below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperatorTier {
    Easy,
    Medium,
    Hard,
}

impl OperatorTier {
    pub const ALL: [OperatorTier; 3] = [OperatorTier::Easy, OperatorTier::Medium, OperatorTier::Hard];

    pub fn operators(self) -> &'static [Operator] {
        match self {
            OperatorTier::Easy => TIER_ONE,
            OperatorTier::Medium => TIER_TWO,
            OperatorTier::Hard => TIER_THREE,
        }
    }

    pub fn allows(self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }

    pub fn level(self) -> u8 {
        match self {
            OperatorTier::Easy => 1,
            OperatorTier::Medium => 2,
            OperatorTier::Hard => 3,
        }
    }
}

impl fmt::Display for OperatorTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

impl FromStr for OperatorTier {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "easy" => Ok(OperatorTier::Easy),
            "2" | "medium" => Ok(OperatorTier::Medium),
            "3" | "hard" => Ok(OperatorTier::Hard),
            other => Err(PuzzleError::UnknownTier(other.to_string())),
        }
    }
}
