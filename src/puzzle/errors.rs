use thiserror::Error;

use crate::digits::DigitsError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PuzzleError {
    #[error("Unknown tier '{0}', expected 1-3 or easy/medium/hard")]
    UnknownTier(String),
    #[error("Target width must be 2 or 3 digits, got {0}")]
    UnsupportedTargetWidth(usize),
    #[error("Digit error: {0}")]
    Digits(#[from] DigitsError),
}
