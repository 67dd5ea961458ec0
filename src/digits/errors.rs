use thiserror::Error;

/// Errors raised when building a digit multiset from caller input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DigitsError {
    #[error("Digit set must hold 4 or 5 digits, got {0}")]
    UnsupportedCount(usize),
    #[error("Not a single decimal digit: {0}")]
    InvalidDigit(String),
    #[error("Digit set may contain at most one zero")]
    TooManyZeros,
    #[error("Digit {0} appears more than twice")]
    TooManyCopies(u8),
}
