use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::digits::errors::DigitsError;

/// At most this many zeros per puzzle
pub const MAX_ZEROS: usize = 1;

/// At most this many copies of any digit per puzzle
pub const MAX_COPIES: usize = 2;

/// How many digits a puzzle hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigitCount {
    Four,
    Five,
}

impl DigitCount {
    pub fn value(self) -> usize {
        match self {
            DigitCount::Four => 4,
            DigitCount::Five => 5,
        }
    }
}

impl TryFrom<usize> for DigitCount {
    type Error = DigitsError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(DigitCount::Four),
            5 => Ok(DigitCount::Five),
            other => Err(DigitsError::UnsupportedCount(other)),
        }
    }
}

/// The digits a puzzle must be solved with, duplicates included.
///
/// Order is presentation only; comparisons elsewhere go through counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitMultiset {
    digits: Vec<u8>,
}

impl DigitMultiset {
    /// # Errors
    ///
    /// Returns an error if the length is not 4 or 5, a value is above 9,
    /// zero repeats, or any digit appears more than twice.
    pub fn new(digits: Vec<u8>) -> Result<Self, DigitsError> {
        DigitCount::try_from(digits.len())?;

        let mut counts = [0usize; 10];
        for &d in &digits {
            let slot = counts
                .get_mut(usize::from(d))
                .ok_or_else(|| DigitsError::InvalidDigit(d.to_string()))?;
            *slot += 1;
        }
        if counts[0] > MAX_ZEROS {
            return Err(DigitsError::TooManyZeros);
        }
        if let Some(d) = (0u8..10).find(|&d| counts[usize::from(d)] > MAX_COPIES) {
            return Err(DigitsError::TooManyCopies(d));
        }

        Ok(Self { digits })
    }

    /// Draw `count` digits uniformly from 0-9, rejecting a draw that would add a
    /// second zero or a third copy, then shuffle for display.
    pub fn generate<R: Rng + ?Sized>(count: DigitCount, rng: &mut R) -> Self {
        let mut digits = Vec::with_capacity(count.value());
        let mut counts = [0usize; 10];

        while digits.len() < count.value() {
            let draw: u8 = rng.random_range(0..10);
            let seen = counts[usize::from(draw)];
            if (draw == 0 && seen >= MAX_ZEROS) || seen >= MAX_COPIES {
                debug!("Rejected draw {} (already {} present)", draw, seen);
                continue;
            }
            counts[usize::from(draw)] += 1;
            digits.push(draw);
        }

        digits.shuffle(rng);
        debug!("Generated digits {:?}", digits);
        Self { digits }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Occurrences of each value 0-9
    pub fn counts(&self) -> [usize; 10] {
        let mut counts = [0usize; 10];
        for &d in &self.digits {
            counts[usize::from(d)] += 1;
        }
        counts
    }
}

impl fmt::Display for DigitMultiset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, d) in self.digits.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

impl FromStr for DigitMultiset {
    type Err = DigitsError;

    /// Accepts `2345`, `2,3,4,5` or `2 3 4 5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut digits = Vec::new();
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != ',') {
            match c.to_digit(10) {
                Some(d) => digits.push(d as u8),
                None => {
                    warn!("Digit string contains non-digit character: '{}'", c);
                    return Err(DigitsError::InvalidDigit(c.to_string()));
                }
            }
        }
        DigitMultiset::new(digits)
    }
}
