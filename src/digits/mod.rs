//! Digit multisets and the exact-usage check

mod errors;
mod multiset;
mod usage;

pub use errors::DigitsError;
pub use multiset::{DigitCount, DigitMultiset, MAX_COPIES, MAX_ZEROS};
pub use usage::{extract_literals, validate_usage};
