mod core;

pub use self::core::{ANSWER_TOLERANCE, ValidationVerdict, check, is_within_tolerance};
