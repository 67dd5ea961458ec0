// Search limits for puzzle generation
pub const MAX_ATTEMPTS: usize = 200;
pub const MAX_FACTORIAL_OPERAND: f64 = 7.0;
pub const MIN_POWER_EXPONENT: u8 = 2;
pub const MAX_POWER_EXPONENT: u8 = 3;
pub const MIN_OPERANDS: usize = 2;
pub const MAX_OPERANDS: usize = 3;
