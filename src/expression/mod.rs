//! Expression module: tokenizer, parser, evaluator and renderer

mod ast;
mod display;
mod errors;
mod eval;
mod lexer;
mod outcome;
mod parser;

pub use ast::Expression;
pub use errors::{ErrorKind, ExpressionError};
pub use eval::{MAX_FACTORIAL_ARGUMENT, RESULT_DECIMAL_PLACES, round_result};
pub use parser::{MAX_EXPRESSION_TOKENS, MAX_NESTING_DEPTH};
pub use outcome::{EvaluationOutcome, evaluate, evaluate_for_tier};

#[cfg(test)]
mod tests;
