pub mod constants;
mod builder;
mod config;
mod core;
mod errors;

pub use config::{GameConfig, TargetWidth};
pub use self::core::{IdSequence, Puzzle, PuzzleGenerator, TargetOrigin};
pub use errors::PuzzleError;
