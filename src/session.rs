//! Tally of one round of puzzles

use std::time::Duration;

use log::{info, warn};
use thiserror::Error;

use crate::checker::ValidationVerdict;
use crate::puzzle::{GameConfig, Puzzle};

/// Questions in one round
pub const TOTAL_PROBLEMS: usize = 10;

/// Points awarded per correct answer
pub const POINTS_PER_CORRECT: u32 = 10;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Round already holds all {0} answers")]
    RoundComplete(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Correct,
    Incorrect,
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub puzzle_id: u64,
    pub expression: Option<String>,
    pub status: AnswerStatus,
    pub time_taken: Duration,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    answers: Vec<AnswerRecord>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            answers: Vec::with_capacity(TOTAL_PROBLEMS),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// # Errors
    ///
    /// Returns `RoundComplete` once `TOTAL_PROBLEMS` answers are recorded.
    pub fn record_answer(
        &mut self,
        puzzle: &Puzzle,
        expression: &str,
        verdict: &ValidationVerdict,
        time_taken: Duration,
    ) -> Result<AnswerStatus, SessionError> {
        let status = if verdict.is_correct {
            AnswerStatus::Correct
        } else {
            AnswerStatus::Incorrect
        };
        self.push(AnswerRecord {
            puzzle_id: puzzle.id(),
            expression: Some(expression.to_string()),
            status,
            time_taken,
        })?;
        Ok(status)
    }

    /// # Errors
    ///
    /// Returns `RoundComplete` once `TOTAL_PROBLEMS` answers are recorded.
    pub fn record_skip(&mut self, puzzle: &Puzzle, time_taken: Duration) -> Result<(), SessionError> {
        self.push(AnswerRecord {
            puzzle_id: puzzle.id(),
            expression: None,
            status: AnswerStatus::Skipped,
            time_taken,
        })
    }

    fn push(&mut self, record: AnswerRecord) -> Result<(), SessionError> {
        if self.is_complete() {
            warn!("Dropping answer for puzzle #{}: round complete", record.puzzle_id);
            return Err(SessionError::RoundComplete(TOTAL_PROBLEMS));
        }
        info!(
            "Question {}/{}: puzzle #{} {:?}",
            self.answers.len() + 1,
            TOTAL_PROBLEMS,
            record.puzzle_id,
            record.status
        );
        self.answers.push(record);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() >= TOTAL_PROBLEMS
    }

    pub fn remaining(&self) -> usize {
        TOTAL_PROBLEMS.saturating_sub(self.answers.len())
    }

    pub fn correct_count(&self) -> usize {
        self.answers
            .iter()
            .filter(|a| a.status == AnswerStatus::Correct)
            .count()
    }

    pub fn score(&self) -> u32 {
        self.correct_count() as u32 * POINTS_PER_CORRECT
    }

    pub fn max_score(&self) -> u32 {
        self.answers.len() as u32 * POINTS_PER_CORRECT
    }

    /// Percentage of the full round answered correctly
    pub fn accuracy(&self) -> f64 {
        self.correct_count() as f64 / TOTAL_PROBLEMS as f64 * 100.0
    }

    pub fn total_time(&self) -> Duration {
        self.answers.iter().map(|a| a.time_taken).sum()
    }

    pub fn average_time(&self) -> Duration {
        match u32::try_from(self.answers.len()) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.total_time() / n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::check;
    use crate::digits::DigitMultiset;
    use crate::tier::OperatorTier;

    fn sample_puzzle(id: u64) -> Puzzle {
        let digits = DigitMultiset::new(vec![2, 3, 4, 5]).expect("valid digits");
        Puzzle::new(id, digits, 23, OperatorTier::Easy)
    }

    #[test]
    fn test_empty_session() {
        let session = Session::new(GameConfig::default());
        assert_eq!(session.score(), 0);
        assert_eq!(session.max_score(), 0);
        assert_eq!(session.accuracy(), 0.0);
        assert_eq!(session.average_time(), Duration::ZERO);
        assert_eq!(session.remaining(), TOTAL_PROBLEMS);
        assert!(!session.is_complete());
    }

    #[test]
    fn test_scoring_and_timing() {
        let mut session = Session::new(GameConfig::default());
        let puzzle = sample_puzzle(1);

        let right = check("2 × 4 + 3 × 5", &puzzle);
        let status = session.record_answer(&puzzle, "2 × 4 + 3 × 5", &right, Duration::from_secs(4));
        assert_eq!(status, Ok(AnswerStatus::Correct));

        let wrong = check("(2+3)*4+5", &puzzle);
        let status = session.record_answer(&puzzle, "(2+3)*4+5", &wrong, Duration::from_secs(6));
        assert_eq!(status, Ok(AnswerStatus::Incorrect));

        assert_eq!(session.record_skip(&puzzle, Duration::from_secs(2)), Ok(()));

        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.score(), 10);
        assert_eq!(session.max_score(), 30);
        assert_eq!(session.accuracy(), 10.0);
        assert_eq!(session.total_time(), Duration::from_secs(12));
        assert_eq!(session.average_time(), Duration::from_secs(4));
        assert_eq!(session.remaining(), 7);
        assert_eq!(session.answers()[2].expression, None);
    }

    #[test]
    fn test_round_closes_after_total_problems() {
        let mut session = Session::new(GameConfig::default());
        for id in 1..=TOTAL_PROBLEMS as u64 {
            assert!(session.record_skip(&sample_puzzle(id), Duration::from_secs(1)).is_ok());
        }
        assert!(session.is_complete());
        assert_eq!(
            session.record_skip(&sample_puzzle(11), Duration::from_secs(1)),
            Err(SessionError::RoundComplete(TOTAL_PROBLEMS))
        );
        assert_eq!(session.answers().len(), TOTAL_PROBLEMS);
    }
}
