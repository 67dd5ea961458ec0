use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::digits::DigitMultiset;
use crate::expression::{Expression, round_result};
use crate::puzzle::builder::CandidateBuilder;
use crate::puzzle::config::{GameConfig, TargetWidth};
use crate::puzzle::constants::MAX_ATTEMPTS;
use crate::tier::{Operator, OperatorTier};

/// Where a puzzle's target came from
#[derive(Debug, Clone, PartialEq)]
pub enum TargetOrigin {
    /// Found by search; the expression that reaches it is kept
    Searched(Expression),
    /// Search budget ran out; the target is not known to be reachable
    Fallback,
    /// Built by the caller from known digits and target
    Supplied,
}

/// One question: digits to use, target to reach, operators allowed
#[derive(Debug, Clone, PartialEq)]
pub struct Puzzle {
    id: u64,
    digits: DigitMultiset,
    target: u32,
    tier: OperatorTier,
    origin: TargetOrigin,
}

impl Puzzle {
    pub fn new(id: u64, digits: DigitMultiset, target: u32, tier: OperatorTier) -> Self {
        Self {
            id,
            digits,
            target,
            tier,
            origin: TargetOrigin::Supplied,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn digits(&self) -> &DigitMultiset {
        &self.digits
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn tier(&self) -> OperatorTier {
        self.tier
    }

    pub fn origin(&self) -> &TargetOrigin {
        &self.origin
    }

    /// Operators offered for this puzzle, in keyboard order
    pub fn operators(&self) -> &'static [Operator] {
        self.tier.operators()
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "#{} digits [{}] target {} using",
            self.id, self.digits, self.target
        )?;
        for op in self.operators() {
            write!(f, " {}", op)?;
        }
        Ok(())
    }
}

/// Shared, monotonically increasing puzzle id source starting at 1.
///
/// Clones share the same counter.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: Arc<AtomicU64>,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Randomized search for targets reachable from freshly drawn digits
pub struct PuzzleGenerator<R = SmallRng> {
    rng: R,
    ids: IdSequence,
    max_attempts: usize,
}

impl PuzzleGenerator<SmallRng> {
    /// Create a generator seeded from the thread-local entropy source
    pub fn new() -> Self {
        let mut seed_rng = rand::rng();
        Self::with_rng(SmallRng::from_rng(&mut seed_rng), IdSequence::new())
    }

    /// Create a reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed), IdSequence::new())
    }
}

impl Default for PuzzleGenerator<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PuzzleGenerator<R> {
    pub fn with_rng(rng: R, ids: IdSequence) -> Self {
        Self {
            rng,
            ids,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Cap the number of search attempts per puzzle (default `MAX_ATTEMPTS`).
    /// Zero skips the search and always uses the fallback target.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn ids(&self) -> &IdSequence {
        &self.ids
    }

    /// Generate a puzzle for `config`.
    ///
    /// Tries up to `max_attempts` random candidates; when none lands on an integer
    /// of the requested width the target is drawn uniformly from that width instead.
    pub fn generate(&mut self, config: &GameConfig) -> Puzzle {
        let builder = CandidateBuilder::new(config.tier);

        for attempt in 1..=self.max_attempts {
            let digits = DigitMultiset::generate(config.digit_count, &mut self.rng);
            let Some(candidate) = builder.build(&digits, &mut self.rng) else {
                continue;
            };

            let value = match candidate.evaluate() {
                Ok(value) => round_result(value),
                Err(e) => {
                    debug!("Attempt {}: {} failed: {}", attempt, candidate, e);
                    continue;
                }
            };

            if let Some(target) = accept_target(value, config.target_width)
                && !candidate.literals().is_empty()
            {
                let id = self.ids.next_id();
                info!(
                    "Puzzle #{}: target {} from {} after {} attempts",
                    id, target, candidate, attempt
                );
                return Puzzle {
                    id,
                    digits,
                    target,
                    tier: config.tier,
                    origin: TargetOrigin::Searched(candidate),
                };
            }
            debug!("Attempt {}: {} = {} rejected", attempt, candidate, value);
        }

        let digits = DigitMultiset::generate(config.digit_count, &mut self.rng);
        let target = self.rng.random_range(config.target_width.range());
        let id = self.ids.next_id();
        warn!(
            "Puzzle #{}: no target found in {} attempts, using unverified target {}",
            id, self.max_attempts, target
        );
        Puzzle {
            id,
            digits,
            target,
            tier: config.tier,
            origin: TargetOrigin::Fallback,
        }
    }
}

/// Accept `value` as a target only if it is an exact integer of the requested
/// width; the width ranges start at 10 and 100, so no accepted target has a
/// leading zero.
pub(crate) fn accept_target(value: f64, width: TargetWidth) -> Option<u32> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return None;
    }
    let candidate = value as u32;
    width.range().contains(&candidate).then_some(candidate)
}
