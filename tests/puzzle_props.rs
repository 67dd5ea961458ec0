use iq180::digits::{DigitCount, DigitMultiset};
use iq180::puzzle::{GameConfig, PuzzleGenerator, TargetWidth};
use iq180::tier::OperatorTier;
use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};

fn tier_strategy() -> impl Strategy<Value = OperatorTier> {
    prop_oneof![
        Just(OperatorTier::Easy),
        Just(OperatorTier::Medium),
        Just(OperatorTier::Hard),
    ]
}

fn count_strategy() -> impl Strategy<Value = DigitCount> {
    prop_oneof![Just(DigitCount::Four), Just(DigitCount::Five)]
}

fn width_strategy() -> impl Strategy<Value = TargetWidth> {
    prop_oneof![Just(TargetWidth::Two), Just(TargetWidth::Three)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_digits_respect_limits(seed in any::<u64>(), count in count_strategy()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let digits = DigitMultiset::generate(count, &mut rng);
        let counts = digits.counts();
        prop_assert!(digits.len() == 4 || digits.len() == 5);
        prop_assert_eq!(digits.len(), count.value());
        prop_assert!(counts[0] <= 1);
        prop_assert!(counts.iter().all(|&c| c <= 2));
        prop_assert!(digits.as_slice().iter().all(|&d| d <= 9));
    }

    #[test]
    fn generated_targets_have_requested_width(
        seed in any::<u64>(),
        tier in tier_strategy(),
        count in count_strategy(),
        width in width_strategy(),
    ) {
        let config = GameConfig::new(tier, count, width);
        let puzzle = PuzzleGenerator::with_seed(seed).generate(&config);
        let rendered = puzzle.target().to_string();
        prop_assert_eq!(rendered.len(), width.value());
        prop_assert!(!rendered.starts_with('0'));
        prop_assert!(width.range().contains(&puzzle.target()));
        prop_assert_eq!(puzzle.digits().len(), count.value());
    }
}
