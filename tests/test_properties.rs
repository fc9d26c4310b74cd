//! Property-based tests for the generator and both significance queries.

use proptest::prelude::*;

use guess_sig::simulation::{
    find_significance_threshold, generate_distribution_seeded, test_for_stat_sig,
};
use guess_sig::types::Histogram;

/// Strategy: arbitrary histogram with at least one trial.
fn histogram_strategy() -> impl Strategy<Value = Histogram> {
    prop::collection::vec(0u64..500, 1..=41)
        .prop_filter("needs at least one trial", |c| c.iter().sum::<u64>() > 0)
        .prop_map(Histogram::from_counts)
}

/// Strategy: histogram whose total is a positive multiple of 20, so 5% of it
/// is a whole number of trials.
fn round_total_histogram_strategy() -> impl Strategy<Value = Histogram> {
    prop::collection::vec(0u64..500, 1..=41).prop_map(|mut counts| {
        let total: u64 = counts.iter().sum();
        counts[0] += match total % 20 {
            0 if total == 0 => 20,
            0 => 0,
            r => 20 - r,
        };
        Histogram::from_counts(counts)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // 1. Every trial lands in exactly one slot
    #[test]
    fn mass_conserved(size in 1usize..=70, iterations in 0u64..2000, seed in any::<u64>()) {
        let h = generate_distribution_seeded(size, iterations, seed).unwrap();
        prop_assert_eq!(h.total_trials(), iterations);
    }

    // 2. One slot per score 0..=size
    #[test]
    fn histogram_shape(size in 1usize..=130, seed in any::<u64>()) {
        let h = generate_distribution_seeded(size, 100, seed).unwrap();
        prop_assert_eq!(h.len(), size + 1);
    }

    // 3. Fixed seed, fixed output
    #[test]
    fn deterministic_under_seed(size in 1usize..=50, seed in any::<u64>()) {
        let a = generate_distribution_seeded(size, 500, seed).unwrap();
        let b = generate_distribution_seeded(size, 500, seed).unwrap();
        prop_assert_eq!(a, b);
    }

    // 4. Tail probability never increases with the score
    #[test]
    fn tail_probability_monotone(h in histogram_strategy()) {
        let scores: Vec<i64> = (0..=(h.len() as i64 + 2)).collect();
        let verdicts = test_for_stat_sig(&h, &scores).unwrap();
        for pair in verdicts.windows(2) {
            prop_assert!(
                pair[1].tail_probability <= pair[0].tail_probability,
                "p({}) = {} > p({}) = {}",
                pair[1].score, pair[1].tail_probability,
                pair[0].score, pair[0].tail_probability
            );
        }
        // Once significant, always significant further up.
        let first_sig = verdicts.iter().position(|v| v.is_significant);
        if let Some(i) = first_sig {
            prop_assert!(verdicts[i..].iter().all(|v| v.is_significant));
        }
    }

    // 5. Threshold stays inside the histogram
    #[test]
    fn threshold_in_range(h in histogram_strategy()) {
        let t = find_significance_threshold(&h).unwrap();
        prop_assert!(t.index < h.len());
        prop_assert_eq!(t.cutoff_mass, h.total_trials() as f64 * 0.05);
    }

    // 6. The threshold score itself is not significant, the next one is
    #[test]
    fn threshold_matches_stat_sig(h in round_total_histogram_strategy()) {
        let t = find_significance_threshold(&h).unwrap();
        let at = t.index as i64;
        let verdicts = test_for_stat_sig(&h, &[at, at + 1]).unwrap();
        prop_assert!(!verdicts[0].is_significant, "score {} at threshold flagged", at);
        prop_assert!(verdicts[1].is_significant, "score {} above threshold not flagged", at + 1);
    }
}
