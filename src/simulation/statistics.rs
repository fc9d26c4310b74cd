//! Significance queries over a completed histogram.
//!
//! Two independent read-only queries:
//!
//! - [`test_for_stat_sig`]: for each candidate score `v`,
//!   `p(v) = (1 + #trials ≥ v) / (1 + #trials)`, significant iff `p(v) ≤ 1/20`.
//! - [`find_significance_threshold`]: scan from the top slot downwards,
//!   accumulating counts *above* the current slot; the first slot whose
//!   upper mass reaches `0.05 × #trials` is the threshold. Scores strictly
//!   greater than it form the significant region.
//!
//! All comparisons against 5% are integer cross-multiplications.

use std::collections::HashSet;

use tracing::debug;

use crate::constants::*;
use crate::errors::EvaluationError;
use crate::types::{Histogram, SignificanceThreshold, SignificanceVerdict, TailProbability};

/// Total trials, or an error when there is nothing to reason about.
fn non_degenerate_total(histogram: &Histogram) -> Result<u64, EvaluationError> {
    match histogram.total_trials() {
        0 => Err(EvaluationError::DegenerateHistogram),
        total => Ok(total),
    }
}

/// Pseudocounted upper-tail probability of `score` given `total` trials.
pub fn tail_probability(histogram: &Histogram, score: u64, total: u64) -> TailProbability {
    let at_or_above = usize::try_from(score).map_or(0, |s| histogram.tail_count(s));
    TailProbability::new(PSEUDOCOUNT + at_or_above, PSEUDOCOUNT + total)
}

/// Evaluate each candidate score against the upper-tail 5% criterion.
///
/// Results follow input order. Repeated scores map to a single entry (the
/// first occurrence). Any negative score rejects the whole batch before
/// anything is computed; scores above the top slot are valid and get the
/// minimum probability `1 / (total + 1)`.
pub fn test_for_stat_sig(
    histogram: &Histogram,
    candidate_scores: &[i64],
) -> Result<Vec<SignificanceVerdict>, EvaluationError> {
    let total = non_degenerate_total(histogram)?;
    if let Some(&score) = candidate_scores.iter().find(|&&s| s < 0) {
        return Err(EvaluationError::NegativeScore { score });
    }

    let mut seen: HashSet<u64> = HashSet::with_capacity(candidate_scores.len());
    let mut verdicts: Vec<SignificanceVerdict> = Vec::with_capacity(candidate_scores.len());
    for &raw in candidate_scores {
        let score = raw as u64;
        if !seen.insert(score) {
            continue;
        }
        let tail_probability = tail_probability(histogram, score, total);
        verdicts.push(SignificanceVerdict {
            score,
            is_significant: tail_probability.is_significant(),
            tail_probability,
        });
    }

    debug!(tested = verdicts.len(), total, "significance tests computed");
    Ok(verdicts)
}

/// Locate the boundary of the top-5% mass.
///
/// Walks slots from the highest score down. Before adding a slot, if the
/// mass accumulated so far (trials scoring strictly above it) has reached
/// `0.05 × total`, returns that slot's index + 1. If the scan exhausts the
/// histogram the threshold is 0.
pub fn find_significance_threshold(
    histogram: &Histogram,
) -> Result<SignificanceThreshold, EvaluationError> {
    let total = non_degenerate_total(histogram)?;
    let reached = |mass: u64| {
        mass as u128 * SIGNIFICANCE_DENOMINATOR as u128
            >= total as u128 * SIGNIFICANCE_NUMERATOR as u128
    };

    let mut above = 0u64;
    let mut index = 0usize;
    for (score, &count) in histogram.counts().iter().enumerate().rev() {
        if reached(above) {
            index = score + 1;
            break;
        }
        above += count;
    }

    let threshold = SignificanceThreshold {
        index,
        cutoff_mass: total as f64 * SIGNIFICANCE_LEVEL,
    };
    debug!(index, above, total, "significance threshold found");
    Ok(threshold)
}

/// Parse a comma-separated list of integer scores, e.g. `"30,35, 40"`.
///
/// Every token must be an integer; nothing is skipped. Sign is not checked
/// here, see [`test_for_stat_sig`].
pub fn parse_candidate_scores(input: &str) -> Result<Vec<i64>, EvaluationError> {
    if input.trim().is_empty() {
        return Err(EvaluationError::EmptyScoreList);
    }
    input
        .split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<i64>()
                .map_err(|_| EvaluationError::MalformedScore {
                    token: token.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(counts: &[u64]) -> Histogram {
        Histogram::from_counts(counts.to_vec())
    }

    #[test]
    fn test_threshold_top_bucket_dominates() {
        let t = find_significance_threshold(&hist(&[1, 2, 3, 4, 90])).unwrap();
        assert_eq!(t.index, 4);
        assert_eq!(t.cutoff_mass, 5.0);
    }

    #[test]
    fn test_threshold_accumulates_several_buckets() {
        // From the top: 10, 40, 100 ≥ 50 after slot 3 → threshold 3.
        let t = find_significance_threshold(&hist(&[400, 300, 200, 60, 30, 10])).unwrap();
        assert_eq!(t.index, 3);
        assert_eq!(t.cutoff_mass, 50.0);
    }

    #[test]
    fn test_threshold_exact_tie_stops() {
        // Upper mass hits exactly 5 of 100 above slot 2.
        let t = find_significance_threshold(&hist(&[80, 15, 0, 5])).unwrap();
        assert_eq!(t.index, 3);
    }

    #[test]
    fn test_threshold_all_mass_at_zero() {
        let t = find_significance_threshold(&hist(&[100, 0, 0])).unwrap();
        assert_eq!(t.index, 0);
    }

    #[test]
    fn test_threshold_degenerate() {
        assert_eq!(
            find_significance_threshold(&hist(&[0, 0, 0])),
            Err(EvaluationError::DegenerateHistogram)
        );
        assert_eq!(
            find_significance_threshold(&hist(&[])),
            Err(EvaluationError::DegenerateHistogram)
        );
    }

    #[test]
    fn test_stat_sig_values() {
        let h = hist(&[1, 2, 3, 4, 90]);
        let v = test_for_stat_sig(&h, &[4, 5, 0]).unwrap();
        assert_eq!(v.len(), 3);

        assert_eq!(v[0].score, 4);
        assert_eq!(v[0].tail_probability, TailProbability::new(91, 101));
        assert!(!v[0].is_significant);

        // Above the top slot: only the pseudocount remains.
        assert_eq!(v[1].score, 5);
        assert_eq!(v[1].tail_probability, TailProbability::new(1, 101));
        assert!(v[1].is_significant);

        assert_eq!(v[2].tail_probability, TailProbability::new(1, 1));
        assert!(!v[2].is_significant);
    }

    #[test]
    fn test_stat_sig_exact_boundary_is_significant() {
        // (1 + 4) / (1 + 99) = 1/20 exactly.
        let h = hist(&[95, 4]);
        let v = test_for_stat_sig(&h, &[1]).unwrap();
        assert_eq!(v[0].tail_probability, TailProbability::new(5, 100));
        assert!(v[0].is_significant);
    }

    #[test]
    fn test_stat_sig_duplicates_collapse_in_input_order() {
        let h = hist(&[10, 10, 10]);
        let v = test_for_stat_sig(&h, &[2, 0, 2, 1, 0]).unwrap();
        let scores: Vec<u64> = v.iter().map(|x| x.score).collect();
        assert_eq!(scores, vec![2, 0, 1]);
    }

    #[test]
    fn test_stat_sig_many_duplicates() {
        let h = hist(&[10, 10, 10]);
        let candidates: Vec<i64> = (0..50_000).map(|i| i % 7).collect();
        let v = test_for_stat_sig(&h, &candidates).unwrap();
        let scores: Vec<u64> = v.iter().map(|x| x.score).collect();
        assert_eq!(scores, (0..7).collect::<Vec<u64>>());
    }

    #[test]
    fn test_stat_sig_rejects_negative() {
        let h = hist(&[10, 10, 10]);
        assert_eq!(
            test_for_stat_sig(&h, &[1, -3, 2]),
            Err(EvaluationError::NegativeScore { score: -3 })
        );
    }

    #[test]
    fn test_stat_sig_degenerate() {
        assert_eq!(
            test_for_stat_sig(&hist(&[0, 0]), &[1]),
            Err(EvaluationError::DegenerateHistogram)
        );
    }

    #[test]
    fn test_stat_sig_empty_candidates() {
        let v = test_for_stat_sig(&hist(&[1, 1]), &[]).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_parse_candidate_scores() {
        assert_eq!(parse_candidate_scores("30,35,40").unwrap(), vec![30, 35, 40]);
        assert_eq!(parse_candidate_scores(" 7 , -2 ").unwrap(), vec![7, -2]);
        assert_eq!(
            parse_candidate_scores("30,abc,40"),
            Err(EvaluationError::MalformedScore {
                token: "abc".to_string()
            })
        );
        assert_eq!(
            parse_candidate_scores("1,,2"),
            Err(EvaluationError::MalformedScore {
                token: String::new()
            })
        );
        assert_eq!(
            parse_candidate_scores("  "),
            Err(EvaluationError::EmptyScoreList)
        );
        assert!(parse_candidate_scores("2.5").is_err());
    }
}
