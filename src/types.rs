//! Core data structures: simulation config, histogram, exact tail probabilities.
//!
//! The central type is [`Histogram`] (the "dotplot"): slot `i` counts trials
//! with exactly `i` correct answers. It is built once by
//! [`crate::simulation::engine`] and then read by both significance queries.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::constants::*;
use crate::errors::ConfigError;

// ── Configuration ───────────────────────────────────────────────────

/// Parameters of one Monte Carlo run.
///
/// `questions_per_trial` is how many fair draws a trial makes;
/// `max_observable_score` is the highest histogram index. They describe the
/// same exam and must be equal: a trial of N draws scores 0..=N, which needs
/// exactly N+1 slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimulationConfig {
    pub questions_per_trial: usize,
    pub max_observable_score: usize,
    pub iterations: u64,
    /// `None` means draw a fresh seed from OS entropy at run time.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXAM_SIZE, DEFAULT_ITERATIONS)
    }
}

impl SimulationConfig {
    pub fn new(exam_size: usize, iterations: u64) -> Self {
        Self {
            questions_per_trial: exam_size,
            max_observable_score: exam_size,
            iterations,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of histogram slots: one per score in `0..=max_observable_score`.
    pub fn histogram_len(&self) -> usize {
        self.max_observable_score + 1
    }

    /// Fail fast on anything that would make the run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.questions_per_trial == 0 {
            return Err(ConfigError::invalid(
                "exam_size",
                "must be a positive number of questions",
            ));
        }
        if self.max_observable_score.checked_add(1).is_none() {
            return Err(ConfigError::invalid(
                "exam_size",
                "histogram length overflows usize",
            ));
        }
        if self.questions_per_trial > MAX_EXAM_SIZE || self.max_observable_score > MAX_EXAM_SIZE {
            return Err(ConfigError::invalid(
                "exam_size",
                format!("must be at most {}", MAX_EXAM_SIZE),
            ));
        }
        if self.iterations == 0 {
            return Err(ConfigError::invalid(
                "iterations",
                "must be a positive number of trials",
            ));
        }
        if self.questions_per_trial != self.max_observable_score {
            return Err(ConfigError::ScoreRangeMismatch {
                questions_per_trial: self.questions_per_trial,
                max_observable_score: self.max_observable_score,
            });
        }
        Ok(())
    }
}

// ── Histogram ───────────────────────────────────────────────────────

/// Frequency of correct-answer counts over all simulated trials.
///
/// Invariants: `len() == max_score() + 1` and `total_trials()` equals the
/// number of trials recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    /// All-zero histogram covering scores `0..=max_score`.
    pub fn new(max_score: usize) -> Self {
        Self {
            counts: vec![0; max_score + 1],
        }
    }

    pub fn from_counts(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Highest representable score. Meaningless for an empty histogram.
    pub fn max_score(&self) -> usize {
        self.counts.len().saturating_sub(1)
    }

    pub fn total_trials(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Tally one trial. Panics if `score` is outside the histogram.
    #[inline(always)]
    pub fn record(&mut self, score: usize) {
        self.counts[score] += 1;
    }

    /// Trials scoring at least `score`. Zero above the top slot.
    pub fn tail_count(&self, score: usize) -> u64 {
        self.counts
            .get(score..)
            .map_or(0, |tail| tail.iter().sum())
    }

    /// Element-wise sum of a partial histogram built by another worker.
    pub fn merge(&mut self, other: &Histogram) {
        debug_assert_eq!(self.len(), other.len(), "merging histograms of different shape");
        for (dst, &src) in self.counts.iter_mut().zip(&other.counts) {
            *dst += src;
        }
    }
}

// ── Exact tail probability ──────────────────────────────────────────

/// `numerator / denominator`, kept exact. The denominator is always positive.
///
/// Equality and ordering compare values (cross-multiplied), so `1/20 == 5/100`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TailProbability {
    pub numerator: u64,
    pub denominator: u64,
}

impl TailProbability {
    pub fn new(numerator: u64, denominator: u64) -> Self {
        debug_assert!(denominator > 0);
        Self {
            numerator,
            denominator,
        }
    }

    /// `self <= num / den`, exactly.
    pub fn is_at_most(&self, num: u64, den: u64) -> bool {
        self.numerator as u128 * den as u128 <= num as u128 * self.denominator as u128
    }

    /// `self <= α` (5%).
    pub fn is_significant(&self) -> bool {
        self.is_at_most(SIGNIFICANCE_NUMERATOR, SIGNIFICANCE_DENOMINATOR)
    }

    /// Float approximation for display.
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl PartialEq for TailProbability {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TailProbability {}

impl PartialOrd for TailProbability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TailProbability {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as u128 * other.denominator as u128;
        let rhs = other.numerator as u128 * self.denominator as u128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for TailProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// ── Query results ───────────────────────────────────────────────────

/// Outcome of testing one candidate score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SignificanceVerdict {
    pub score: u64,
    pub is_significant: bool,
    pub tail_probability: TailProbability,
}

/// Boundary of the top-5% region of a histogram.
///
/// Scores strictly greater than `index` make up the significant region.
/// `cutoff_mass` is `0.05 × total_trials`, the mass the downward scan had to
/// reach.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SignificanceThreshold {
    pub index: usize,
    pub cutoff_mass: f64,
}
