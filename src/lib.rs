//! # guess-sig — Monte Carlo significance for guessed true/false exams
//!
//! Estimates the distribution of correct-answer counts for a test-taker who
//! guesses every question of a fixed-size true/false exam, then uses that
//! **empirical** distribution to decide whether an observed score is unlikely
//! to come from guessing (one-sided, 5% level).
//!
//! ## Pipeline
//!
//! | Step | Rust module | Description |
//! |------|-------------|-------------|
//! | 1 | [`simulation::engine`] | Run N-question fair-coin trials, tally the correct-count of each into a [`types::Histogram`] ("dotplot") |
//! | 2a | [`simulation::statistics::test_for_stat_sig`] | Upper-tail probability (with pseudocount) for arbitrary candidate scores |
//! | 2b | [`simulation::statistics::find_significance_threshold`] | Boundary score above which the top 5% of simulated mass lies |
//! | 3 | [`report`] | Text and JSON rendering for the CLI |
//!
//! The histogram is built once and only read afterwards. Both queries are
//! independent and never mutate it.
//!
//! ## Arithmetic
//!
//! - Tail probabilities are exact ratios ([`types::TailProbability`]); the
//!   comparison against 5% is done by cross-multiplication in `u128`, so
//!   boundary cases are never misclassified by float rounding.
//! - The `+1` pseudocount appears in both numerator and denominator and is
//!   part of the estimator, not an approximation to remove.
//! - No closed-form binomial math anywhere: sampling noise is part of the
//!   result.

pub mod constants;
pub mod env_config;
pub mod errors;
pub mod report;
pub mod simulation;
pub mod types;

pub use errors::{ConfigError, Error, EvaluationError};
