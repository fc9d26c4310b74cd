//! Distribution generator — tallies correct-answer counts of random guessers.
//!
//! One trial is `questions_per_trial` independent fair draws; its score is
//! the number of draws that came up "correct". Draws are taken 64 at a time
//! from a single PRNG word and counted with `count_ones`, so each draw is one
//! uniformly random bit.
//!
//! ## Parallel mode
//!
//! [`simulate`] splits the run into shards of [`TRIALS_PER_SHARD`] trials.
//! Each shard owns a private histogram and a `SmallRng` seeded with
//! `seed + shard`, and shards are merged by element-wise sum. Shard layout
//! depends only on the iteration count, so output is reproducible for a
//! fixed seed whatever the thread count.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

use crate::constants::*;
use crate::errors::ConfigError;
use crate::types::{Histogram, SimulationConfig};

/// Results of a (possibly parallel) simulation run.
pub struct SimulationResult {
    pub histogram: Histogram,
    /// Seed actually used, so an entropy-seeded run can be replayed.
    pub seed: u64,
}

/// Play one trial: number of correct answers out of `questions` fair guesses.
#[inline(always)]
pub fn run_trial<R: RngCore + ?Sized>(rng: &mut R, questions: usize) -> usize {
    let mut correct = 0usize;
    let mut remaining = questions;
    while remaining >= DRAWS_PER_WORD {
        correct += rng.next_u64().count_ones() as usize;
        remaining -= DRAWS_PER_WORD;
    }
    if remaining > 0 {
        let mask = (1u64 << remaining) - 1;
        correct += (rng.next_u64() & mask).count_ones() as usize;
    }
    correct
}

/// Run `trials` trials into a fresh histogram with slots `0..=max_score`.
///
/// Requires `questions <= max_score`, otherwise a perfect trial has no slot.
fn simulate_trials<R: RngCore + ?Sized>(
    rng: &mut R,
    questions: usize,
    max_score: usize,
    trials: u64,
) -> Histogram {
    debug_assert!(questions <= max_score);
    let mut histogram = Histogram::new(max_score);
    for _ in 0..trials {
        histogram.record(run_trial(rng, questions));
    }
    histogram
}

/// Single-threaded generator with an explicit seed.
///
/// Returns a histogram of length `size + 1` whose entries sum to
/// `iterations`. `iterations == 0` gives an all-zero histogram.
pub fn generate_distribution_seeded(
    size: usize,
    iterations: u64,
    seed: u64,
) -> Result<Histogram, ConfigError> {
    if size == 0 {
        return Err(ConfigError::invalid(
            "size",
            "must be a positive number of questions",
        ));
    }
    if size > MAX_EXAM_SIZE {
        return Err(ConfigError::invalid(
            "size",
            format!("must be at most {}", MAX_EXAM_SIZE),
        ));
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    Ok(simulate_trials(&mut rng, size, size, iterations))
}

/// Single-threaded generator seeded from OS entropy.
pub fn generate_distribution(size: usize, iterations: u64) -> Result<Histogram, ConfigError> {
    generate_distribution_seeded(size, iterations, rand::random())
}

/// Validate `config` and run it across the rayon pool.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationResult, ConfigError> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let questions = config.questions_per_trial;
    let max_score = config.max_observable_score;
    let iterations = config.iterations;
    let num_shards = iterations.div_ceil(TRIALS_PER_SHARD);

    info!(
        questions,
        iterations,
        num_shards,
        "starting simulation"
    );
    debug!(seed, "simulation seed");

    let start = Instant::now();
    let histogram = (0..num_shards)
        .into_par_iter()
        .map(|shard| {
            let first = shard * TRIALS_PER_SHARD;
            let trials = TRIALS_PER_SHARD.min(iterations - first);
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(shard));
            simulate_trials(&mut rng, questions, max_score, trials)
        })
        .reduce(
            || Histogram::new(max_score),
            |mut acc, part| {
                acc.merge(&part);
                acc
            },
        );
    let elapsed = start.elapsed();

    info!(
        total_trials = histogram.total_trials(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "simulation finished"
    );

    Ok(SimulationResult { histogram, seed })
}
