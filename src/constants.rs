//! Experiment defaults and fixed statistical constants.
//!
//! - [`DEFAULT_EXAM_SIZE`] = 40 questions per simulated exam
//! - [`DEFAULT_ITERATIONS`] = 100,000 trials per run
//! - significance level α = [`SIGNIFICANCE_NUMERATOR`] / [`SIGNIFICANCE_DENOMINATOR`] = 1/20

/// Number of true/false questions in the default simulated exam.
pub const DEFAULT_EXAM_SIZE: usize = 40;

/// Largest accepted exam size. Caps the histogram at `MAX_EXAM_SIZE + 1`
/// slots (8 MiB of counters).
pub const MAX_EXAM_SIZE: usize = 1 << 20;

/// Number of Monte Carlo trials in a default run.
pub const DEFAULT_ITERATIONS: u64 = 100_000;

/// α = 1/20 (5%), kept as an exact ratio. `p <= α` ⇔ `p.num * DEN <= p.den * NUM`.
pub const SIGNIFICANCE_NUMERATOR: u64 = 1;
pub const SIGNIFICANCE_DENOMINATOR: u64 = 20;

/// α as a float, for display only. Never used in a comparison.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Laplace-style pseudocount added to both the tail count and the trial total.
pub const PSEUDOCOUNT: u64 = 1;

/// Trials per rayon shard.
///
/// Fixed so shard boundaries (and therefore per-shard seeds) are independent
/// of the thread count: same seed ⇒ same histogram on any machine.
pub const TRIALS_PER_SHARD: u64 = 8192;

/// Draws extracted from one `u64` of PRNG output.
pub const DRAWS_PER_WORD: usize = 64;

/// Environment variables read by [`crate::env_config`].
pub const ENV_EXAM_SIZE: &str = "GUESS_SIG_EXAM_SIZE";
pub const ENV_ITERATIONS: &str = "GUESS_SIG_ITERATIONS";
pub const ENV_SEED: &str = "GUESS_SIG_SEED";
pub const ENV_LOG: &str = "GUESS_SIG_LOG";
pub const ENV_THREADS: &str = "RAYON_NUM_THREADS";
