//! Guessing simulation and significance statistics.
//!
//! - [`engine`]: Monte Carlo generator (sequential and sharded-parallel)
//! - [`statistics`]: Tail-probability tests and the 5% threshold scan

pub mod engine;
pub mod statistics;

// Re-export commonly used items
pub use engine::{
    generate_distribution, generate_distribution_seeded, run_trial, simulate, SimulationResult,
};
pub use statistics::{
    find_significance_threshold, parse_candidate_scores, tail_probability, test_for_stat_sig,
};
