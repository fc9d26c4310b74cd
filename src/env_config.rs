//! Environment configuration shared by the binary and tests.
//!
//! Reads `GUESS_SIG_EXAM_SIZE`, `GUESS_SIG_ITERATIONS`, `GUESS_SIG_SEED`
//! (simulation parameters), `GUESS_SIG_LOG` (tracing filter) and sizes the
//! rayon pool.

use std::str::FromStr;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::constants::*;
use crate::errors::ConfigError;
use crate::types::SimulationConfig;

static INIT_TRACING: Once = Once::new();

/// Install the stderr `fmt` subscriber. Filter from `GUESS_SIG_LOG`, default
/// `warn`. Idempotent.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    });
}

/// Parse `raw` as `T`, naming `field` in the error.
fn parse_value<T: FromStr>(field: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(field, format!("cannot parse {:?}", raw)))
}

/// Read an optional typed override. Unset is `None`; set-but-garbage is an error.
pub fn env_override<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => parse_value(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

/// Built-in defaults overlaid with environment overrides. Not validated.
pub fn config_from_env() -> Result<SimulationConfig, ConfigError> {
    let exam_size = env_override::<usize>(ENV_EXAM_SIZE)?.unwrap_or(DEFAULT_EXAM_SIZE);
    let iterations = env_override::<u64>(ENV_ITERATIONS)?.unwrap_or(DEFAULT_ITERATIONS);
    let mut config = SimulationConfig::new(exam_size, iterations);
    config.seed = env_override::<u64>(ENV_SEED)?;
    Ok(config)
}

/// Size the global rayon pool. `None` keeps rayon's own default, which
/// already honours `RAYON_NUM_THREADS`. Returns the effective thread count.
pub fn init_rayon_threads(threads: Option<usize>) -> Result<usize, ConfigError> {
    if let Some(n) = threads {
        if n == 0 {
            return Err(ConfigError::invalid("threads", "must be at least 1"));
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok(); // May fail if already initialized
    }
    Ok(rayon::current_num_threads())
}
