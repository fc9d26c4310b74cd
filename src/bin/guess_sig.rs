use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::debug;

use guess_sig::env_config;
use guess_sig::errors::{Error, EvaluationError};
use guess_sig::report::{render_dotplot, render_json, render_tests};
use guess_sig::simulation::{
    find_significance_threshold, parse_candidate_scores, simulate, test_for_stat_sig,
};
use guess_sig::types::SimulationConfig;

/// Estimate, by simulation, how many answers a guesser gets right on a
/// true/false exam, and test observed scores against that distribution.
#[derive(Parser, Debug)]
#[command(name = "guess-sig", version, about)]
struct Args {
    /// Test given values (comma-separated) for statistical significance
    /// against a hypothetical random distribution
    #[arg(short, long, value_name = "VALUES", allow_hyphen_values = true)]
    test: Option<String>,

    /// Print the dotplot of the number of correct answers of each trial in
    /// the simulation, with the significance threshold
    #[arg(short, long)]
    show: bool,

    /// Questions per simulated exam [env: GUESS_SIG_EXAM_SIZE, default: 40]
    #[arg(long, value_name = "N")]
    exam_size: Option<usize>,

    /// Number of simulated trials [env: GUESS_SIG_ITERATIONS, default: 100000]
    #[arg(long, value_name = "N")]
    iterations: Option<u64>,

    /// RNG seed for a reproducible run [env: GUESS_SIG_SEED, default: OS entropy]
    #[arg(long, value_name = "S")]
    seed: Option<u64>,

    /// Worker threads [env: RAYON_NUM_THREADS]
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Emit one JSON object instead of text
    #[arg(long)]
    json: bool,
}

/// Defaults < environment < command line.
fn resolve_config(args: &Args) -> Result<SimulationConfig, Error> {
    let mut config = env_config::config_from_env()?;
    if let Some(n) = args.exam_size {
        config.questions_per_trial = n;
        config.max_observable_score = n;
    }
    if let Some(n) = args.iterations {
        config.iterations = n;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<(), Error> {
    let config = resolve_config(&args)?;
    debug!(?config, "configuration resolved");

    // Reject bad candidates before spending time on the simulation.
    let candidates = match args.test.as_deref() {
        Some(raw) => {
            let scores = parse_candidate_scores(raw)?;
            if let Some(&score) = scores.iter().find(|&&s| s < 0) {
                return Err(EvaluationError::NegativeScore { score }.into());
            }
            Some(scores)
        }
        None => None,
    };

    if !args.show && candidates.is_none() {
        return Ok(());
    }

    env_config::init_rayon_threads(args.threads)?;
    let result = simulate(&config)?;
    let histogram = &result.histogram;

    let threshold = if args.show {
        Some(find_significance_threshold(histogram)?)
    } else {
        None
    };
    let verdicts = match &candidates {
        Some(scores) => Some(test_for_stat_sig(histogram, scores)?),
        None => None,
    };

    if args.json {
        println!(
            "{}",
            render_json(
                result.seed,
                histogram,
                threshold.as_ref(),
                verdicts.as_deref()
            )?
        );
        return Ok(());
    }

    if let Some(threshold) = &threshold {
        println!("{}", render_dotplot(histogram, threshold));
    }
    if let Some(verdicts) = &verdicts {
        println!("{}", render_tests(verdicts));
    }
    Ok(())
}

fn main() -> ExitCode {
    if std::env::args_os().len() <= 1 {
        eprintln!("{}", Args::command().render_help());
        return ExitCode::from(1);
    }

    let args = Args::parse();
    env_config::init_tracing();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
