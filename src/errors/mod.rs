//! Error types.
//!
//! Each concern gets its own enum; [`Error`] unifies them for the binary.

mod config_error;
mod evaluation_error;

pub use config_error::ConfigError;
pub use evaluation_error::EvaluationError;

/// Any failure the CLI can report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}
